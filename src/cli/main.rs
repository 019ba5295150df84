//! Command-line interface entry point for `GradeTracker`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::exit_on_error;
use grade_tracker::config::Config;
use grade_tracker::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use grade_tracker::{info, verbose};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());
    init_logging(&args, &config);

    match args.command {
        Command::Config { subcommand } => {
            exit_on_error(commands::config::run(subcommand, &mut config, &defaults));
        }
        Command::Init { name, division } => {
            exit_on_error(commands::student::init(&config, &name, division));
        }
        Command::Year { year } => exit_on_error(commands::student::year(&config, year)),
        Command::Direction { id } => {
            exit_on_error(commands::student::direction(&config, id.as_deref()));
        }
        Command::Subjects { year } => exit_on_error(commands::student::subjects(&config, year)),
        Command::Grade { subcommand } => exit_on_error(commands::grade::run(subcommand, &config)),
        Command::Status { year, format } => {
            exit_on_error(commands::status::run(&config, year, format));
        }
        Command::Report {
            year,
            format,
            output,
        } => {
            exit_on_error(commands::report::run(
                &config,
                year,
                &format,
                output.as_deref(),
            ));
        }
        Command::Data { subcommand } => exit_on_error(commands::data::run(subcommand, &config)),
    }
}

/// Level: `--debug`, then `--log-level`, then config `level`, else warn.
/// Log file: `--log-file`, then config `file`.
fn init_logging(args: &Cli, config: &Config) {
    let level = if args.debug_flag {
        Level::Debug
    } else {
        args.log_level
            .or_else(|| config.logging.level.parse().ok())
            .unwrap_or(Level::Warn)
    };
    if level == Level::Debug {
        enable_debug();
    }
    set_level(level);

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }

    let log_path = args
        .log_file
        .clone()
        .or_else(|| (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file)));
    let Some(log_path) = log_path else {
        return;
    };
    if init_file_logging(&log_path) {
        verbose!("✓ Logging to {}", log_path.display());
        info!("Logging to {}", log_path.display());
    } else {
        eprintln!("✗ Could not open log file {}", log_path.display());
    }
}
