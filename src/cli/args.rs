//! CLI argument definitions for `GradeTracker`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use grade_tracker::config::ConfigOverrides;
use grade_tracker::core::models::{Division, Year};
use grade_tracker::logger::Level;

/// Output of the `status` command
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum StatusFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// The promotion status as JSON
    Json,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Print every setting, or one setting when KEY is given.
    Get {
        /// Key such as `level`, `data_file` or `year1.min_average`
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Change a setting and save the config file.
    Set {
        #[arg(value_name = "KEY")]
        key: String,
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Restore one setting to its default.
    Unset {
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Delete the config file so defaults apply (asks first).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum GradeSubcommand {
    /// Add a grade to a subject.
    Add {
        /// Subject id (e.g., `math`, or a member of a combined subject like `german`)
        #[arg(value_name = "SUBJECT")]
        subject: String,
        /// Grade value between 1 and 6
        #[arg(value_name = "VALUE", allow_negative_numbers = true)]
        value: f64,
        /// Weight of the grade
        #[arg(short, long, default_value_t = 1.0)]
        weight: f64,
        /// Optional label (e.g., "Midterm")
        #[arg(short, long)]
        label: Option<String>,
        /// Year to record the grade in (defaults to the current year)
        #[arg(short, long)]
        year: Option<Year>,
    },
    /// Edit an existing grade.
    Edit {
        /// Grade id as shown by `subjects`
        #[arg(value_name = "GRADE_ID")]
        grade_id: String,
        /// New value
        #[arg(long, allow_negative_numbers = true)]
        value: Option<f64>,
        /// New weight
        #[arg(short, long)]
        weight: Option<f64>,
        /// New label; an empty string removes it
        #[arg(short, long)]
        label: Option<String>,
        /// Year holding the grade (defaults to the current year)
        #[arg(short, long)]
        year: Option<Year>,
    },
    /// Delete a grade.
    Delete {
        /// Grade id as shown by `subjects`
        #[arg(value_name = "GRADE_ID")]
        grade_id: String,
        /// Year holding the grade (defaults to the current year)
        #[arg(short, long)]
        year: Option<Year>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DataSubcommand {
    /// Export the student data as JSON.
    Export {
        /// Target directory (defaults to config `exports_dir`)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// Import student data from a JSON export, replacing the stored data.
    Import {
        /// Exported JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Delete all stored student data (requires confirmation).
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set up the student profile.
    Init {
        /// Student name
        #[arg(short, long)]
        name: String,
        /// Division (fms or gymnasium)
        #[arg(short, long)]
        division: Division,
    },
    /// Show or change the current year.
    Year {
        /// Year to switch to (1, 2 or 3)
        #[arg(value_name = "YEAR")]
        year: Option<Year>,
    },
    /// List year-3 directions, or select one.
    ///
    /// Selecting a direction resets the year-3 subjects and drops their grades.
    Direction {
        /// Direction id (e.g., `direction-a`)
        #[arg(value_name = "ID")]
        id: Option<String>,
    },
    /// List subjects with their grades and final grades.
    Subjects {
        /// Year to list (defaults to the current year)
        #[arg(short, long)]
        year: Option<Year>,
    },
    /// Add, edit or delete grades.
    Grade {
        #[command(subcommand)]
        subcommand: GradeSubcommand,
    },
    /// Show the promotion status for a year.
    Status {
        /// Year to evaluate (defaults to the current year)
        #[arg(short, long)]
        year: Option<Year>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = StatusFormat::Text)]
        format: StatusFormat,
    },
    /// Write a report for a year.
    Report {
        /// Year to report on (defaults to the current year)
        #[arg(short, long)]
        year: Option<Year>,
        /// Report format: markdown (md), html, json or text
        #[arg(short, long, value_name = "FORMAT", default_value = "md")]
        format: String,
        /// Output file path (defaults to config `reports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Import, export or clear the stored data.
    Data {
        #[command(subcommand)]
        subcommand: DataSubcommand,
    },
    /// Show or edit settings; prints everything without a subcommand.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gradetracker",
    about = "Track weighted grades and check promotion criteria",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Log level for this run: error, warn, info or debug [default: config `level`]
    #[arg(long, value_name = "LEVEL", value_parser = str::parse::<Level>)]
    pub log_level: Option<Level>,

    /// Print extra progress output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Same as `--log-level debug`
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Append log lines to this file instead of the terminal
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Replace config `level` for this run
    #[arg(long = "config-level", value_name = "LEVEL", value_parser = str::parse::<Level>)]
    pub config_level: Option<Level>,

    /// Replace config `file` for this run
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Replace config `verbose` for this run
    #[arg(long = "config-verbose", value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Replace config `data_file` for this run
    #[arg(long = "config-data-file", value_name = "PATH")]
    pub config_data_file: Option<PathBuf>,

    /// Alias of `--config-data-file`; wins if both are given
    #[arg(long = "data-file", value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Replace config `exports_dir` for this run
    #[arg(long = "config-exports-dir", value_name = "DIR")]
    pub config_exports_dir: Option<PathBuf>,

    /// Alias of `--config-exports-dir`; wins if both are given
    #[arg(long = "exports-dir", value_name = "DIR")]
    pub exports_dir: Option<PathBuf>,

    /// Replace config `reports_dir` for this run
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Alias of `--config-reports-dir`; wins if both are given
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Collect the `--config-*` flags and their aliases
    #[must_use]
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|level| level.to_string()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            data_file: path_string(self.data_file.as_ref().or(self.config_data_file.as_ref())),
            exports_dir: path_string(
                self.exports_dir
                    .as_ref()
                    .or(self.config_exports_dir.as_ref()),
            ),
            reports_dir: path_string(
                self.reports_dir
                    .as_ref()
                    .or(self.config_reports_dir.as_ref()),
            ),
        }
    }
}
