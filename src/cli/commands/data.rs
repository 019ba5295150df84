//! Data export, import and clear commands

use crate::args::DataSubcommand;
use grade_tracker::config::Config;
use grade_tracker::core::storage::{export_data, import_from, JsonFileStore, StateStore};
use grade_tracker::{info, warn};
use std::io::{self, Write};
use std::path::PathBuf;

/// Dispatch data subcommands
pub fn run(subcommand: DataSubcommand, config: &Config) -> Result<(), String> {
    let store = JsonFileStore::new(&config.storage.data_file);

    match subcommand {
        DataSubcommand::Export { dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(&config.paths.exports_dir));
            let path = export_data(&store, &dir).map_err(|e| format!("✗ Export failed: {e}"))?;
            println!("✓ Exported to {}", path.display());
        }
        DataSubcommand::Import { file } => {
            let data = import_from(&file).map_err(|e| {
                warn!("Rejected import from {}: {e}", file.display());
                format!("✗ Import failed: {e}")
            })?;
            store
                .save(&data)
                .map_err(|e| format!("✗ Failed to save imported data: {e}"))?;
            println!("✓ Imported {}", file.display());
            if !data.is_onboarded() {
                println!("  The imported data has no student profile; run `gradetracker init`.");
            }
        }
        DataSubcommand::Clear => {
            if !store.path().exists() {
                println!("✓ No stored data");
                return Ok(());
            }

            print!("Are you sure you want to delete all grades and the student profile? (y/n): ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin().read_line(&mut response).ok();

            if response.trim().eq_ignore_ascii_case("y")
                || response.trim().eq_ignore_ascii_case("yes")
            {
                store
                    .clear()
                    .map_err(|e| format!("✗ Failed to clear data: {e}"))?;
                info!("Cleared student data");
                println!("✓ All data cleared");
            } else {
                println!("✗ Clear cancelled");
            }
        }
    }

    Ok(())
}
