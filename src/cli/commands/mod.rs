//! CLI command handlers for `GradeTracker`.
//!
//! Each command is implemented in its own submodule. Handlers that touch the
//! student data go through [`Session`], which loads the stored document and
//! writes it back after a mutation.

pub mod config;
pub mod data;
pub mod grade;
pub mod report;
pub mod status;
pub mod student;

use grade_tracker::config::Config;
use grade_tracker::core::curriculum::initialize_student_data;
use grade_tracker::core::models::{StudentData, Year};
use grade_tracker::core::storage::{JsonFileStore, StateStore};
use grade_tracker::error;

/// Hint printed when a command needs a student profile
const ONBOARDING_HINT: &str =
    "✗ No student profile yet. Run `gradetracker init --name <NAME> --division <fms|gymnasium>` first.";

/// Loaded student data and the store it came from
pub struct Session {
    store: JsonFileStore,
    /// The student document
    pub data: StudentData,
}

impl Session {
    /// Load stored data, or start from a freshly initialized document
    pub fn open(config: &Config) -> Result<Self, String> {
        let store = JsonFileStore::new(&config.storage.data_file);
        let data = store
            .load()
            .map_err(|e| format!("✗ Failed to load {}: {e}", store.path().display()))?
            .unwrap_or_else(initialize_student_data);
        Ok(Self { store, data })
    }

    /// Load stored data, failing if onboarding has not been completed
    pub fn open_onboarded(config: &Config) -> Result<Self, String> {
        let session = Self::open(config)?;
        if session.data.is_onboarded() {
            Ok(session)
        } else {
            Err(ONBOARDING_HINT.to_string())
        }
    }

    /// The requested year, or the current year when none was given
    pub fn year(&self, year: Option<Year>) -> Year {
        year.unwrap_or(self.data.current_year)
    }

    /// Persist the document
    pub fn save(&self) -> Result<(), String> {
        self.store
            .save(&self.data)
            .map_err(|e| format!("✗ Failed to save {}: {e}", self.store.path().display()))
    }
}

/// Print a failed command's message and exit with status 1
pub fn exit_on_error(result: Result<(), String>) {
    if let Err(e) = result {
        error!("{}", e.trim_start_matches("✗ "));
        eprintln!("{e}");
        std::process::exit(1);
    }
}
