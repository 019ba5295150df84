//! Configuration for `GradeTracker`
//!
//! Settings are read from a TOML file in the platform config directory. The
//! file is created from compiled-in defaults on first run, and fields added
//! in later versions are merged in on load. `$GRADE_TRACKER` in a path value
//! expands to that directory.

use crate::core::criteria::CriteriaTable;
use crate::core::models::Year;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

// Debug builds get their own defaults and their own file so development runs
// never touch a user's real settings or data.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

const DIR_VARIABLE: &str = "$GRADE_TRACKER";

/// `[logging]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Runtime level: error, warn, info or debug
    #[serde(default)]
    pub level: String,
    /// Log file; empty logs to the terminal
    #[serde(default)]
    pub file: String,
    /// Print untagged verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// `[storage]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the student data document
    #[serde(default)]
    pub data_file: String,
}

/// `[paths]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Where `data export` writes
    #[serde(default)]
    pub exports_dir: String,
    /// Where `report` writes when no output file is given
    #[serde(default)]
    pub reports_dir: String,
}

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Output directories
    #[serde(default)]
    pub paths: PathsConfig,
    /// Promotion criteria per year (`[criteria.year1]` .. `[criteria.year3]`)
    #[serde(default)]
    pub criteria: CriteriaTable,
}

/// One-run values from CLI flags; `None` keeps the configured value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Logging level
    pub level: Option<String>,
    /// Log file
    pub file: Option<String>,
    /// Verbose flag
    pub verbose: Option<bool>,
    /// Student data file
    pub data_file: Option<String>,
    /// Exports directory
    pub exports_dir: Option<String>,
    /// Reports directory
    pub reports_dir: Option<String>,
}

/// A key accepted by `config get/set/unset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigKey<'a> {
    Level,
    File,
    Verbose,
    DataFile,
    ExportsDir,
    ReportsDir,
    /// `yearN.<criterion>`, optionally prefixed with `criteria.`
    Criterion(Year, &'a str),
}

impl<'a> ConfigKey<'a> {
    fn parse(key: &'a str) -> Result<Self, String> {
        let key = match key {
            "level" => Self::Level,
            "file" => Self::File,
            "verbose" => Self::Verbose,
            "data_file" | "data-file" => Self::DataFile,
            "exports_dir" | "exports-dir" => Self::ExportsDir,
            "reports_dir" | "reports-dir" => Self::ReportsDir,
            _ => {
                let path = key.strip_prefix("criteria.").unwrap_or(key);
                path.split_once('.')
                    .and_then(|(year, field)| {
                        let year = Year::from_str(year.strip_prefix("year")?).ok()?;
                        Some(Self::Criterion(year, field))
                    })
                    .ok_or_else(|| format!("Unknown config key: '{key}'"))?
            }
        };
        Ok(key)
    }
}

impl Config {
    /// The `$GRADE_TRACKER` directory
    ///
    /// - Linux: `~/.config/gradetracker`
    /// - macOS: `~/Library/Application Support/gradetracker`
    /// - Windows: `%APPDATA%\gradetracker`
    #[must_use]
    pub fn get_tracker_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gradetracker")
    }

    /// Path of the config file (`config.toml`, or `dconfig.toml` in debug builds)
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_tracker_dir().join(CONFIG_FILE_NAME)
    }

    fn string_fields_mut(&mut self) -> [&mut String; 5] {
        [
            &mut self.logging.level,
            &mut self.logging.file,
            &mut self.storage.data_file,
            &mut self.paths.exports_dir,
            &mut self.paths.reports_dir,
        ]
    }

    fn expand_paths(&mut self) {
        let dir = Self::get_tracker_dir();
        let dir = dir.to_str().unwrap_or(".");
        for value in [
            &mut self.logging.file,
            &mut self.storage.data_file,
            &mut self.paths.exports_dir,
            &mut self.paths.reports_dir,
        ] {
            if value.contains(DIR_VARIABLE) {
                *value = value.replace(DIR_VARIABLE, dir);
            }
        }
    }

    /// Fill empty string fields from `defaults`
    ///
    /// Used on load so that a config written by an older version picks up
    /// newly added settings. Criteria always deserialize to a full table, so
    /// only string fields are considered.
    ///
    /// Returns `true` if anything changed.
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut defaults = defaults.clone();
        let mut changed = false;
        for (value, default) in self
            .string_fields_mut()
            .into_iter()
            .zip(defaults.string_fields_mut())
        {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        }
        changed
    }

    /// Apply one-run CLI overrides without touching the saved file
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        let replacements = [
            (&mut self.logging.level, &overrides.level),
            (&mut self.logging.file, &overrides.file),
            (&mut self.storage.data_file, &overrides.data_file),
            (&mut self.paths.exports_dir, &overrides.exports_dir),
            (&mut self.paths.reports_dir, &overrides.reports_dir),
        ];
        for (value, replacement) in replacements {
            if let Some(replacement) = replacement {
                value.clone_from(replacement);
            }
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
    }

    /// Parse a TOML document and expand `$GRADE_TRACKER` in path values
    ///
    /// Missing sections and fields take their serde defaults.
    ///
    /// # Errors
    /// Returns an error if the TOML is invalid or doesn't match the schema.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;
        config.expand_paths();
        Ok(config)
    }

    /// The compiled-in defaults for this build profile
    ///
    /// # Panics
    /// Panics if the embedded defaults are not valid configuration, which the
    /// test suite rules out.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load the config file, creating it from defaults on first run
    ///
    /// An existing file is merged with the defaults and rewritten if new
    /// fields were added. An unreadable or invalid file is reported and the
    /// defaults are used for this run.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            if let Err(e) = defaults.save() {
                crate::warn!("Could not write default config: {e}");
            }
            return defaults;
        }

        let parsed = fs::read_to_string(&config_file)
            .map_err(|e| e.to_string())
            .and_then(|content| Self::from_toml(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    if let Err(e) = config.save() {
                        crate::warn!("Could not update config with new fields: {e}");
                    }
                }
                config
            }
            Err(e) => {
                crate::warn!("Ignoring config at {}: {e}", config_file.display());
                defaults
            }
        }
    }

    /// Write the config file, creating its directory if needed
    ///
    /// # Errors
    /// Returns an error if serialization, directory creation or the write fails.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_file, toml::to_string_pretty(self)?)?;
        crate::debug!("Saved config to {}", config_file.display());
        Ok(())
    }

    /// Read a value by key
    ///
    /// Keys: `level`, `file`, `verbose`, `data_file`, `exports_dir`,
    /// `reports_dir`, and `yearN.max_failures`, `yearN.min_average`,
    /// `yearN.max_deficit` for N in 1..=3. Returns `None` for unknown keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match ConfigKey::parse(key).ok()? {
            ConfigKey::Level => self.logging.level.clone(),
            ConfigKey::File => self.logging.file.clone(),
            ConfigKey::Verbose => self.logging.verbose.to_string(),
            ConfigKey::DataFile => self.storage.data_file.clone(),
            ConfigKey::ExportsDir => self.paths.exports_dir.clone(),
            ConfigKey::ReportsDir => self.paths.reports_dir.clone(),
            ConfigKey::Criterion(year, field) => return self.criteria.get(year, field),
        };
        Some(value)
    }

    /// Change a value by key (in memory; call [`save`](Config::save) to persist)
    ///
    /// # Errors
    /// Returns an error for an unknown key, an unknown log level, a non-boolean
    /// `verbose`, or a criterion that is not a non-negative number.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match ConfigKey::parse(key)? {
            ConfigKey::Level => {
                let level: crate::logger::Level = value.parse()?;
                self.logging.level = level.to_string();
            }
            ConfigKey::File => self.logging.file = value.to_string(),
            ConfigKey::Verbose => {
                self.logging.verbose = value
                    .parse()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            ConfigKey::DataFile => self.storage.data_file = value.to_string(),
            ConfigKey::ExportsDir => self.paths.exports_dir = value.to_string(),
            ConfigKey::ReportsDir => self.paths.reports_dir = value.to_string(),
            ConfigKey::Criterion(year, field) => self.criteria.set(year, field, value)?,
        }
        Ok(())
    }

    /// Restore one value from `defaults` (in memory)
    ///
    /// # Errors
    /// Returns an error if the key is unknown.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match ConfigKey::parse(key)? {
            ConfigKey::Level => self.logging.level.clone_from(&defaults.logging.level),
            ConfigKey::File => self.logging.file.clone_from(&defaults.logging.file),
            ConfigKey::Verbose => self.logging.verbose = defaults.logging.verbose,
            ConfigKey::DataFile => self
                .storage
                .data_file
                .clone_from(&defaults.storage.data_file),
            ConfigKey::ExportsDir => self
                .paths
                .exports_dir
                .clone_from(&defaults.paths.exports_dir),
            ConfigKey::ReportsDir => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            ConfigKey::Criterion(year, field) => {
                let default = defaults
                    .criteria
                    .get(year, field)
                    .ok_or_else(|| format!("Unknown criteria key: '{field}'"))?;
                self.criteria.set(year, field, &default)?;
            }
        }
        Ok(())
    }

    /// Delete the config file so the next [`load`](Config::load) starts from defaults
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[storage]")?;
        writeln!(f, "  data_file = \"{}\"", self.storage.data_file)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  exports_dir = \"{}\"", self.paths.exports_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        for year in Year::ALL {
            let c = self.criteria.for_year(year);
            writeln!(f, "\n[criteria.year{year}]")?;
            writeln!(f, "  max_failures = {}", c.max_failures)?;
            writeln!(f, "  min_average = {}", c.min_average)?;
            writeln!(f, "  max_deficit = {}", c.max_deficit)?;
        }

        Ok(())
    }
}
