//! Persistence and import/export of [`StudentData`]
//!
//! The student document is stored as a single JSON record. Exports use the
//! same schema, so an exported file can be imported back unchanged.

use crate::core::models::StudentData;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// Errors raised while loading, saving, importing or exporting student data
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Cause
        #[source]
        source: std::io::Error,
    },
    /// The text is not valid JSON
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The document is JSON but lacks the `years` object
    #[error("invalid data format: missing years")]
    MissingYears,
    /// The document is JSON but not a student data object
    #[error("invalid data format: {0}")]
    InvalidFormat(String),
    /// Export requested with nothing stored
    #[error("no data to export")]
    NothingToExport,
    /// A writer panicked while holding the in-memory store
    #[error("in-memory store is poisoned")]
    Poisoned,
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A store holding the single persisted student document
pub trait StateStore {
    /// Load the stored document, `None` if nothing has been saved
    ///
    /// # Errors
    /// Returns an error if the stored record cannot be read or parsed.
    fn load(&self) -> Result<Option<StudentData>, StorageError>;

    /// Replace the stored document
    ///
    /// # Errors
    /// Returns an error if the record cannot be written.
    fn save(&self, data: &StudentData) -> Result<(), StorageError>;

    /// Remove the stored document
    ///
    /// # Errors
    /// Returns an error if the record exists but cannot be removed.
    fn clear(&self) -> Result<(), StorageError>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the given file path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<StudentData>, StorageError> {
        if !self.path.exists() {
            crate::debug!("No student data at {}", self.path.display());
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        let data = parse_document(&text)?;
        crate::debug!("Loaded student data from {}", self.path.display());
        Ok(Some(data))
    }

    fn save(&self, data: &StudentData) -> Result<(), StorageError> {
        write_document(&self.path, data)?;
        crate::debug!("Saved student data to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
            crate::info!("Removed student data at {}", self.path.display());
        }
        Ok(())
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Option<StudentData>>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> Result<MutexGuard<'_, Option<StudentData>>, StorageError> {
        self.data.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<StudentData>, StorageError> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, data: &StudentData) -> Result<(), StorageError> {
        *self.slot()? = Some(data.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot()? = None;
        Ok(())
    }
}

/// Parse and validate a student data document
///
/// # Errors
/// Returns an error if the text is not JSON, is not an object, lacks a
/// `years` object, or does not match the student data schema.
pub fn parse_document(text: &str) -> Result<StudentData, StorageError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let Some(object) = value.as_object() else {
        return Err(StorageError::InvalidFormat(
            "expected a JSON object".to_string(),
        ));
    };
    if !object.get("years").is_some_and(serde_json::Value::is_object) {
        return Err(StorageError::MissingYears);
    }
    serde_json::from_value(value).map_err(|e| StorageError::InvalidFormat(e.to_string()))
}

/// Serialize a document as pretty JSON (2-space indent)
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_document(data: &StudentData) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(data)?)
}

fn write_document(path: &Path, data: &StudentData) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
    }
    fs::write(path, to_document(data)?).map_err(|e| StorageError::io(path, e))
}

/// Export file name for a date (`student-data-YYYY-MM-DD.json`)
#[must_use]
pub fn export_file_name(date: chrono::NaiveDate) -> String {
    format!("student-data-{}.json", date.format("%Y-%m-%d"))
}

/// Write a document into `dir` under today's export file name
///
/// Returns the path written.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn export_to(data: &StudentData, dir: &Path) -> Result<PathBuf, StorageError> {
    let path = dir.join(export_file_name(chrono::Local::now().date_naive()));
    write_document(&path, data)?;
    crate::info!("Exported student data to {}", path.display());
    Ok(path)
}

/// Export whatever the store currently holds
///
/// # Errors
/// Returns [`StorageError::NothingToExport`] if the store is empty, or any
/// load/write error.
pub fn export_data(store: &dyn StateStore, dir: &Path) -> Result<PathBuf, StorageError> {
    let data = store.load()?.ok_or(StorageError::NothingToExport)?;
    export_to(&data, dir)
}

/// Read and validate a document from a file
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid document.
pub fn import_from(path: &Path) -> Result<StudentData, StorageError> {
    let text = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    let data = parse_document(&text)?;
    crate::info!("Imported student data from {}", path.display());
    Ok(data)
}
