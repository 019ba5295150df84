//! Core module: grade aggregation, promotion evaluation and their collaborators

pub mod aggregate;
pub mod config;
pub mod criteria;
pub mod curriculum;
pub mod gradebook;
pub mod models;
pub mod promotion;
pub mod report;
pub mod storage;

/// Returns the current version of the `GradeTracker` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
