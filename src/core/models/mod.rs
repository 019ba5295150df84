//! Data models for `GradeTracker`

pub mod grade;
pub mod student;
pub mod subject;

pub use grade::{Grade, GradeInput, GradePatch};
pub use student::{Division, StudentData, StudentInfo, Year, YearData, Years};
pub use subject::{CombinedSubject, CurriculumEntity, Subject};
