//! Grade and curriculum mutations on [`StudentData`]
//!
//! Every mutation first materializes the year's effective subject list (see
//! [`subjects_for_year`]) so that edits land on exactly what gets evaluated.

use crate::core::criteria::CriteriaTable;
use crate::core::curriculum::{find_direction, subjects_for_year};
use crate::core::models::{
    CurriculumEntity, Division, Grade, GradeInput, GradePatch, StudentData, StudentInfo, Subject,
    Year,
};
use crate::core::promotion::{evaluate, PromotionStatus};
use thiserror::Error;

/// Errors raised by grade input validation and gradebook mutations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradebookError {
    /// Grade value outside the 1-6 scale
    #[error("invalid grade value {0}: must be between 1 and 6")]
    InvalidValue(f64),
    /// Weight not strictly positive
    #[error("invalid weight {0}: must be greater than 0")]
    InvalidWeight(f64),
    /// No subject with that id in the year
    #[error("no subject '{subject}' in year {year}")]
    UnknownSubject {
        /// Requested subject id
        subject: String,
        /// Year searched
        year: Year,
    },
    /// Grades go on members, not on the combined subject itself
    #[error("'{0}' is a combined subject; add the grade to one of its members")]
    CombinedSubject(String),
    /// No grade with that id in the year
    #[error("no grade '{grade}' in year {year}")]
    UnknownGrade {
        /// Requested grade id
        grade: String,
        /// Year searched
        year: Year,
    },
    /// No direction with that id
    #[error("unknown direction '{0}'")]
    UnknownDirection(String),
    /// Onboarding name was blank
    #[error("student name must not be empty")]
    EmptyName,
}

/// Complete onboarding
///
/// # Errors
/// Returns an error if the name is blank.
pub fn set_student_info(
    data: &mut StudentData,
    name: &str,
    division: Division,
) -> Result<(), GradebookError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GradebookError::EmptyName);
    }
    data.student_info = Some(StudentInfo {
        name: name.to_string(),
        division,
    });
    Ok(())
}

/// Switch the active year
pub fn set_current_year(data: &mut StudentData, year: Year) {
    data.current_year = year;
}

/// Choose the year-3 direction
///
/// Year 3 is reset to the direction's ungraded template, dropping any grades
/// entered under the previous direction.
///
/// # Errors
/// Returns an error if the direction id is unknown.
pub fn select_direction(data: &mut StudentData, direction_id: &str) -> Result<(), GradebookError> {
    let direction = find_direction(direction_id)
        .ok_or_else(|| GradebookError::UnknownDirection(direction_id.to_string()))?;

    data.year3_direction = Some(direction.id.to_string());
    data.years.third.subjects = direction
        .subjects
        .iter()
        .map(CurriculumEntity::without_grades)
        .collect();
    Ok(())
}

/// Add a grade to a subject (a top-level subject or a combined member)
///
/// Returns the new grade's id.
///
/// # Errors
/// Returns an error if the input is invalid, the subject does not exist, or
/// the id names a combined subject.
pub fn add_grade(
    data: &mut StudentData,
    year: Year,
    subject_id: &str,
    input: GradeInput,
) -> Result<String, GradebookError> {
    let grade = Grade::new(input)?;
    let id = grade.id.clone();
    let subject = leaf_subject_mut(data, year, subject_id)?;
    subject.grades.push(grade);
    Ok(id)
}

/// Edit an existing grade in place
///
/// # Errors
/// Returns an error if the grade does not exist or the merged fields are invalid.
pub fn edit_grade(
    data: &mut StudentData,
    year: Year,
    grade_id: &str,
    patch: GradePatch,
) -> Result<(), GradebookError> {
    let grade = materialize(data, year)
        .iter_mut()
        .flat_map(leaves_mut)
        .flat_map(|s| s.grades.iter_mut())
        .find(|g| g.id == grade_id)
        .ok_or_else(|| GradebookError::UnknownGrade {
            grade: grade_id.to_string(),
            year,
        })?;
    grade.apply(patch)
}

/// Delete a grade
///
/// Returns the removed grade.
///
/// # Errors
/// Returns an error if the grade does not exist.
pub fn delete_grade(
    data: &mut StudentData,
    year: Year,
    grade_id: &str,
) -> Result<Grade, GradebookError> {
    for subject in materialize(data, year).iter_mut().flat_map(leaves_mut) {
        if let Some(pos) = subject.grades.iter().position(|g| g.id == grade_id) {
            return Ok(subject.grades.remove(pos));
        }
    }
    Err(GradebookError::UnknownGrade {
        grade: grade_id.to_string(),
        year,
    })
}

/// Find a grade and the name of the subject holding it
#[must_use]
pub fn find_grade(data: &StudentData, year: Year, grade_id: &str) -> Option<(String, Grade)> {
    subjects_for_year(data, year).iter().find_map(|entity| {
        entity
            .leaves()
            .find_map(|s| s.grade(grade_id).map(|g| (s.name.clone(), g.clone())))
    })
}

/// Evaluate a year's subjects against that year's criteria
#[must_use]
pub fn year_status(data: &StudentData, year: Year, table: &CriteriaTable) -> PromotionStatus {
    evaluate(&subjects_for_year(data, year), &table.for_year(year))
}

fn materialize(data: &mut StudentData, year: Year) -> &mut Vec<CurriculumEntity> {
    let effective = subjects_for_year(data, year);
    let stored = &mut data.years.get_mut(year).subjects;
    *stored = effective;
    stored
}

fn leaf_subject_mut<'a>(
    data: &'a mut StudentData,
    year: Year,
    subject_id: &str,
) -> Result<&'a mut Subject, GradebookError> {
    let subjects = materialize(data, year);

    if subjects
        .iter()
        .any(|e| matches!(e, CurriculumEntity::Combined(c) if c.id == subject_id))
    {
        return Err(GradebookError::CombinedSubject(subject_id.to_string()));
    }

    subjects
        .iter_mut()
        .find_map(|e| e.leaf_mut(subject_id))
        .ok_or_else(|| GradebookError::UnknownSubject {
            subject: subject_id.to_string(),
            year,
        })
}

fn leaves_mut(entity: &mut CurriculumEntity) -> Box<dyn Iterator<Item = &mut Subject> + '_> {
    match entity {
        CurriculumEntity::Subject(s) => Box::new(std::iter::once(s)),
        CurriculumEntity::Combined(c) => Box::new(c.subjects.iter_mut()),
    }
}
