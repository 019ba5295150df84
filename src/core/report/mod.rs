//! Report generation for a year's promotion status
//!
//! Renders the subject list and the promotion verdict in several formats
//! (plain text, Markdown, HTML, JSON).

pub mod formats;

use crate::core::aggregate::{final_grade, has_any_grade, subject_final_grade};
use crate::core::criteria::CriteriaTable;
use crate::core::curriculum::{find_direction, subjects_for_year};
use crate::core::models::{CurriculumEntity, StudentData, Subject, Year};
use crate::core::promotion::{evaluate, PromotionStatus};
use serde::Serialize;
use std::error::Error;
use std::path::Path;

pub use formats::{
    reporter_for, HtmlReporter, JsonReporter, MarkdownReporter, ReportFormat, TextReporter,
};

/// Placeholder shown instead of a final grade for ungraded subjects
pub const NO_GRADE: &str = "—";

/// One subject line in a report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRow {
    /// Subject id
    pub id: String,
    /// Display name
    pub name: String,
    /// Final grade, `None` when ungraded
    pub final_grade: Option<f64>,
    /// Number of grades entered
    pub grade_count: usize,
    /// Member rows for a combined subject
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<SubjectRow>,
}

impl SubjectRow {
    /// Build a row (with member rows for combined subjects)
    #[must_use]
    pub fn from_entity(entity: &CurriculumEntity) -> Self {
        let members = match entity {
            CurriculumEntity::Subject(_) => Vec::new(),
            CurriculumEntity::Combined(c) => c.subjects.iter().map(Self::from_subject).collect(),
        };
        Self {
            id: entity.id().to_string(),
            name: entity.name().to_string(),
            final_grade: has_any_grade(entity).then(|| final_grade(entity)),
            grade_count: entity.grade_count(),
            members,
        }
    }

    fn from_subject(subject: &Subject) -> Self {
        Self {
            id: subject.id.clone(),
            name: subject.name.clone(),
            final_grade: (!subject.grades.is_empty()).then(|| subject_final_grade(subject)),
            grade_count: subject.grades.len(),
            members: Vec::new(),
        }
    }

    /// Final grade with one decimal, or [`NO_GRADE`]
    #[must_use]
    pub fn display_grade(&self) -> String {
        self.final_grade
            .map_or_else(|| NO_GRADE.to_string(), |g| format!("{g:.1}"))
    }

    /// Whether the final grade is below the passing mark
    #[must_use]
    pub fn is_failing(&self) -> bool {
        self.final_grade
            .is_some_and(|g| g > 0.0 && g < crate::core::promotion::PASSING_GRADE)
    }
}

/// Data needed to render a report
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Student document
    pub data: &'a StudentData,
    /// Year reported on
    pub year: Year,
    /// Subject rows in curriculum order
    pub subjects: Vec<SubjectRow>,
    /// Promotion verdict for the year
    pub status: PromotionStatus,
}

impl<'a> ReportContext<'a> {
    /// Evaluate a year and collect its report rows
    #[must_use]
    pub fn build(data: &'a StudentData, year: Year, criteria: &CriteriaTable) -> Self {
        let entities = subjects_for_year(data, year);
        let status = evaluate(&entities, &criteria.for_year(year));
        Self {
            data,
            year,
            subjects: entities.iter().map(SubjectRow::from_entity).collect(),
            status,
        }
    }

    /// Student name, empty before onboarding
    #[must_use]
    pub fn student_name(&self) -> &str {
        self.data
            .student_info
            .as_ref()
            .map_or("", |info| info.name.as_str())
    }

    /// Division as text, empty before onboarding
    #[must_use]
    pub fn division(&self) -> String {
        self.data
            .student_info
            .as_ref()
            .map_or_else(String::new, |info| info.division.to_string())
    }

    /// Name of the chosen direction when reporting on year 3
    #[must_use]
    pub fn direction_name(&self) -> Option<&'static str> {
        if self.year != Year::Third {
            return None;
        }
        self.data
            .year3_direction
            .as_deref()
            .and_then(find_direction)
            .map(|d| d.name)
    }

    /// Headline of the verdict
    #[must_use]
    pub const fn headline(&self) -> &'static str {
        if !self.status.has_grades {
            "No grades yet"
        } else if self.status.is_passing {
            "Passing"
        } else {
            "Not passing"
        }
    }

    /// Criterion lines: label, value, threshold, passed
    #[must_use]
    pub fn criterion_lines(&self) -> Vec<CriterionLine> {
        let c = &self.status.criteria;
        vec![
            CriterionLine {
                label: "Failures",
                value: format!("{} / {}", c.failures.count, c.failures.max),
                threshold: "final grades below 4".to_string(),
                passed: c.failures.passed,
            },
            CriterionLine {
                label: "Average",
                value: format!("{:.1}", c.average.value),
                threshold: format!("minimum: {}", c.average.min),
                passed: c.average.passed,
            },
            CriterionLine {
                label: "Deficit",
                value: format!("{:.2}", c.deficit.value),
                threshold: format!("maximum: {}", c.deficit.max),
                passed: c.deficit.passed,
            },
        ]
    }
}

/// A rendered criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionLine {
    /// Criterion name
    pub label: &'static str,
    /// Formatted computed value
    pub value: String,
    /// Threshold description
    pub threshold: String,
    /// Whether the criterion passed
    pub passed: bool,
}

impl CriterionLine {
    /// Check mark for the result
    #[must_use]
    pub const fn mark(&self) -> &'static str {
        if self.passed {
            "✓"
        } else {
            "✗"
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;

    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output_path, content)?;
        crate::info!("Report written to {}", output_path.display());
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_data;
    use super::*;

    #[test]
    fn test_context_rows() {
        let data = sample_data();
        let ctx = ReportContext::build(&data, Year::First, &CriteriaTable::default());

        assert_eq!(ctx.subjects.len(), 8);
        let math = ctx.subjects.iter().find(|r| r.id == "math").unwrap();
        assert_eq!(math.display_grade(), "5.0");
        let geo = ctx.subjects.iter().find(|r| r.id == "geography").unwrap();
        assert_eq!(geo.display_grade(), NO_GRADE);
        assert!(!geo.is_failing());
        let french = ctx.subjects.iter().find(|r| r.id == "french").unwrap();
        assert!(french.is_failing());

        assert_eq!(ctx.headline(), "Passing");
        assert_eq!(ctx.student_name(), "Lea");
        assert_eq!(ctx.division(), "Gymnasium");
        assert!(ctx.direction_name().is_none());
    }

    #[test]
    fn test_combined_rows_have_members() {
        let data = sample_data();
        let ctx = ReportContext::build(&data, Year::Third, &CriteriaTable::default());

        assert_eq!(ctx.direction_name(), Some("Direction C"));
        let languages = ctx.subjects.iter().find(|r| r.id == "languages").unwrap();
        assert_eq!(languages.members.len(), 2);
        assert_eq!(languages.display_grade(), "5.5");
        assert_eq!(languages.members[1].display_grade(), NO_GRADE);
    }

    #[test]
    fn test_headline_without_grades() {
        let data = sample_data();
        let ctx = ReportContext::build(&data, Year::Second, &CriteriaTable::default());
        assert_eq!(ctx.headline(), "No grades yet");
    }

    #[test]
    fn test_criterion_lines() {
        let data = sample_data();
        let ctx = ReportContext::build(&data, Year::First, &CriteriaTable::default());
        let lines = ctx.criterion_lines();

        assert_eq!(lines[0].value, "1 / 4");
        assert_eq!(lines[1].value, "4.5");
        assert_eq!(lines[2].value, "0.50");
        assert!(lines.iter().all(|l| l.mark() == "✓"));
    }
}
