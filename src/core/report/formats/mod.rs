//! Report format implementations
//!
//! Provides reporters for plain text, Markdown, HTML and JSON output.

pub mod html;
pub mod json;
pub mod markdown;
pub mod text;

pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use text::TextReporter;

use super::{CriterionLine, ReportContext, ReportGenerator, SubjectRow};
use std::fmt;
use std::str::FromStr;

/// Subject line as shown by the templated reporters
pub(crate) struct RowView {
    pub name: String,
    pub grade: String,
    pub count: usize,
    pub failing: bool,
    pub member: bool,
}

impl RowView {
    fn new(row: &SubjectRow, member: bool) -> Self {
        Self {
            name: row.name.clone(),
            grade: row.display_grade(),
            count: row.grade_count,
            failing: row.is_failing(),
            member,
        }
    }
}

/// Template-ready values shared by the Markdown and HTML reporters
pub(crate) struct ReportView {
    pub student: String,
    pub division: String,
    pub year: u8,
    pub direction: String,
    pub has_direction: bool,
    pub headline: &'static str,
    pub has_grades: bool,
    pub passing: bool,
    pub criteria: Vec<CriterionLine>,
    pub rows: Vec<RowView>,
}

impl ReportView {
    pub(crate) fn from_context(ctx: &ReportContext) -> Self {
        let direction = ctx.direction_name().unwrap_or_default();
        Self {
            student: ctx.student_name().to_string(),
            division: ctx.division(),
            year: ctx.year.number(),
            direction: direction.to_string(),
            has_direction: !direction.is_empty(),
            headline: ctx.headline(),
            has_grades: ctx.status.has_grades,
            passing: ctx.status.is_passing,
            criteria: ctx.criterion_lines(),
            rows: ctx
                .subjects
                .iter()
                .flat_map(|row| {
                    std::iter::once(RowView::new(row, false))
                        .chain(row.members.iter().map(|m| RowView::new(m, true)))
                })
                .collect(),
        }
    }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain text for the terminal
    Text,
    /// Markdown tables
    Markdown,
    /// Self-contained HTML page
    Html,
    /// Machine-readable JSON
    Json,
}

impl ReportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "md" | "markdown" => Ok(Self::Markdown),
            "html" | "htm" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Markdown => write!(f, "markdown"),
            Self::Html => write!(f, "html"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Reporter for a format
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Text => Box::new(TextReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
