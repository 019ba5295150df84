//! JSON report generator

use crate::core::promotion::PromotionStatus;
use crate::core::report::{ReportContext, ReportGenerator, SubjectRow};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    year: u8,
    student: &'a str,
    division: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<&'static str>,
    status: &'a PromotionStatus,
    subjects: &'a [SubjectRow],
}

/// Machine-readable reporter
pub struct JsonReporter;

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let report = JsonReport {
            year: ctx.year.number(),
            student: ctx.student_name(),
            division: ctx.division(),
            direction: ctx.direction_name(),
            status: &ctx.status,
            subjects: &ctx.subjects,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}
