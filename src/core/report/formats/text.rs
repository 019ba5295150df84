//! Plain-text report for terminal output

use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Plain-text reporter
pub struct TextReporter;

impl TextReporter {
    /// Create a new text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let mut out = String::new();

        let name = ctx.student_name();
        if !name.is_empty() {
            writeln!(out, "{name} • {}", ctx.division())?;
        }
        write!(out, "Year {}", ctx.year)?;
        if let Some(direction) = ctx.direction_name() {
            write!(out, " ({direction})")?;
        }
        writeln!(out)?;

        writeln!(out, "\n=== {} ===\n", ctx.headline())?;
        if ctx.status.has_grades {
            for line in ctx.criterion_lines() {
                writeln!(
                    out,
                    "  {} {:<9} {:>6}   ({})",
                    line.mark(),
                    line.label,
                    line.value,
                    line.threshold
                )?;
            }
        }

        writeln!(out, "\n=== Subjects ===\n")?;
        if ctx.subjects.is_empty() {
            writeln!(out, "  No subjects available")?;
        }
        for row in &ctx.subjects {
            writeln!(
                out,
                "  {:<20} {:>4}   ({} grades)",
                row.name,
                row.display_grade(),
                row.grade_count
            )?;
            for member in &row.members {
                writeln!(
                    out,
                    "    - {:<16} {:>4}   ({} grades)",
                    member.name,
                    member.display_grade(),
                    member.grade_count
                )?;
            }
        }

        Ok(out)
    }
}
