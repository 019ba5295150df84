//! Markdown report generator
//!
//! Renders the promotion verdict and subject table as Markdown, suitable for
//! viewing on GitHub, GitLab or in VS Code.

use super::ReportView;
use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;

#[derive(Template)]
#[template(path = "report.md", escape = "none")]
struct MarkdownTemplate {
    view: ReportView,
}

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let template = MarkdownTemplate {
            view: ReportView::from_context(ctx),
        };
        Ok(template.render()?)
    }
}
