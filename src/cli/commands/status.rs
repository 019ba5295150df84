//! Promotion status command

use super::Session;
use crate::args::StatusFormat;
use grade_tracker::config::Config;
use grade_tracker::core::models::Year;
use grade_tracker::core::report::{ReportContext, ReportGenerator, TextReporter};

/// Print the promotion status of a year
pub fn run(config: &Config, year: Option<Year>, format: StatusFormat) -> Result<(), String> {
    let session = Session::open_onboarded(config)?;
    let year = session.year(year);
    let ctx = ReportContext::build(&session.data, year, &config.criteria);

    let output = match format {
        StatusFormat::Text => TextReporter::new()
            .render(&ctx)
            .map_err(|e| format!("✗ Failed to render status: {e}"))?,
        StatusFormat::Json => serde_json::to_string_pretty(&ctx.status)
            .map_err(|e| format!("✗ Failed to serialize status: {e}"))?,
    };
    println!("{output}");
    Ok(())
}
