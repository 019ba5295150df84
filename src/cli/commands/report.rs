//! Report command handler
//!
//! Writes a year's report in Markdown, HTML, JSON or plain text.

use super::Session;
use grade_tracker::config::Config;
use grade_tracker::core::models::Year;
use grade_tracker::core::report::{reporter_for, ReportContext, ReportFormat, ReportGenerator};
use std::path::{Path, PathBuf};

/// Default report path inside the reports directory
fn default_output(config: &Config, year: Year, format: ReportFormat) -> PathBuf {
    PathBuf::from(&config.paths.reports_dir)
        .join(format!("grade-report-year{year}.{}", format.extension()))
}

/// Generate a report file
pub fn run(
    config: &Config,
    year: Option<Year>,
    format_str: &str,
    output: Option<&Path>,
) -> Result<(), String> {
    let format: ReportFormat = format_str
        .parse()
        .map_err(|e| format!("✗ {e}. Use: markdown, html, json or text"))?;

    let session = Session::open_onboarded(config)?;
    let year = session.year(year);
    let ctx = ReportContext::build(&session.data, year, &config.criteria);

    let output_path = output.map_or_else(|| default_output(config, year, format), Path::to_path_buf);
    reporter_for(format)
        .generate(&ctx, &output_path)
        .map_err(|e| format!("✗ Failed to generate {format} report: {e}"))?;

    println!("✓ Report generated: {}", output_path.display());
    println!("  Year {year}: {}", ctx.headline());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        let mut config = Config::default();
        config.paths.reports_dir = "/tmp/reports".to_string();
        let path = default_output(&config, Year::Second, ReportFormat::Html);
        assert_eq!(path, PathBuf::from("/tmp/reports/grade-report-year2.html"));
    }
}
