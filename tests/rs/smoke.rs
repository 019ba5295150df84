//! Integration smoke tests for `grade_tracker`

use grade_tracker::config::Config;
use grade_tracker::core::curriculum::initialize_student_data;
use grade_tracker::core::gradebook::{add_grade, set_student_info, year_status};
use grade_tracker::core::models::{Division, GradeInput, Year};
use grade_tracker::core::report::{reporter_for, ReportContext, ReportFormat, ReportGenerator};
use grade_tracker::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn onboard_grade_and_report() {
    let config = Config::from_defaults();
    let mut data = initialize_student_data();
    set_student_info(&mut data, "Noah", Division::Fms).unwrap();
    add_grade(&mut data, Year::First, "biology", GradeInput::new(4.5)).unwrap();

    let status = year_status(&data, Year::First, &config.criteria);
    assert!(status.has_grades);
    assert!(status.is_passing);

    let ctx = ReportContext::build(&data, Year::First, &config.criteria);
    for format in [
        ReportFormat::Text,
        ReportFormat::Markdown,
        ReportFormat::Html,
        ReportFormat::Json,
    ] {
        let out = reporter_for(format).render(&ctx).unwrap();
        assert!(out.contains("Noah"), "{format} report misses the student name");
    }
}
