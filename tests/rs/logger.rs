//! Logger behaviour seen from outside the crate

use grade_tracker::logger::{init_file_logging, set_level, set_level_from_str, Level};
use grade_tracker::{debug, error, info, warn};

#[test]
fn level_names_are_accepted_in_any_case() {
    for name in ["error", "WARN", "Warning", "info", " debug "] {
        assert!(set_level_from_str(name), "{name} rejected");
    }
}

#[test]
fn unknown_level_names_are_rejected() {
    for name in ["", "trace", "verbose"] {
        assert!(!set_level_from_str(name), "{name} accepted");
    }
}

#[test]
fn every_macro_formats_its_arguments() {
    set_level(Level::Debug);
    let subject = "math";
    info!("added grade to {subject}");
    warn!("{subject} has no grades");
    error!("could not save {}", "student-data.json");
    debug!("final grade {:.1}", 4.5);
}

#[cfg(feature = "file-logging")]
#[test]
fn log_file_receives_tagged_lines() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("logs").join("tracker.log");
    assert!(init_file_logging(&path));

    error!("grade file failed to load");
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("[ERROR] grade file failed to load"));
}

#[cfg(not(feature = "file-logging"))]
#[test]
fn log_file_is_refused_without_feature() {
    let dir = tempfile::TempDir::new().unwrap();
    assert!(!init_file_logging(&dir.path().join("tracker.log")));
}
