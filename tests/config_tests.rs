//! Configuration loading, editing and persistence

use grade_tracker::config::{Config, ConfigOverrides};
use grade_tracker::core::models::Year;
use std::fs;
use tempfile::TempDir;

const USER_CONFIG: &str = r#"
[logging]
level = "info"
file = "/tmp/gradetracker.log"
verbose = true

[storage]
data_file = "/tmp/student.json"

[paths]
exports_dir = "./exports"
reports_dir = "./reports"

[criteria.year2]
max_failures = 3
min_average = 4.5
max_deficit = 1.5
"#;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn compiled_defaults_are_complete() {
    let config = Config::from_defaults();

    for (key, value) in [
        ("level", &config.logging.level),
        ("data_file", &config.storage.data_file),
        ("exports_dir", &config.paths.exports_dir),
        ("reports_dir", &config.paths.reports_dir),
    ] {
        assert!(!value.is_empty(), "{key} has no default");
    }
    for year in Year::ALL {
        let criteria = config.criteria.for_year(year);
        assert_eq!(criteria.max_failures, 4);
        assert!(approx(criteria.min_average, 4.0));
        assert!(approx(criteria.max_deficit, 2.0));
    }
}

#[test]
fn user_file_is_read_section_by_section() {
    let config = Config::from_toml(USER_CONFIG).unwrap();

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/gradetracker.log");
    assert!(config.logging.verbose);
    assert_eq!(config.storage.data_file, "/tmp/student.json");
    assert_eq!(config.paths.reports_dir, "./reports");

    let year2 = config.criteria.for_year(Year::Second);
    assert_eq!(year2.max_failures, 3);
    assert!(approx(year2.min_average, 4.5));
    assert!(approx(year2.max_deficit, 1.5));
    assert_eq!(config.criteria.for_year(Year::Third).max_failures, 4);
}

#[test]
fn sparse_file_leaves_gaps_for_merge() {
    let config = Config::from_toml("[logging]\nlevel = \"error\"\n").unwrap();

    assert_eq!(config.logging.level, "error");
    assert!(config.logging.file.is_empty());
    assert!(config.storage.data_file.is_empty());
    assert!(!config.logging.verbose);
    assert!(approx(config.criteria.year1.min_average, 4.0));
}

#[test]
fn tracker_dir_variable_is_expanded() {
    let config = Config::from_toml(
        "[logging]\nfile = \"$GRADE_TRACKER/logs/run.log\"\n\n[storage]\ndata_file = \"$GRADE_TRACKER/data.json\"\n",
    )
    .unwrap();
    let dir = Config::get_tracker_dir().to_string_lossy().into_owned();

    assert!(config.logging.file.starts_with(&dir));
    assert!(config.logging.file.ends_with("run.log"));
    assert!(config.storage.data_file.starts_with(&dir));
    assert!(!config.storage.data_file.contains('$'));
}

#[test]
fn merge_upgrades_an_old_file_without_clobbering_it() {
    let mut config = Config::from_toml(
        "[logging]\nlevel = \"error\"\nfile = \"/var/log/grades.log\"\n\n[paths]\nexports_dir = \"\"\n",
    )
    .unwrap();
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/var/log/grades.log");
    assert_eq!(config.storage.data_file, defaults.storage.data_file);
    assert_eq!(config.paths.exports_dir, defaults.paths.exports_dir);

    // Second pass finds nothing to add
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn editing_values_by_key() {
    let mut config = Config::from_defaults();

    config.set("level", "debug").unwrap();
    config.set("verbose", "true").unwrap();
    config.set("reports-dir", "/srv/reports").unwrap();
    config.set("year3.min_average", "4.5").unwrap();

    assert_eq!(config.get("level").as_deref(), Some("debug"));
    assert_eq!(config.get("verbose").as_deref(), Some("true"));
    assert_eq!(config.get("reports_dir").as_deref(), Some("/srv/reports"));
    assert_eq!(config.get("criteria.year3.min_average").as_deref(), Some("4.5"));

    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("year3.min_average", "high").is_err());
    assert!(config.set("timezone", "UTC").is_err());
    assert!(config.get("timezone").is_none());
    assert!(config.get("year9.min_average").is_none());
}

#[test]
fn unset_restores_defaults() {
    let defaults = Config::from_defaults();
    let mut config = Config::from_toml(USER_CONFIG).unwrap();

    config.unset("level", &defaults).unwrap();
    config.unset("data_file", &defaults).unwrap();
    for field in ["max_failures", "min_average", "max_deficit"] {
        config.unset(&format!("year2.{field}"), &defaults).unwrap();
    }

    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.storage.data_file, defaults.storage.data_file);
    assert_eq!(config.criteria, defaults.criteria);
    assert!(config.unset("timezone", &defaults).is_err());
}

#[test]
fn serialized_config_reads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::from_toml(USER_CONFIG).unwrap();
    config.set("year1.max_failures", "2").unwrap();
    fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

    let reloaded = Config::from_toml(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(reloaded.logging.level, "info");
    assert_eq!(reloaded.storage.data_file, config.storage.data_file);
    assert_eq!(reloaded.criteria, config.criteria);
    assert_eq!(reloaded.criteria.year1.max_failures, 2);
}

#[test]
fn flags_override_for_one_run() {
    let mut config = Config::from_toml(USER_CONFIG).unwrap();
    config.apply_overrides(&ConfigOverrides {
        level: Some("warn".to_string()),
        data_file: Some("/mnt/usb/student.json".to_string()),
        verbose: Some(false),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.storage.data_file, "/mnt/usb/student.json");
    assert!(!config.logging.verbose);
    // Untouched values keep the file's settings
    assert_eq!(config.logging.file, "/tmp/gradetracker.log");
    assert_eq!(config.paths.exports_dir, "./exports");
}

#[test]
fn display_lists_every_section() {
    let shown = Config::from_defaults().to_string();

    for section in ["[logging]", "[storage]", "[paths]"] {
        assert!(shown.contains(section), "missing {section}");
    }
    for year in 1..=3 {
        assert!(shown.contains(&format!("[criteria.year{year}]")));
    }
    assert!(shown.contains("max_deficit"));
}

#[test]
fn config_file_lives_in_tracker_dir() {
    let path = Config::get_config_file_path();

    assert_eq!(path.parent(), Some(Config::get_tracker_dir().as_path()));
    let name = path.file_name().unwrap().to_string_lossy();
    assert!(name == "config.toml" || name == "dconfig.toml");
}
