//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use tallyline_domain::{PeriodGrouping, TallylineError};
use tallyline_infra::config;
use tempfile::NamedTempFile;

fn create_test_config_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    file
}

#[test]
fn test_load_config_from_json_file() {
    let file = create_test_config_file(
        ".json",
        r#"{
            "report": {
                "max_window_days": 31,
                "default_grouping": "week",
                "timezone": "Europe/Berlin",
                "min_gap_minutes": 5
            },
            "logging": { "level": "debug", "json": true }
        }"#,
    );

    let config = config::load_from_file(Some(file.path().to_path_buf())).expect("Failed to load JSON config");

    assert_eq!(config.report.max_window_days, 31);
    assert_eq!(config.report.default_grouping, PeriodGrouping::Week);
    assert_eq!(config.report.timezone, "Europe/Berlin");
    assert_eq!(config.report.min_gap_minutes, 5);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
}

#[test]
fn test_load_config_from_toml_file() {
    let file = create_test_config_file(
        ".toml",
        r#"
[report]
max_window_days = 90
default_grouping = "month"
timezone = "America/New_York"
"#,
    );

    let config = config::load_from_file(Some(file.path().to_path_buf())).expect("Failed to load TOML config");

    assert_eq!(config.report.max_window_days, 90);
    assert_eq!(config.report.default_grouping, PeriodGrouping::Month);
    assert_eq!(config.report.timezone, "America/New_York");
    // omitted fields and sections keep their defaults
    assert_eq!(config.report.min_gap_minutes, 1);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
}

#[test]
fn test_load_config_rejects_unknown_timezone() {
    let file = create_test_config_file(".json", r#"{ "report": { "timezone": "Mars/Olympus" } }"#);

    let err = config::load_from_file(Some(file.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, TallylineError::Config(_)));
}

#[test]
fn test_load_config_rejects_zero_window() {
    let file = create_test_config_file(".toml", "[report]\nmax_window_days = 0\n");

    let err = config::load_from_file(Some(file.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, TallylineError::Config(_)));
}

#[test]
fn test_load_config_invalid_json() {
    let file = create_test_config_file(".json", "{ report: ");

    let err = config::load_from_file(Some(file.path().to_path_buf())).unwrap_err();
    assert!(err.to_string().contains("Invalid JSON format"));
}

#[test]
fn test_load_config_unsupported_extension() {
    let file = create_test_config_file(".yaml", "report: {}");

    let err = config::load_from_file(Some(file.path().to_path_buf())).unwrap_err();
    assert!(err.to_string().contains("Unsupported config format"));
}

#[test]
fn test_load_config_missing_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = config::load_from_file(Some(dir.path().join("absent.json"))).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}
