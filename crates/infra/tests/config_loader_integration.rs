//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! feeding it into the engine.

use std::io::Write;

use chrono::NaiveDate;
use tempfile::Builder;
use whenly_core::DayGrid;
use whenly_domain::{TimeWindow, WhenlyError};
use whenly_infra::config;

#[test]
fn test_loaded_grid_config_drives_geometry() {
    let mut file = Builder::new().suffix(".toml").tempfile().expect("Failed to create temp file");
    file.write_all(b"[grid]\nhour_height_px = 120.0\n").expect("Failed to write to temp file");

    let loaded = config::load_from_file(Some(file.path().to_path_buf())).expect("config should load");
    loaded.validate().expect("config should validate");

    let day = NaiveDate::from_ymd_opt(2024, 9, 3).expect("valid date");
    let grid = DayGrid::new(day, &TimeWindow::default(), loaded.grid.clone());
    // 14 hours at 120 px.
    assert_eq!(grid.height(), 1680.0);
    assert_eq!(grid.y_to_time(120.0), day.and_hms_opt(9, 0, 0).expect("valid time"));
}

#[test]
fn test_invalid_values_fail_validation() {
    let mut file = Builder::new().suffix(".json").tempfile().expect("Failed to create temp file");
    file.write_all(br#"{ "grid": { "snap_minutes": 25 } }"#).expect("Failed to write to temp file");

    let loaded = config::load_from_file(Some(file.path().to_path_buf())).expect("config should parse");
    assert!(matches!(loaded.validate(), Err(WhenlyError::Config(_))));
}

#[test]
fn test_empty_file_yields_defaults() {
    let file = Builder::new().suffix(".toml").tempfile().expect("Failed to create temp file");

    let loaded = config::load_from_file(Some(file.path().to_path_buf())).expect("config should load");
    assert_eq!(loaded, whenly_domain::Config::default());
}
