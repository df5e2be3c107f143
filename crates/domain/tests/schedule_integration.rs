//! Integration tests for event scheduling types
//!
//! Covers the wire shapes the UI exchanges and how an event's window and
//! candidate dates combine into concrete day intervals.

use chrono::{NaiveDate, NaiveTime};
use whenly_domain::{
    generate_time_options, AvailabilityBlock, BlockId, Config, EventId, EventSchedule,
    ParticipantId, TimeInterval, TimeWindow, ValidDates,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
}

fn sample_event(valid_dates: ValidDates) -> EventSchedule {
    EventSchedule {
        id: EventId::from("evt-1"),
        slug: "swift-aurora-x1y2".into(),
        title: "Team sync".into(),
        valid_dates,
        time_window: TimeWindow::parse(Some("09:00"), Some("17:30")).unwrap(),
        finalized: None,
    }
}

/// Validates `EventSchedule` behavior for the JSON round-trip scenario.
///
/// Assertions:
/// - Range dates serialize with a `mode` tag
/// - Missing `time_window` and `finalized` fall back to defaults
#[test]
fn test_event_schedule_wire_shape() {
    let event = sample_event(ValidDates::Range { start: day(2), end: day(6) });
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["valid_dates"]["mode"], "range");
    assert_eq!(json["valid_dates"]["start"], "2024-09-02");

    let minimal = serde_json::json!({
        "id": "evt-2",
        "slug": "calm-river-0000",
        "title": "Lunch",
        "valid_dates": { "mode": "specific", "dates": ["2024-09-10", "2024-09-03"] }
    });
    let parsed: EventSchedule = serde_json::from_value(minimal).unwrap();
    assert_eq!(parsed.time_window, TimeWindow::default());
    assert!(!parsed.is_finalized());
    assert!(parsed.valid_dates.contains(day(3)));
    assert!(!parsed.valid_dates.contains(day(4)));
}

/// Validates `TimeWindow::on` behavior for the mark-all-day scenario.
///
/// Assertions:
/// - The full window (including minutes) is applied to the day
/// - Grid bounds are truncated to whole hours
/// - Picker options stop at the grid's last hour
#[test]
fn test_window_applied_to_day() {
    let event = sample_event(ValidDates::specific([day(12)]));
    let full = event.time_window.on(day(12));
    assert_eq!(full.start, day(12).and_hms_opt(9, 0, 0).unwrap());
    assert_eq!(full.end, day(12).and_hms_opt(17, 30, 0).unwrap());

    let grid = event.time_window.grid_bounds(day(12));
    assert_eq!(grid.end, day(12).and_hms_opt(17, 0, 0).unwrap());

    let options = generate_time_options(event.time_window.start_hour(), event.time_window.end_hour());
    assert_eq!(options.last(), Some(&NaiveTime::from_hms_opt(17, 0, 0).unwrap()));
}

/// Validates `AvailabilityBlock` behavior for the storage row scenario.
///
/// Assertions:
/// - camelCase fields with a flattened interval deserialize
/// - The block's day is the day it starts on
#[test]
fn test_block_from_storage_row() {
    let row = serde_json::json!({
        "id": "blk-9",
        "participantId": "p-1",
        "participantName": "Sam",
        "participantColor": null,
        "start": "2024-09-12T23:00:00",
        "end": "2024-09-13T00:30:00"
    });
    let block: AvailabilityBlock = serde_json::from_value(row).unwrap();
    assert_eq!(block.id, BlockId::from("blk-9"));
    assert_eq!(block.participant_id, ParticipantId::from("p-1"));
    assert_eq!(block.interval.day(), day(12));
    assert_eq!(block.color(), "#3b82f6");
    assert_eq!(
        block.interval,
        TimeInterval::from_minutes(day(12).and_hms_opt(23, 0, 0).unwrap(), 90).unwrap()
    );
}

/// Validates `Config` behavior for the partial document scenario.
///
/// Assertions:
/// - Unspecified sections keep defaults
#[test]
fn test_config_from_json_document() {
    let config: Config =
        serde_json::from_str(r#"{"grid": {"hour_height_px": 80.0}}"#).unwrap();
    assert!((config.grid.minutes_per_pixel() - 0.75).abs() < 1e-9);
    assert_eq!(config.gesture.long_press_ms, 500);
    assert!(config.validate().is_ok());
}
