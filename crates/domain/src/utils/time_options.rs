//! Time picker options and grid labels

use chrono::NaiveTime;

use crate::constants::{FINALIZE_STEP_MINUTES, SNAP_MINUTES};

/// Picker options every 15 minutes from `start_hour:00` up to and including
/// `end_hour:00`.
pub fn generate_time_options(start_hour: u32, end_hour: u32) -> Vec<NaiveTime> {
    let end_hour = end_hour.min(23);
    let mut options = Vec::new();
    for hour in start_hour..=end_hour {
        for minute in (0..60).step_by(SNAP_MINUTES as usize) {
            if hour == end_hour && minute > 0 {
                break;
            }
            if let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) {
                options.push(time);
            }
        }
    }
    options
}

/// Finalize picker options: every half hour of the day, `00:00` to `23:30`.
pub fn finalize_time_options() -> Vec<NaiveTime> {
    (0..24 * 60)
        .step_by(FINALIZE_STEP_MINUTES as usize)
        .filter_map(|minutes| NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0))
        .collect()
}

/// Block label, e.g. `9:15 AM`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Hour label, e.g. `9 AM`.
pub fn format_time_short(time: NaiveTime) -> String {
    time.format("%-I %p").to_string()
}
