//! Application constants
//!
//! Centralized location for the domain-level constants the gesture engine is
//! calibrated against. Runtime-tunable values are mirrored in
//! [`crate::config`] with these as defaults.

// Grid geometry
pub const HOUR_HEIGHT_PX: f64 = 60.0;
pub const MIN_BLOCK_HEIGHT_PX: f64 = 20.0;
pub const MIN_DRAG_PREVIEW_HEIGHT_PX: f64 = 15.0;
pub const BLOCK_LABEL_MIN_HEIGHT_PX: f64 = 30.0;
pub const LANE_OVERLAP_PERCENT: f64 = 20.0;

// Interval rules
pub const SNAP_MINUTES: u32 = 15;
pub const MIN_BLOCK_MINUTES: u32 = 15;

// Gesture timing and slop
pub const LONG_PRESS_MS: u64 = 500;
pub const DAY_DRAG_THRESHOLD_PX: f64 = 15.0;
pub const BLOCK_LONG_PRESS_SLOP_PX: f64 = 10.0;
pub const EDGE_HIT_MOUSE_PX: f64 = 8.0;
pub const EDGE_HIT_TOUCH_PX: f64 = 12.0;
pub const SYNTHETIC_MOUSE_GUARD_MS: u64 = 500;

// Event defaults
pub const DEFAULT_TIME_RANGE_START: &str = "08:00";
pub const DEFAULT_TIME_RANGE_END: &str = "22:00";
pub const DEFAULT_PARTICIPANT_COLOR: &str = "#3b82f6";
pub const MONTH_CELL_MAX_DOTS: usize = 4;

// Finalize picker
pub const FINALIZE_STEP_MINUTES: u32 = 30;
pub const FINALIZE_DEFAULT_START: &str = "09:00";
pub const FINALIZE_DEFAULT_END: &str = "10:00";

// Dialog validation messages
pub const MSG_END_BEFORE_START: &str = "End time must be after start time";
pub const MSG_MIN_DURATION: &str = "Minimum duration is 15 minutes";
pub const MSG_OVERLAP: &str = "This time overlaps with an existing block";
pub const MSG_PICK_DATE: &str = "Pick a date";
