//! Engine configuration
//!
//! Every field has a default equal to the corresponding constant in
//! [`crate::constants`], so an empty TOML/JSON document is a valid config.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BLOCK_LONG_PRESS_SLOP_PX, DAY_DRAG_THRESHOLD_PX, EDGE_HIT_MOUSE_PX, EDGE_HIT_TOUCH_PX,
    HOUR_HEIGHT_PX, LANE_OVERLAP_PERCENT, LONG_PRESS_MS, MIN_BLOCK_HEIGHT_PX, MIN_BLOCK_MINUTES,
    MIN_DRAG_PREVIEW_HEIGHT_PX, SNAP_MINUTES, SYNTHETIC_MOUSE_GUARD_MS,
};
use crate::errors::{Result, WhenlyError};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub gesture: GestureConfig,
}

impl Config {
    /// Reject values the geometry and gesture code cannot work with.
    ///
    /// # Errors
    /// Returns `WhenlyError::Config` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.gesture.validate()
    }
}

/// Day grid geometry and interval rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub hour_height_px: f64,
    pub snap_minutes: u32,
    pub min_block_minutes: u32,
    pub min_block_height_px: f64,
    pub min_drag_preview_height_px: f64,
    pub lane_overlap_percent: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            hour_height_px: HOUR_HEIGHT_PX,
            snap_minutes: SNAP_MINUTES,
            min_block_minutes: MIN_BLOCK_MINUTES,
            min_block_height_px: MIN_BLOCK_HEIGHT_PX,
            min_drag_preview_height_px: MIN_DRAG_PREVIEW_HEIGHT_PX,
            lane_overlap_percent: LANE_OVERLAP_PERCENT,
        }
    }
}

impl GridConfig {
    /// Minutes of wall-clock time represented by one vertical pixel.
    pub fn minutes_per_pixel(&self) -> f64 {
        60.0 / self.hour_height_px
    }

    fn validate(&self) -> Result<()> {
        if !(self.hour_height_px > 0.0) {
            return Err(WhenlyError::Config(format!(
                "grid.hour_height_px must be positive, got {}",
                self.hour_height_px
            )));
        }
        if self.snap_minutes == 0 || 60 % self.snap_minutes != 0 {
            return Err(WhenlyError::Config(format!(
                "grid.snap_minutes must divide 60, got {}",
                self.snap_minutes
            )));
        }
        if self.min_block_minutes == 0 || self.min_block_minutes % self.snap_minutes != 0 {
            return Err(WhenlyError::Config(format!(
                "grid.min_block_minutes must be a positive multiple of {}, got {}",
                self.snap_minutes, self.min_block_minutes
            )));
        }
        if self.min_block_height_px < 0.0 || self.min_drag_preview_height_px < 0.0 {
            return Err(WhenlyError::Config("grid minimum heights must not be negative".into()));
        }
        if !(0.0..100.0).contains(&self.lane_overlap_percent) {
            return Err(WhenlyError::Config(format!(
                "grid.lane_overlap_percent must be within [0, 100), got {}",
                self.lane_overlap_percent
            )));
        }
        Ok(())
    }
}

/// Pointer gesture timing and slop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub long_press_ms: u64,
    pub day_drag_threshold_px: f64,
    pub block_long_press_slop_px: f64,
    pub edge_hit_mouse_px: f64,
    pub edge_hit_touch_px: f64,
    pub synthetic_mouse_guard_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_ms: LONG_PRESS_MS,
            day_drag_threshold_px: DAY_DRAG_THRESHOLD_PX,
            block_long_press_slop_px: BLOCK_LONG_PRESS_SLOP_PX,
            edge_hit_mouse_px: EDGE_HIT_MOUSE_PX,
            edge_hit_touch_px: EDGE_HIT_TOUCH_PX,
            synthetic_mouse_guard_ms: SYNTHETIC_MOUSE_GUARD_MS,
        }
    }
}

impl GestureConfig {
    fn validate(&self) -> Result<()> {
        if self.long_press_ms == 0 {
            return Err(WhenlyError::Config("gesture.long_press_ms must be positive".into()));
        }
        let slops = [
            ("day_drag_threshold_px", self.day_drag_threshold_px),
            ("block_long_press_slop_px", self.block_long_press_slop_px),
            ("edge_hit_mouse_px", self.edge_hit_mouse_px),
            ("edge_hit_touch_px", self.edge_hit_touch_px),
        ];
        for (name, value) in slops {
            if !(value > 0.0) {
                return Err(WhenlyError::Config(format!(
                    "gesture.{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}
