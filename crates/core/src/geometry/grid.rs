//! Pixel ↔ time mapping for one day column
//!
//! Y values passed in are client coordinates; the grid's own top edge
//! (`top`) is subtracted internally, matching how pointer events arrive.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use whenly_domain::constants::BLOCK_LABEL_MIN_HEIGHT_PX;
use whenly_domain::{format_time_short, AvailabilityBlock, BlockId, GridConfig, TimeInterval, TimeWindow};

use super::lanes::{LaneLayout, LanePlacement};
use crate::selection::CreateDrag;

/// Vertical placement of a block, relative to the grid's top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockRect {
    pub top: f64,
    pub height: f64,
    /// Time label is drawn only when the block is tall enough.
    pub show_label: bool,
}

impl BlockRect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Placement of the drag-to-create preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreviewRect {
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourLabel {
    pub hour: u32,
    pub label: String,
    pub offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
}

/// Which part of a rendered block a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockHit {
    Body,
    Edge(Edge),
}

/// A block ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock {
    pub id: BlockId,
    pub interval: TimeInterval,
    pub rect: BlockRect,
    pub lane: LanePlacement,
    pub color: String,
}

/// Geometry of one day column between the window's whole start and end hours.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGrid {
    day: NaiveDate,
    start_hour: u32,
    end_hour: u32,
    top: f64,
    config: GridConfig,
}

impl DayGrid {
    pub fn new(day: NaiveDate, window: &TimeWindow, config: GridConfig) -> Self {
        Self {
            day,
            start_hour: window.start_hour(),
            end_hour: window.end_hour().max(window.start_hour()),
            top: 0.0,
            config,
        }
    }

    /// Set the grid's client-space top edge (its bounding rect top).
    #[must_use]
    pub fn with_top(mut self, top: f64) -> Self {
        self.top = top;
        self
    }

    pub fn set_top(&mut self, top: f64) {
        self.top = top;
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn total_hours(&self) -> u32 {
        self.end_hour - self.start_hour
    }

    /// Pixel height of the whole column.
    pub fn height(&self) -> f64 {
        f64::from(self.total_hours()) * self.config.hour_height_px
    }

    pub fn grid_start(&self) -> NaiveDateTime {
        self.at_minutes(i64::from(self.start_hour) * 60)
    }

    pub fn grid_end(&self) -> NaiveDateTime {
        self.at_minutes(i64::from(self.end_hour) * 60)
    }

    fn at_minutes(&self, minutes: i64) -> NaiveDateTime {
        self.day.and_time(NaiveTime::MIN) + Duration::minutes(minutes)
    }

    /// Time under client `y`, clamped to the column and snapped to the
    /// nearest snap step within its hour.
    pub fn y_to_time(&self, y: f64) -> NaiveDateTime {
        let height = self.height();
        if height <= 0.0 {
            return self.grid_start();
        }
        let relative = (y - self.top).clamp(0.0, height);
        let hour_offset = relative / height * f64::from(self.total_hours());
        let hours = (f64::from(self.start_hour) + hour_offset).floor() as i64;
        let step = f64::from(self.config.snap_minutes.max(1));
        let minutes = ((hour_offset.fract() * 60.0) / step).round() * step;
        self.at_minutes(hours * 60 + minutes as i64)
    }

    /// Offset of `time` from the grid's top edge in pixels.
    pub fn time_to_pixel_offset(&self, time: NaiveDateTime) -> f64 {
        let minutes = (time - self.grid_start()).num_minutes() as f64;
        minutes / 60.0 * self.config.hour_height_px
    }

    pub fn block_rect(&self, interval: &TimeInterval) -> BlockRect {
        let top = self.time_to_pixel_offset(interval.start);
        let raw = interval.minutes() as f64 / 60.0 * self.config.hour_height_px;
        BlockRect {
            top,
            height: raw.max(self.config.min_block_height_px),
            show_label: raw > BLOCK_LABEL_MIN_HEIGHT_PX,
        }
    }

    /// Preview follows the raw pointer, not the snapped times.
    pub fn drag_preview_rect(&self, drag: &CreateDrag) -> PreviewRect {
        let top = drag.anchor.y.min(drag.current.y) - self.top;
        let height = (drag.current.y - drag.anchor.y).abs();
        PreviewRect {
            top,
            height: height.max(self.config.min_drag_preview_height_px),
        }
    }

    /// One label per hour row, first to last hour inclusive.
    pub fn hour_labels(&self) -> Vec<HourLabel> {
        (self.start_hour..=self.end_hour)
            .enumerate()
            .map(|(row, hour)| HourLabel {
                hour,
                label: NaiveTime::from_hms_opt(hour % 24, 0, 0)
                    .map(format_time_short)
                    .unwrap_or_default(),
                offset: row as f64 * self.config.hour_height_px,
            })
            .collect()
    }

    /// Classify client `y` against a rendered block. Edge strips of
    /// `edge_px` win over the body; the top strip wins on short blocks.
    pub fn hit_test(&self, y: f64, rect: &BlockRect, edge_px: f64) -> Option<BlockHit> {
        let local = y - self.top;
        if local < rect.top || local > rect.bottom() {
            return None;
        }
        if local < rect.top + edge_px {
            Some(BlockHit::Edge(Edge::Top))
        } else if local > rect.bottom() - edge_px {
            Some(BlockHit::Edge(Edge::Bottom))
        } else {
            Some(BlockHit::Body)
        }
    }

    /// Rect, lane and colour for `block`. `editing` overrides the interval
    /// while the block is under an edit session.
    pub fn place(
        &self,
        block: &AvailabilityBlock,
        lanes: &LaneLayout,
        editing: Option<TimeInterval>,
    ) -> PlacedBlock {
        let interval = editing.unwrap_or(block.interval);
        PlacedBlock {
            id: block.id.clone(),
            interval,
            rect: self.block_rect(&interval),
            lane: lanes.lane_for(&block.participant_id),
            color: block.color().to_string(),
        }
    }
}
