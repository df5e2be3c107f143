//! Modal time pickers
//!
//! [`EditDialog`] edits one existing block; [`AddBlockDialog`] is the
//! touch-primary replacement for drag-to-create. Both pick from 15-minute
//! options and validate before emitting anything. [`FinalizeDialog`] is the
//! host's slot picker, on half-hour options over the whole day.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::debug;
use whenly_domain::constants::{
    FINALIZE_DEFAULT_END, FINALIZE_DEFAULT_START, MIN_BLOCK_MINUTES, MSG_END_BEFORE_START,
    MSG_MIN_DURATION, MSG_OVERLAP, MSG_PICK_DATE,
};
use whenly_domain::{
    finalize_time_options, format_time, generate_time_options, BlockId, BlockSpan, Result,
    TimeInterval, TimeWindow, WhenlyError,
};

use crate::interval::{has_collision, meets_minimum};
use crate::selection::EditCommit;

/// One entry of a time picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeChoice {
    pub time: NaiveTime,
    pub label: String,
    pub enabled: bool,
}

/// Start/end picker state shared by both dialogs.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TimePicker {
    day: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    options: Vec<NaiveTime>,
    error: Option<String>,
}

impl TimePicker {
    fn new(day: NaiveDate, window: &TimeWindow, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            day,
            start,
            end,
            options: generate_time_options(window.start_hour(), window.end_hour()),
            error: None,
        }
    }

    fn choices(&self, enabled: impl Fn(NaiveTime) -> bool) -> Vec<TimeChoice> {
        self.options
            .iter()
            .map(|&time| TimeChoice {
                time,
                label: format_time(time),
                enabled: enabled(time),
            })
            .collect()
    }

    fn start_choices(&self) -> Vec<TimeChoice> {
        self.choices(|t| t < self.end)
    }

    fn end_choices(&self) -> Vec<TimeChoice> {
        self.choices(|t| t > self.start)
    }

    /// Validate the picked pair against `existing`, recording the message.
    fn validate(&mut self, existing: &[BlockSpan], exclude: Option<&BlockId>) -> Result<TimeInterval> {
        let result = self.check(existing, exclude);
        self.error = result.as_ref().err().map(|e| e.user_message().to_string());
        result
    }

    fn check(&self, existing: &[BlockSpan], exclude: Option<&BlockId>) -> Result<TimeInterval> {
        let interval = TimeInterval::new(self.day.and_time(self.start), self.day.and_time(self.end))
            .map_err(|_| WhenlyError::InvalidGeometry(MSG_END_BEFORE_START.to_string()))?;
        if !meets_minimum(&interval, MIN_BLOCK_MINUTES) {
            return Err(WhenlyError::InvalidGeometry(MSG_MIN_DURATION.to_string()));
        }
        if has_collision(&interval, existing, exclude) {
            return Err(WhenlyError::Collision(MSG_OVERLAP.to_string()));
        }
        Ok(interval)
    }
}

/// Dialog for changing or deleting one of the viewer's blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDialog {
    block_id: BlockId,
    picker: TimePicker,
}

impl EditDialog {
    /// Initialise from `block`, on the day it starts.
    pub fn open(block: &BlockSpan, window: &TimeWindow) -> Self {
        let start = block.interval.start.time();
        let end = block.interval.end.time();
        Self {
            block_id: block.id.clone(),
            picker: TimePicker::new(block.interval.day(), window, start, end),
        }
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    /// Day the block starts on.
    pub fn day(&self) -> NaiveDate {
        self.picker.day
    }

    pub fn start(&self) -> NaiveTime {
        self.picker.start
    }

    pub fn end(&self) -> NaiveTime {
        self.picker.end
    }

    pub fn set_start(&mut self, time: NaiveTime) {
        self.picker.start = time;
    }

    pub fn set_end(&mut self, time: NaiveTime) {
        self.picker.end = time;
    }

    /// Start options; enabled iff before the current end.
    pub fn start_choices(&self) -> Vec<TimeChoice> {
        self.picker.start_choices()
    }

    /// End options; enabled iff after the current start.
    pub fn end_choices(&self) -> Vec<TimeChoice> {
        self.picker.end_choices()
    }

    /// Last validation message, if the previous save failed.
    pub fn error(&self) -> Option<&str> {
        self.picker.error.as_deref()
    }

    /// Validate and produce the update. `existing` is the owner's blocks for
    /// the day; the edited block itself is ignored.
    ///
    /// # Errors
    /// `InvalidGeometry` for an empty or too-short range, `Collision` for an
    /// overlap. The message is also kept in [`EditDialog::error`].
    pub fn save(&mut self, existing: &[BlockSpan]) -> Result<EditCommit> {
        let interval = self.picker.validate(existing, Some(&self.block_id))?;
        debug!(block_id = %self.block_id, %interval, "edit dialog saved");
        Ok(EditCommit {
            block_id: self.block_id.clone(),
            interval,
        })
    }

    /// Id to hand to `delete_block`.
    pub fn delete(&self) -> BlockId {
        debug!(block_id = %self.block_id, "edit dialog delete");
        self.block_id.clone()
    }
}

/// Dialog for adding a block without dragging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddBlockDialog {
    picker: TimePicker,
}

impl AddBlockDialog {
    /// Defaults to the window start and one hour later, capped at the last
    /// grid hour.
    pub fn open(day: NaiveDate, window: &TimeWindow) -> Self {
        let end_hour = (window.start_hour() + 1).min(window.end_hour());
        let end = NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap_or(window.end());
        Self {
            picker: TimePicker::new(day, window, window.start(), end),
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.picker.day
    }

    pub fn start(&self) -> NaiveTime {
        self.picker.start
    }

    pub fn end(&self) -> NaiveTime {
        self.picker.end
    }

    pub fn set_start(&mut self, time: NaiveTime) {
        self.picker.start = time;
    }

    pub fn set_end(&mut self, time: NaiveTime) {
        self.picker.end = time;
    }

    pub fn start_choices(&self) -> Vec<TimeChoice> {
        self.picker.start_choices()
    }

    pub fn end_choices(&self) -> Vec<TimeChoice> {
        self.picker.end_choices()
    }

    pub fn error(&self) -> Option<&str> {
        self.picker.error.as_deref()
    }

    /// Validate against the viewer's blocks for the day.
    ///
    /// # Errors
    /// Same taxonomy as [`EditDialog::save`].
    pub fn save(&mut self, existing: &[BlockSpan]) -> Result<TimeInterval> {
        let interval = self.picker.validate(existing, None)?;
        debug!(%interval, "add dialog saved");
        Ok(interval)
    }
}

/// Host dialog for fixing the event's final slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeDialog {
    today: NaiveDate,
    day: Option<NaiveDate>,
    start: NaiveTime,
    end: NaiveTime,
    options: Vec<NaiveTime>,
    error: Option<String>,
}

impl FinalizeDialog {
    /// No day picked yet; times default to 09:00 and 10:00.
    pub fn open(today: NaiveDate) -> Self {
        Self {
            today,
            day: None,
            start: default_clock(FINALIZE_DEFAULT_START, 9),
            end: default_clock(FINALIZE_DEFAULT_END, 10),
            options: finalize_time_options(),
            error: None,
        }
    }

    pub fn day(&self) -> Option<NaiveDate> {
        self.day
    }

    /// Pick the date. Days before today are refused.
    pub fn select_day(&mut self, day: NaiveDate) -> bool {
        if day < self.today {
            return false;
        }
        self.day = Some(day);
        true
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Ignored unless `time` is one of the half-hour options.
    pub fn set_start(&mut self, time: NaiveTime) {
        if self.options.contains(&time) {
            self.start = time;
        }
    }

    /// Ignored unless `time` is one of the half-hour options.
    pub fn set_end(&mut self, time: NaiveTime) {
        if self.options.contains(&time) {
            self.end = time;
        }
    }

    pub fn choices(&self) -> Vec<TimeChoice> {
        self.options
            .iter()
            .map(|&time| TimeChoice {
                time,
                label: time.format("%H:%M").to_string(),
                enabled: true,
            })
            .collect()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate the pick and produce the slot.
    ///
    /// # Errors
    /// `InvalidInput` when no day is picked, `InvalidGeometry` when the end is
    /// not after the start. The message is also kept in
    /// [`FinalizeDialog::error`].
    pub fn confirm(&mut self) -> Result<TimeInterval> {
        let result = self.check();
        self.error = result.as_ref().err().map(|e| e.user_message().to_string());
        if let Ok(slot) = &result {
            debug!(%slot, "finalize dialog confirmed");
        }
        result
    }

    fn check(&self) -> Result<TimeInterval> {
        let day = self
            .day
            .ok_or_else(|| WhenlyError::InvalidInput(MSG_PICK_DATE.to_string()))?;
        TimeInterval::new(day.and_time(self.start), day.and_time(self.end))
            .map_err(|_| WhenlyError::InvalidGeometry(MSG_END_BEFORE_START.to_string()))
    }
}

fn default_clock(raw: &str, hour: u32) -> NaiveTime {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .ok()
        .or_else(|| NaiveTime::from_hms_opt(hour, 0, 0))
        .unwrap_or(NaiveTime::MIN)
}
