//! Half-open wall-clock time ranges

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::errors::{Result, WhenlyError};

/// `[start, end)` on naive local time. `start < end` holds for values built
/// through [`TimeInterval::new`] and for every deserialized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Unchecked wire form of [`TimeInterval`].
#[derive(Deserialize)]
struct RawInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = WhenlyError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeInterval {
    /// Build an interval, rejecting empty or inverted ranges.
    ///
    /// # Errors
    /// Returns `WhenlyError::InvalidGeometry` when `start >= end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start >= end {
            return Err(WhenlyError::InvalidGeometry(format!(
                "end {end} is not after start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Interval from `start` lasting `minutes`.
    ///
    /// # Errors
    /// Returns `WhenlyError::InvalidGeometry` when `minutes` is not positive.
    pub fn from_minutes(start: NaiveDateTime, minutes: i64) -> Result<Self> {
        Self::new(start, start + Duration::minutes(minutes))
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whole minutes between start and end.
    pub fn minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// The calendar day the interval starts on.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    /// True when `t` lies in `[start, end)`.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t < self.end
    }

    /// Same duration, starting at `start`.
    #[must_use]
    pub fn shifted_to(&self, start: NaiveDateTime) -> Self {
        Self {
            start,
            end: start + self.duration(),
        }
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}–{}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%H:%M")
        )
    }
}
