//! Event scheduling metadata

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::constants::{DEFAULT_TIME_RANGE_END, DEFAULT_TIME_RANGE_START};
use crate::errors::{Result, WhenlyError};
use crate::types::{DateMode, EventId, ParticipantId, TimeInterval};

/// Visible daily time range of an event, e.g. 08:00–22:00. `start < end`
/// holds for every value, deserialized ones included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(try_from = "RawWindow")]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

#[derive(Deserialize)]
struct RawWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = WhenlyError;

    fn try_from(raw: RawWindow) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeWindow {
    /// # Errors
    /// Returns `WhenlyError::InvalidGeometry` when `end` is not after `start`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(WhenlyError::InvalidGeometry(format!(
                "time window end {end} is not after start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse `"HH:MM"` (or `"HH:MM:SS"`) bounds. `None` falls back to the
    /// default 08:00 / 22:00 for that side.
    ///
    /// # Errors
    /// Returns `WhenlyError::InvalidInput` for unparseable times and
    /// `WhenlyError::InvalidGeometry` for an empty window.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let start = parse_clock(start.unwrap_or(DEFAULT_TIME_RANGE_START))?;
        let end = parse_clock(end.unwrap_or(DEFAULT_TIME_RANGE_END))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// First hour row of the day grid.
    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    /// Hour at which the day grid stops.
    pub fn end_hour(&self) -> u32 {
        self.end.hour()
    }

    /// The window applied to a concrete day.
    pub fn on(&self, day: NaiveDate) -> TimeInterval {
        TimeInterval {
            start: day.and_time(self.start),
            end: day.and_time(self.end),
        }
    }

    /// Grid bounds on `day`, truncated to whole hours.
    pub fn grid_bounds(&self, day: NaiveDate) -> TimeInterval {
        let start = day.and_time(hour_time(self.start_hour()));
        let end = day.and_time(hour_time(self.end_hour()));
        if start < end {
            TimeInterval { start, end }
        } else {
            self.on(day)
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start: hour_time(8),
            end: hour_time(22),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

impl FromStr for TimeWindow {
    type Err = WhenlyError;

    /// Accepts `"08:00-22:00"`.
    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| WhenlyError::InvalidInput(format!("expected HH:MM-HH:MM, got '{s}'")))?;
        Self::parse(Some(start.trim()), Some(end.trim()))
    }
}

fn hour_time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN)
}

fn parse_clock(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|e| WhenlyError::InvalidInput(format!("invalid time '{raw}': {e}")))
}

/// Candidate dates of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ValidDates {
    /// Inclusive date range.
    Range { start: NaiveDate, end: NaiveDate },
    Specific { dates: BTreeSet<NaiveDate> },
    /// No constraint recorded; no day is selectable.
    #[default]
    None,
}

impl ValidDates {
    pub fn contains(&self, day: NaiveDate) -> bool {
        match self {
            Self::Range { start, end } => *start <= day && day <= *end,
            Self::Specific { dates } => dates.contains(&day),
            Self::None => false,
        }
    }

    pub fn specific(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self::Specific {
            dates: dates.into_iter().collect(),
        }
    }

    pub fn mode(&self) -> Option<DateMode> {
        match self {
            Self::Range { .. } => Some(DateMode::Range),
            Self::Specific { .. } => Some(DateMode::Specific),
            Self::None => None,
        }
    }
}

/// Scheduling metadata of one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSchedule {
    pub id: EventId,
    pub slug: String,
    pub title: String,
    pub valid_dates: ValidDates,
    #[serde(default)]
    pub time_window: TimeWindow,
    /// Slot picked by the host, if any.
    #[serde(default)]
    pub finalized: Option<TimeInterval>,
}

impl EventSchedule {
    pub fn date_mode(&self) -> Option<DateMode> {
        self.valid_dates.mode()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn test_parse_window_defaults() {
        let window = TimeWindow::parse(None, None).unwrap();
        assert_eq!(window, TimeWindow::default());
        assert_eq!(window.start_hour(), 8);
        assert_eq!(window.end_hour(), 22);
    }

    #[test]
    fn test_parse_window_with_seconds_and_minutes() {
        let window = TimeWindow::parse(Some("09:30:00"), Some("17:45")).unwrap();
        assert_eq!(window.start(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        let on = window.on(d(3));
        assert_eq!(on.minutes(), 8 * 60 + 15);
        let grid = window.grid_bounds(d(3));
        assert_eq!(grid.start, d(3).and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(grid.end, d(3).and_hms_opt(17, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_window_rejects_garbage() {
        assert!(matches!(
            TimeWindow::parse(Some("nine"), None),
            Err(WhenlyError::InvalidInput(_))
        ));
        assert!(matches!(
            "18:00-09:00".parse::<TimeWindow>(),
            Err(WhenlyError::InvalidGeometry(_))
        ));
        assert_eq!("08:00-22:00".parse::<TimeWindow>().unwrap(), TimeWindow::default());
    }

    /// Validates `TimeWindow` deserialization behavior for the inverted
    /// window scenario.
    ///
    /// Assertions:
    /// - an inverted window never deserializes, so `on` cannot yield an
    ///   interval with `start >= end`
    #[test]
    fn test_deserialize_window_rejects_inverted() {
        let inverted = serde_json::from_str::<TimeWindow>(r#"{"start":"22:00:00","end":"08:00:00"}"#);
        assert!(inverted.is_err());

        let window: TimeWindow =
            serde_json::from_str(r#"{"start":"09:00:00","end":"17:30:00"}"#).unwrap();
        assert_eq!(window.on(d(3)).minutes(), 8 * 60 + 30);
    }

    #[test]
    fn test_valid_dates_contains() {
        let range = ValidDates::Range { start: d(3), end: d(5) };
        assert!(range.contains(d(3)));
        assert!(range.contains(d(5)));
        assert!(!range.contains(d(6)));

        let specific = ValidDates::specific([d(1), d(10)]);
        assert!(specific.contains(d(10)));
        assert!(!specific.contains(d(2)));

        assert!(!ValidDates::None.contains(d(1)));
        assert_eq!(ValidDates::None.mode(), None);
        assert_eq!(specific.mode(), Some(DateMode::Specific));
    }
}
