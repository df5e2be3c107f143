//! Month view model
//!
//! Which month is shown, the Sunday-start days that fill its grid, and the
//! per-day availability summary each cell renders.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use whenly_domain::constants::{DEFAULT_PARTICIPANT_COLOR, MONTH_CELL_MAX_DOTS};
use whenly_domain::{AvailabilityBlock, Participant, ParticipantId, ValidDates};

/// The month currently shown on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCursor {
    current: NaiveDate,
}

impl MonthCursor {
    pub fn new(current: NaiveDate) -> Self {
        Self { current }
    }

    pub fn current(&self) -> NaiveDate {
        self.current
    }

    /// Day-of-month clamps when the target month is shorter.
    pub fn next_month(&mut self) {
        if let Some(next) = self.current.checked_add_months(Months::new(1)) {
            self.current = next;
        }
    }

    pub fn prev_month(&mut self) {
        if let Some(prev) = self.current.checked_sub_months(Months::new(1)) {
            self.current = prev;
        }
    }

    pub fn set_current(&mut self, date: NaiveDate) {
        self.current = date;
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day.year() == self.current.year() && day.month() == self.current.month()
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        calendar_days(self.current)
    }
}

/// Days shown for the month containing `date`: whole weeks from the Sunday
/// on or before the 1st to the Saturday on or after the last day.
pub fn calendar_days(date: NaiveDate) -> Vec<NaiveDate> {
    let Some(first) = date.with_day(1) else {
        return Vec::new();
    };
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);
    let lead = u64::from(first.weekday().num_days_from_sunday());
    let trail = 6 - u64::from(last.weekday().num_days_from_sunday());
    let (Some(start), Some(end)) = (
        first.checked_sub_days(Days::new(lead)),
        last.checked_add_days(Days::new(trail)),
    ) else {
        return Vec::new();
    };
    start.iter_days().take_while(|day| *day <= end).collect()
}

pub fn is_date_valid(valid: &ValidDates, day: NaiveDate) -> bool {
    valid.contains(day)
}

/// Who marked time on one day, for the month cell's dots and heat-map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: NaiveDate,
    pub available: Vec<Participant>,
    pub total: usize,
    /// `available / total`, 0 when nobody has joined.
    pub intensity: f64,
    pub dots: Vec<String>,
    pub overflow: usize,
}

impl DaySummary {
    pub fn for_day(day: NaiveDate, blocks: &[AvailabilityBlock], participants: &[Participant]) -> Self {
        let present: BTreeSet<&ParticipantId> = blocks
            .iter()
            .filter(|block| block.interval.day() == day)
            .map(|block| &block.participant_id)
            .collect();
        let available: Vec<Participant> = participants
            .iter()
            .filter(|p| present.contains(&p.id))
            .cloned()
            .collect();
        let total = participants.len();
        let intensity = if total == 0 {
            0.0
        } else {
            available.len() as f64 / total as f64
        };
        let dots = available
            .iter()
            .take(MONTH_CELL_MAX_DOTS)
            .map(|p| p.color.clone().unwrap_or_else(|| DEFAULT_PARTICIPANT_COLOR.to_string()))
            .collect();
        let overflow = available.len().saturating_sub(MONTH_CELL_MAX_DOTS);
        Self {
            day,
            available,
            total,
            intensity,
            dots,
            overflow,
        }
    }

    pub fn has_availability(&self) -> bool {
        !self.available.is_empty()
    }
}
