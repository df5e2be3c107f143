//! Multi-day selection on the month grid

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, trace};
use whenly_domain::CalendarView;

#[derive(Debug, Clone, PartialEq, Eq)]
struct DayDrag {
    anchor: NaiveDate,
    pre_drag: BTreeSet<NaiveDate>,
    has_moved: bool,
}

/// Selected days, an optional in-progress drag, and the month/day view toggle.
///
/// Opening a day clears the multi-day selection; the two are mutually
/// exclusive UI modes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySelection {
    selected: BTreeSet<NaiveDate>,
    drag: Option<DayDrag>,
    view: CalendarView,
    open_day: Option<NaiveDate>,
}

impl DaySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag at `day`. The selection itself is not changed yet.
    pub fn start_drag(&mut self, day: NaiveDate) {
        trace!(%day, "day drag started");
        self.drag = Some(DayDrag {
            anchor: day,
            pre_drag: self.selected.clone(),
            has_moved: false,
        });
    }

    /// Replace the selection with the pre-drag set plus every day between
    /// the anchor and `day`, inclusive. Ignored when no drag is active.
    pub fn update_drag(&mut self, day: NaiveDate) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let (from, to) = if drag.anchor <= day {
            (drag.anchor, day)
        } else {
            (day, drag.anchor)
        };
        let mut merged = drag.pre_drag.clone();
        merged.extend(from.iter_days().take_while(|d| *d <= to));
        drag.has_moved |= day != drag.anchor;
        self.selected = merged;
    }

    /// Finish the drag. Returns `true` if the pointer ever left the anchor
    /// day; `false` means a plain click, and the caller toggles the anchor.
    pub fn end_drag(&mut self) -> bool {
        let moved = self.drag.take().is_some_and(|drag| drag.has_moved);
        debug!(moved, selected = self.selected.len(), "day drag ended");
        moved
    }

    pub fn toggle_day_selection(&mut self, day: NaiveDate) {
        if !self.selected.remove(&day) {
            self.selected.insert(day);
        }
    }

    /// Switch to the single-day view for `day`.
    pub fn open_day(&mut self, day: NaiveDate) {
        debug!(%day, "opening day view");
        self.open_day = Some(day);
        self.view = CalendarView::Day;
        self.selected.clear();
    }

    pub fn close_day(&mut self) {
        self.open_day = None;
        self.view = CalendarView::Month;
    }

    /// Drop the selection and any in-progress drag.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.drag = None;
    }

    pub fn select_days(&mut self, days: impl IntoIterator<Item = NaiveDate>) {
        self.selected = days.into_iter().collect();
    }

    pub fn is_selected(&self, day: NaiveDate) -> bool {
        self.selected.contains(&day)
    }

    pub fn selected_days(&self) -> &BTreeSet<NaiveDate> {
        &self.selected
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    /// Day shown in the day view, if open.
    pub fn open_day_value(&self) -> Option<NaiveDate> {
        self.open_day
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_anchor(&self) -> Option<NaiveDate> {
        self.drag.as_ref().map(|drag| drag.anchor)
    }
}
