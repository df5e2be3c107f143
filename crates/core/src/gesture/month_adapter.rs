//! Month-grid gesture routing
//!
//! Mouse: press on a valid day starts a drag-select, entering other valid
//! days extends it, release either commits the range or (if the pointer
//! never left the anchor) toggles the anchor day. Double-click opens the day.
//!
//! Touch: a press arms a long-press timer that races the drag threshold.
//! The timer opens the day; exceeding the threshold turns the gesture into a
//! drag-select; lifting before either toggles the day. Browsers replay
//! touches as mouse events, so mouse input is ignored for a short guard
//! window after each touch ends.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, trace};
use whenly_common::{Clock, SystemClock};
use whenly_domain::{GestureConfig, ValidDates};

use super::long_press::{LongPress, LongPressState};
use super::pointer::PointerEvent;
use super::ListenerChange;
use crate::selection::DaySelection;

#[derive(Debug, Clone, PartialEq)]
pub enum MonthInput {
    PointerDown { event: PointerEvent, day: NaiveDate },
    /// Mouse entered a day cell.
    PointerEnter { day: NaiveDate },
    /// Pointer moved; `day` is the cell under it, if any.
    PointerMove { event: PointerEvent, day: Option<NaiveDate> },
    PointerUp(PointerEvent),
    DoubleClick { day: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "kind", content = "day", rename_all = "snake_case")]
pub enum MonthOutcome {
    #[default]
    None,
    Toggled(NaiveDate),
    /// A drag-select finished; read the selection for the result.
    RangeSelected,
    DayOpened(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct MonthResponse {
    pub outcome: MonthOutcome,
    pub listeners: ListenerChange,
}

#[derive(Clone, Copy)]
pub struct MonthContext<'a> {
    pub valid: &'a ValidDates,
}

impl MonthContext<'_> {
    fn is_valid(&self, day: NaiveDate) -> bool {
        self.valid.contains(day)
    }
}

#[derive(Debug, Clone)]
struct TouchGesture {
    day: NaiveDate,
    press: LongPress,
    dragging: bool,
}

pub struct MonthGestures<C: Clock = SystemClock> {
    clock: C,
    config: GestureConfig,
    touch: Option<TouchGesture>,
    last_touch_end: Option<Instant>,
}

impl MonthGestures<SystemClock> {
    pub fn new(config: GestureConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> MonthGestures<C> {
    pub fn with_clock(config: GestureConfig, clock: C) -> Self {
        Self {
            clock,
            config,
            touch: None,
            last_touch_end: None,
        }
    }

    /// Whether a mouse event now would be a replay of the last touch.
    pub fn should_ignore_mouse(&self) -> bool {
        let guard = Duration::from_millis(self.config.synthetic_mouse_guard_ms);
        self.last_touch_end
            .is_some_and(|ended| self.clock.now().saturating_duration_since(ended) < guard)
    }

    pub fn handle(&mut self, selection: &mut DaySelection, ctx: &MonthContext<'_>, input: MonthInput) -> MonthResponse {
        let is_mouse = match &input {
            MonthInput::PointerDown { event, .. }
            | MonthInput::PointerMove { event, .. }
            | MonthInput::PointerUp(event) => !event.is_touch(),
            MonthInput::PointerEnter { .. } | MonthInput::DoubleClick { .. } => true,
        };
        if is_mouse && self.should_ignore_mouse() {
            trace!("synthetic mouse event ignored");
            return MonthResponse::default();
        }
        match input {
            MonthInput::PointerDown { event, day } => self.pointer_down(selection, ctx, event, day),
            MonthInput::PointerEnter { day } => {
                if selection.is_dragging() && ctx.is_valid(day) {
                    selection.update_drag(day);
                }
                MonthResponse::default()
            }
            MonthInput::PointerMove { event, day } => self.pointer_move(selection, ctx, event, day),
            MonthInput::PointerUp(event) => self.pointer_up(selection, event),
            MonthInput::DoubleClick { day } => {
                if !ctx.is_valid(day) {
                    return MonthResponse::default();
                }
                selection.open_day(day);
                MonthResponse {
                    outcome: MonthOutcome::DayOpened(day),
                    listeners: ListenerChange::Unchanged,
                }
            }
        }
    }

    /// Poll the touch long-press timer.
    pub fn tick(&mut self, selection: &mut DaySelection) -> MonthResponse {
        let now = self.clock.now();
        let Some(touch) = self.touch.as_mut() else {
            return MonthResponse::default();
        };
        if touch.dragging || !touch.press.poll(now) {
            return MonthResponse::default();
        }
        let day = touch.day;
        debug!(%day, "day long-press fired");
        selection.open_day(day);
        MonthResponse {
            outcome: MonthOutcome::DayOpened(day),
            listeners: ListenerChange::Unchanged,
        }
    }

    fn pointer_down(
        &mut self,
        selection: &mut DaySelection,
        ctx: &MonthContext<'_>,
        event: PointerEvent,
        day: NaiveDate,
    ) -> MonthResponse {
        if !ctx.is_valid(day) {
            return MonthResponse::default();
        }
        if event.is_touch() {
            self.touch = Some(TouchGesture {
                day,
                press: LongPress::arm(
                    event.position(),
                    self.clock.now(),
                    Duration::from_millis(self.config.long_press_ms),
                    self.config.day_drag_threshold_px,
                ),
                dragging: false,
            });
            return MonthResponse {
                outcome: MonthOutcome::None,
                listeners: ListenerChange::Install,
            };
        }
        selection.start_drag(day);
        MonthResponse {
            outcome: MonthOutcome::None,
            listeners: ListenerChange::Install,
        }
    }

    fn pointer_move(
        &mut self,
        selection: &mut DaySelection,
        ctx: &MonthContext<'_>,
        event: PointerEvent,
        day: Option<NaiveDate>,
    ) -> MonthResponse {
        let valid_day = day.filter(|d| ctx.is_valid(*d));
        if !event.is_touch() {
            if let Some(day) = valid_day.filter(|_| selection.is_dragging()) {
                selection.update_drag(day);
            }
            return MonthResponse::default();
        }
        let Some(touch) = self.touch.as_mut() else {
            return MonthResponse::default();
        };
        if touch.press.has_fired() {
            return MonthResponse::default();
        }
        if !touch.dragging && touch.press.on_move(event.position()) {
            trace!(day = %touch.day, "touch crossed drag threshold");
            touch.dragging = true;
            selection.start_drag(touch.day);
        }
        if touch.dragging {
            if let Some(day) = valid_day {
                selection.update_drag(day);
            }
        }
        MonthResponse::default()
    }

    fn pointer_up(&mut self, selection: &mut DaySelection, event: PointerEvent) -> MonthResponse {
        if event.is_touch() {
            self.last_touch_end = Some(self.clock.now());
            let Some(mut touch) = self.touch.take() else {
                return MonthResponse::default();
            };
            let fired = touch.press.release() == LongPressState::Fired;
            let outcome = if fired {
                MonthOutcome::None
            } else if touch.dragging {
                Self::finish_drag(selection, touch.day)
            } else {
                selection.toggle_day_selection(touch.day);
                MonthOutcome::Toggled(touch.day)
            };
            return MonthResponse {
                outcome,
                listeners: ListenerChange::Remove,
            };
        }
        let Some(anchor) = selection.drag_anchor() else {
            return MonthResponse::default();
        };
        MonthResponse {
            outcome: Self::finish_drag(selection, anchor),
            listeners: ListenerChange::Remove,
        }
    }

    fn finish_drag(selection: &mut DaySelection, anchor: NaiveDate) -> MonthOutcome {
        if selection.end_drag() {
            MonthOutcome::RangeSelected
        } else {
            selection.toggle_day_selection(anchor);
            MonthOutcome::Toggled(anchor)
        }
    }
}
