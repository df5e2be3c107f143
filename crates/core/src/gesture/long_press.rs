//! Long-press timer racing against movement
//!
//! `Armed` moves to `Cancelled` once the pointer travels further than the
//! slop, or to `Fired` once the delay elapses, whichever happens first. Both
//! end in `Released`. The timer is polled; nothing runs in the background.

use std::time::{Duration, Instant};

use super::pointer::PointerPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongPressState {
    Armed,
    Cancelled,
    Fired,
    Released,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LongPress {
    origin: PointerPosition,
    armed_at: Instant,
    delay: Duration,
    slop: f64,
    state: LongPressState,
}

impl LongPress {
    pub fn arm(origin: PointerPosition, now: Instant, delay: Duration, slop: f64) -> Self {
        Self {
            origin,
            armed_at: now,
            delay,
            slop,
            state: LongPressState::Armed,
        }
    }

    /// Feed a pointer sample. Returns `true` if this move cancelled the timer.
    pub fn on_move(&mut self, position: PointerPosition) -> bool {
        if self.state == LongPressState::Armed && self.origin.distance_to(&position) > self.slop {
            self.state = LongPressState::Cancelled;
            return true;
        }
        false
    }

    /// Returns `true` exactly once, when the delay has elapsed while armed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state == LongPressState::Armed && now.saturating_duration_since(self.armed_at) >= self.delay {
            self.state = LongPressState::Fired;
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        if self.state == LongPressState::Armed {
            self.state = LongPressState::Cancelled;
        }
    }

    /// End the gesture, returning the state it was in.
    pub fn release(&mut self) -> LongPressState {
        std::mem::replace(&mut self.state, LongPressState::Released)
    }

    pub fn state(&self) -> LongPressState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == LongPressState::Armed
    }

    pub fn has_fired(&self) -> bool {
        self.state == LongPressState::Fired
    }

    pub fn origin(&self) -> PointerPosition {
        self.origin
    }

    pub fn deadline(&self) -> Instant {
        self.armed_at + self.delay
    }
}
