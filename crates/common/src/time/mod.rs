//! Time utilities
//!
//! Monotonic clock abstraction so gesture timers (long-press, synthetic mouse
//! suppression) can be driven deterministically in tests.

pub mod clock;

pub use clock::{Clock, MockClock, SystemClock};
