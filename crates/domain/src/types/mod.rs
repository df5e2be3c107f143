//! Domain types and models

pub mod availability;
pub mod event;
pub mod ids;
pub mod interval;
pub mod modes;

pub use availability::{AvailabilityBlock, BlockSpan};
pub use event::{EventSchedule, Participant, TimeWindow, ValidDates};
pub use ids::{BlockId, EventId, ParticipantId};
pub use interval::TimeInterval;
pub use modes::{CalendarView, DateMode, EditMode};
