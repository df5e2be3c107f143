//! Month grid: cursor, visible days, per-day availability summaries.

pub mod month;

pub use month::{calendar_days, is_date_valid, DaySummary, MonthCursor};
