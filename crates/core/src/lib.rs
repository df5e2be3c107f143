//! # Whenly Core
//!
//! The interactive availability-selection engine. Turns pointer input into
//! snapped, non-overlapping availability intervals.
//!
//! This crate contains:
//! - Interval math (overlap, snapping, clamping, collision)
//! - Day-selection and block-edit state machines, plus the edit/add dialogs
//! - Pointer/gesture adapters for the day grid and the month grid
//! - Positional geometry (pixel ↔ time, lanes)
//! - Persistence ports and the commit service
//!
//! ## Architecture Principles
//! - Depends only on `whenly-common` and `whenly-domain`
//! - No storage, network or UI toolkit code
//! - All external dependencies via traits
//! - State transitions are synchronous; only commits await

pub mod availability;
pub mod calendar;
pub mod geometry;
pub mod gesture;
pub mod interval;
pub mod selection;
pub mod store;

pub use availability::ports::{AvailabilityRepository, RemoteChangeFeed, SubscriptionId};
pub use availability::{AvailabilityService, Commit, DayBlocks, PendingWrites, RefreshSignal};
pub use calendar::{calendar_days, is_date_valid, DaySummary, MonthCursor};
pub use geometry::{BlockRect, DayGrid, LaneLayout, LanePlacement};
pub use gesture::{
    DayGridGestures, DeviceCapabilities, GestureOutcome, GestureResponse, GridTarget,
    ListenerChange, LongPress, MonthGestures, PointerEvent, PointerPosition,
};
pub use selection::{
    AddBlockDialog, BlockEditor, DaySelection, EditCommit, EditDialog, FinalizeDialog,
};
pub use store::CalendarStore;
