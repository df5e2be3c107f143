//! Availability persistence boundary
//!
//! Ports for the external store and change feed, the per-day snapshot the
//! gesture machines read, and the single commit path for writes.

pub mod ports;
pub mod refresh;
pub mod service;
pub mod snapshot;

pub use ports::{AvailabilityRepository, ChangeCallback, RemoteChangeFeed, SubscriptionId};
pub use refresh::RefreshSignal;
pub use service::{AvailabilityService, Commit, PendingGuard, PendingWrites, WriteTarget};
pub use snapshot::DayBlocks;
