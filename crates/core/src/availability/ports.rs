//! Port interfaces for availability storage
//!
//! These traits define the boundary between the engine and whatever store
//! and realtime channel the host wires in.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use whenly_domain::{AvailabilityBlock, BlockId, EventId, ParticipantId, Result, TimeInterval};

/// Trait for reading and writing availability rows
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// All blocks of an event, ordered by start
    async fn blocks_for_event(&self, event_id: &EventId) -> Result<Vec<AvailabilityBlock>>;

    /// Replace every block of `participant` starting on `day` with `blocks`
    /// (delete-then-insert)
    async fn persist_blocks(
        &self,
        participant: &ParticipantId,
        event_id: &EventId,
        day: NaiveDate,
        blocks: &[TimeInterval],
    ) -> Result<()>;

    async fn update_block(&self, id: &BlockId, interval: TimeInterval) -> Result<()>;

    async fn delete_block(&self, id: &BlockId) -> Result<()>;

    /// Delete every block of `participant` starting on `day`
    async fn delete_blocks_for_day(&self, participant: &ParticipantId, day: NaiveDate) -> Result<()>;

    /// Record the host's chosen slot on the event
    async fn finalize_event(&self, event_id: &EventId, slot: TimeInterval) -> Result<()>;
}

/// Handle returned by [`RemoteChangeFeed::on_remote_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// Invoked with the event whose rows changed.
pub type ChangeCallback = Arc<dyn Fn(&EventId) + Send + Sync>;

/// Trait for realtime notification of remote mutations
pub trait RemoteChangeFeed: Send + Sync {
    /// Register `callback` for changes to `event_id`'s participants or
    /// availability
    fn on_remote_change(&self, event_id: &EventId, callback: ChangeCallback) -> SubscriptionId;

    fn unsubscribe(&self, subscription: SubscriptionId);
}
