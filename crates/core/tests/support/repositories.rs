//! Mock implementations of the availability ports
//!
//! `MockAvailabilityRepository` keeps rows in memory, records every call
//! and can be told to fail the next write. `MockChangeFeed` lets a test
//! fire remote changes by hand.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use whenly_core::availability::ChangeCallback;
use whenly_core::{AvailabilityRepository, RemoteChangeFeed, SubscriptionId};
use whenly_domain::{
    AvailabilityBlock, BlockId, EventId, ParticipantId, Result as DomainResult, TimeInterval,
    WhenlyError,
};

/// One call seen by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoCall {
    Persist { participant: ParticipantId, day: NaiveDate, blocks: Vec<TimeInterval> },
    Update { id: BlockId, interval: TimeInterval },
    Delete(BlockId),
    DeleteDay { participant: ParticipantId, day: NaiveDate },
    Finalize { event: EventId, slot: TimeInterval },
}

#[derive(Default)]
struct RepoState {
    blocks: Vec<AvailabilityBlock>,
    finalized: HashMap<EventId, TimeInterval>,
    calls: Vec<RepoCall>,
    next_id: u64,
}

/// In-memory mock for `AvailabilityRepository`.
#[derive(Default, Clone)]
pub struct MockAvailabilityRepository {
    state: Arc<Mutex<RepoState>>,
    fail_next: Arc<AtomicBool>,
}

impl MockAvailabilityRepository {
    /// Create a new mock seeded with the provided blocks.
    pub fn new(blocks: Vec<AvailabilityBlock>) -> Self {
        let repo = Self::default();
        repo.state.lock().blocks = blocks;
        repo
    }

    /// Make the next write return `Persistence`.
    pub fn fail_next_write(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<RepoCall> {
        self.state.lock().calls.clone()
    }

    pub fn blocks(&self) -> Vec<AvailabilityBlock> {
        self.state.lock().blocks.clone()
    }

    pub fn finalized(&self, event: &EventId) -> Option<TimeInterval> {
        self.state.lock().finalized.get(event).copied()
    }

    pub fn blocks_of(&self, participant: &str, day: NaiveDate) -> Vec<TimeInterval> {
        let mut found: Vec<_> = self
            .state
            .lock()
            .blocks
            .iter()
            .filter(|b| b.participant_id.as_str() == participant && b.interval.day() == day)
            .map(|b| b.interval)
            .collect();
        found.sort();
        found
    }

    fn record(&self, call: RepoCall) -> DomainResult<()> {
        self.state.lock().calls.push(call);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(WhenlyError::Persistence("injected failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl AvailabilityRepository for MockAvailabilityRepository {
    async fn blocks_for_event(&self, _event_id: &EventId) -> DomainResult<Vec<AvailabilityBlock>> {
        let mut blocks = self.blocks();
        blocks.sort_by_key(|b| b.interval);
        Ok(blocks)
    }

    async fn persist_blocks(
        &self,
        participant: &ParticipantId,
        _event_id: &EventId,
        day: NaiveDate,
        blocks: &[TimeInterval],
    ) -> DomainResult<()> {
        self.record(RepoCall::Persist {
            participant: participant.clone(),
            day,
            blocks: blocks.to_vec(),
        })?;
        let mut state = self.state.lock();
        state
            .blocks
            .retain(|b| !(b.participant_id == *participant && b.interval.day() == day));
        for interval in blocks {
            state.next_id += 1;
            let id = BlockId::new(format!("gen-{}", state.next_id));
            state.blocks.push(AvailabilityBlock {
                id,
                participant_id: participant.clone(),
                participant_name: participant.to_string(),
                participant_color: None,
                interval: *interval,
            });
        }
        Ok(())
    }

    async fn update_block(&self, id: &BlockId, interval: TimeInterval) -> DomainResult<()> {
        self.record(RepoCall::Update { id: id.clone(), interval })?;
        let mut state = self.state.lock();
        let block = state
            .blocks
            .iter_mut()
            .find(|b| b.id == *id)
            .ok_or_else(|| WhenlyError::NotFound(format!("block {id}")))?;
        block.interval = interval;
        Ok(())
    }

    async fn delete_block(&self, id: &BlockId) -> DomainResult<()> {
        self.record(RepoCall::Delete(id.clone()))?;
        self.state.lock().blocks.retain(|b| b.id != *id);
        Ok(())
    }

    async fn delete_blocks_for_day(&self, participant: &ParticipantId, day: NaiveDate) -> DomainResult<()> {
        self.record(RepoCall::DeleteDay { participant: participant.clone(), day })?;
        self.state
            .lock()
            .blocks
            .retain(|b| !(b.participant_id == *participant && b.interval.day() == day));
        Ok(())
    }

    async fn finalize_event(&self, event_id: &EventId, slot: TimeInterval) -> DomainResult<()> {
        self.record(RepoCall::Finalize { event: event_id.clone(), slot })?;
        self.state.lock().finalized.insert(event_id.clone(), slot);
        Ok(())
    }
}

/// Hand-driven `RemoteChangeFeed`.
#[derive(Default)]
pub struct MockChangeFeed {
    next: AtomicU64,
    subscribers: Mutex<HashMap<SubscriptionId, (EventId, ChangeCallback)>>,
}

impl MockChangeFeed {
    /// Invoke every callback registered for `event_id`.
    pub fn fire(&self, event_id: &EventId) {
        let callbacks: Vec<ChangeCallback> = self
            .subscribers
            .lock()
            .values()
            .filter(|(event, _)| event == event_id)
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(event_id);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl RemoteChangeFeed for MockChangeFeed {
    fn on_remote_change(&self, event_id: &EventId, callback: ChangeCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next.fetch_add(1, Ordering::SeqCst));
        self.subscribers.lock().insert(id, (event_id.clone(), callback));
        id
    }

    fn unsubscribe(&self, subscription: SubscriptionId) {
        self.subscribers.lock().remove(&subscription);
    }
}
