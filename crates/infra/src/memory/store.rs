//! In-memory availability store
//!
//! Implements both [`AvailabilityRepository`] and [`RemoteChangeFeed`], so
//! two clients sharing one store see each other's writes as remote changes.
//! Callbacks run after the write lock is released.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};
use whenly_core::availability::ChangeCallback;
use whenly_core::{AvailabilityRepository, RemoteChangeFeed, SubscriptionId};
use whenly_domain::{
    participant_color, AvailabilityBlock, BlockId, EventId, Participant, ParticipantId, Result, TimeInterval,
    WhenlyError,
};

#[derive(Debug, Clone)]
struct Row {
    event_id: EventId,
    block: AvailabilityBlock,
}

#[derive(Debug, Default)]
struct State {
    rows: Vec<Row>,
    participants: HashMap<EventId, Vec<Participant>>,
    finalized: HashMap<EventId, TimeInterval>,
}

impl State {
    fn participant(&self, event_id: &EventId, id: &ParticipantId) -> Option<&Participant> {
        self.participants.get(event_id)?.iter().find(|p| p.id == *id)
    }
}

#[derive(Default)]
pub struct InMemoryAvailabilityStore {
    state: RwLock<State>,
    subscribers: Mutex<HashMap<SubscriptionId, (EventId, ChangeCallback)>>,
    next_subscription: AtomicU64,
}

impl InMemoryAvailabilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a participant under `event_id`, assigning the next palette
    /// colour when they have none.
    pub fn join(&self, event_id: &EventId, name: impl Into<String>) -> Participant {
        let participant = {
            let mut state = self.state.write();
            let roster = state.participants.entry(event_id.clone()).or_default();
            let participant = Participant {
                id: ParticipantId::generate(),
                name: name.into(),
                color: Some(participant_color(roster.len()).to_string()),
            };
            roster.push(participant.clone());
            participant
        };
        info!(%event_id, participant_id = %participant.id, "participant joined");
        self.notify(event_id);
        participant
    }

    pub fn participants(&self, event_id: &EventId) -> Vec<Participant> {
        self.state.read().participants.get(event_id).cloned().unwrap_or_default()
    }

    /// Slot the host picked for `event_id`, if any.
    pub fn finalized(&self, event_id: &EventId) -> Option<TimeInterval> {
        self.state.read().finalized.get(event_id).copied()
    }

    pub fn block_count(&self) -> usize {
        self.state.read().rows.len()
    }

    fn notify(&self, event_id: &EventId) {
        let callbacks: Vec<ChangeCallback> = self
            .subscribers
            .lock()
            .values()
            .filter(|(event, _)| event == event_id)
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        debug!(%event_id, subscribers = callbacks.len(), "notifying remote change");
        for callback in callbacks {
            callback(event_id);
        }
    }

    fn notify_all(&self, mut events: Vec<EventId>) {
        events.sort();
        events.dedup();
        for event in &events {
            self.notify(event);
        }
    }
}

#[async_trait]
impl AvailabilityRepository for InMemoryAvailabilityStore {
    async fn blocks_for_event(&self, event_id: &EventId) -> Result<Vec<AvailabilityBlock>> {
        let mut blocks: Vec<_> = self
            .state
            .read()
            .rows
            .iter()
            .filter(|row| row.event_id == *event_id)
            .map(|row| row.block.clone())
            .collect();
        blocks.sort_by_key(|block| block.interval);
        Ok(blocks)
    }

    async fn persist_blocks(
        &self,
        participant: &ParticipantId,
        event_id: &EventId,
        day: NaiveDate,
        blocks: &[TimeInterval],
    ) -> Result<()> {
        if let Some(stray) = blocks.iter().find(|interval| interval.day() != day) {
            return Err(WhenlyError::InvalidInput(format!("{stray} does not start on {day}")));
        }
        {
            let mut state = self.state.write();
            let (name, color) = state
                .participant(event_id, participant)
                .map_or_else(|| (participant.to_string(), None), |p| (p.name.clone(), p.color.clone()));
            state.rows.retain(|row| {
                !(row.event_id == *event_id
                    && row.block.participant_id == *participant
                    && row.block.interval.day() == day)
            });
            state.rows.extend(blocks.iter().map(|interval| Row {
                event_id: event_id.clone(),
                block: AvailabilityBlock {
                    id: BlockId::generate(),
                    participant_id: participant.clone(),
                    participant_name: name.clone(),
                    participant_color: color.clone(),
                    interval: *interval,
                },
            }));
        }
        info!(%event_id, participant_id = %participant, %day, count = blocks.len(), "day persisted");
        self.notify(event_id);
        Ok(())
    }

    async fn update_block(&self, id: &BlockId, interval: TimeInterval) -> Result<()> {
        let event_id = {
            let mut state = self.state.write();
            let row = state
                .rows
                .iter_mut()
                .find(|row| row.block.id == *id)
                .ok_or_else(|| WhenlyError::NotFound(format!("block {id}")))?;
            row.block.interval = interval;
            row.event_id.clone()
        };
        info!(block_id = %id, %interval, "block updated");
        self.notify(&event_id);
        Ok(())
    }

    async fn delete_block(&self, id: &BlockId) -> Result<()> {
        let event_id = {
            let mut state = self.state.write();
            let index = state
                .rows
                .iter()
                .position(|row| row.block.id == *id)
                .ok_or_else(|| WhenlyError::NotFound(format!("block {id}")))?;
            state.rows.remove(index).event_id
        };
        info!(block_id = %id, "block deleted");
        self.notify(&event_id);
        Ok(())
    }

    async fn delete_blocks_for_day(&self, participant: &ParticipantId, day: NaiveDate) -> Result<()> {
        let touched: Vec<EventId> = {
            let mut state = self.state.write();
            let mut touched = Vec::new();
            state.rows.retain(|row| {
                let hit = row.block.participant_id == *participant && row.block.interval.day() == day;
                if hit {
                    touched.push(row.event_id.clone());
                }
                !hit
            });
            touched
        };
        info!(participant_id = %participant, %day, removed = touched.len(), "day cleared");
        self.notify_all(touched);
        Ok(())
    }

    async fn finalize_event(&self, event_id: &EventId, slot: TimeInterval) -> Result<()> {
        self.state.write().finalized.insert(event_id.clone(), slot);
        info!(%event_id, %slot, "event finalized");
        self.notify(event_id);
        Ok(())
    }
}

impl RemoteChangeFeed for InMemoryAvailabilityStore {
    fn on_remote_change(&self, event_id: &EventId, callback: ChangeCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().insert(id, (event_id.clone(), callback));
        debug!(%event_id, subscription = id.0, "remote change subscriber added");
        id
    }

    fn unsubscribe(&self, subscription: SubscriptionId) {
        if self.subscribers.lock().remove(&subscription).is_some() {
            debug!(subscription = subscription.0, "remote change subscriber removed");
        }
    }
}
