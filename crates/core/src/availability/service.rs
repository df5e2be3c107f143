//! Commit service - the single write path
//!
//! Every persisted change produced by a gesture, a dialog or a toolbar
//! action goes through [`AvailabilityService::commit`]. Local gesture state
//! has already been cleared by the time a commit runs; a failed write is
//! reported to the caller and reconciled by the next refresh, never rolled
//! back here.

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use whenly_domain::constants::MIN_BLOCK_MINUTES;
use whenly_domain::{
    AvailabilityBlock, BlockId, EventId, ParticipantId, Result, TimeInterval, TimeWindow,
    WhenlyError,
};

use super::ports::AvailabilityRepository;
use super::snapshot::DayBlocks;
use crate::interval::meets_minimum;
use crate::selection::EditCommit;

/// A finished change to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Commit {
    /// Drag or add-dialog result. Persisted together with the participant's
    /// other blocks for the day.
    CreateBlock {
        participant: ParticipantId,
        event: EventId,
        existing: Vec<TimeInterval>,
        interval: TimeInterval,
    },
    /// Move, resize or dialog edit of one of `owner`'s blocks.
    UpdateBlock {
        owner: ParticipantId,
        edit: EditCommit,
    },
    /// Delete one of `owner`'s blocks; `day` is the day it starts on.
    DeleteBlock {
        owner: ParticipantId,
        id: BlockId,
        day: NaiveDate,
    },
    /// Replace each day's blocks with one block covering the event window.
    MarkAllDay {
        participant: ParticipantId,
        event: EventId,
        days: Vec<NaiveDate>,
        window: TimeWindow,
    },
    ClearDays {
        participant: ParticipantId,
        days: Vec<NaiveDate>,
    },
    /// The host's final slot for the event.
    Finalize { event: EventId, slot: TimeInterval },
}

impl Commit {
    fn targets(&self) -> Vec<WriteTarget> {
        match self {
            Self::CreateBlock {
                participant,
                interval,
                ..
            } => vec![WriteTarget::Day(participant.clone(), interval.day())],
            Self::UpdateBlock { owner, edit } => vec![WriteTarget::Block {
                id: edit.block_id.clone(),
                owner: owner.clone(),
                day: edit.interval.day(),
            }],
            Self::DeleteBlock { owner, id, day } => vec![WriteTarget::Block {
                id: id.clone(),
                owner: owner.clone(),
                day: *day,
            }],
            Self::MarkAllDay {
                participant, days, ..
            }
            | Self::ClearDays { participant, days } => days
                .iter()
                .map(|day| WriteTarget::Day(participant.clone(), *day))
                .collect(),
            Self::Finalize { event, .. } => vec![WriteTarget::Event(event.clone())],
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::CreateBlock { .. } => "create_block",
            Self::UpdateBlock { .. } => "update_block",
            Self::DeleteBlock { .. } => "delete_block",
            Self::MarkAllDay { .. } => "mark_all_day",
            Self::ClearDays { .. } => "clear_days",
            Self::Finalize { .. } => "finalize",
        }
    }
}

/// What a pending write is locking.
///
/// A day write replaces all of the participant's blocks starting on that
/// day, so it conflicts with any single-block write of theirs on the same
/// day, in either order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WriteTarget {
    Block {
        id: BlockId,
        owner: ParticipantId,
        day: NaiveDate,
    },
    Day(ParticipantId, NaiveDate),
    Event(EventId),
}

impl WriteTarget {
    /// Target for a write to `block`.
    pub fn block(block: &AvailabilityBlock) -> Self {
        Self::Block {
            id: block.id.clone(),
            owner: block.participant_id.clone(),
            day: block.interval.day(),
        }
    }

    pub fn conflicts_with(&self, other: &WriteTarget) -> bool {
        match (self, other) {
            (Self::Block { id: a, .. }, Self::Block { id: b, .. }) => a == b,
            (Self::Day(p, d), Self::Day(q, e)) => p == q && d == e,
            (Self::Block { owner, day, .. }, Self::Day(p, d))
            | (Self::Day(p, d), Self::Block { owner, day, .. }) => owner == p && day == d,
            (Self::Event(a), Self::Event(b)) => a == b,
            _ => false,
        }
    }
}

/// In-flight write targets. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct PendingWrites {
    inner: Arc<Mutex<Vec<WriteTarget>>>,
}

impl PendingWrites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim every target or none of them.
    ///
    /// # Errors
    /// `WriteInFlight` naming the first busy target.
    pub fn try_acquire(&self, targets: Vec<WriteTarget>) -> Result<PendingGuard> {
        let mut inner = self.inner.lock();
        if let Some(busy) = inner
            .iter()
            .find(|held| targets.iter().any(|t| t.conflicts_with(held)))
        {
            return Err(WhenlyError::WriteInFlight(format!("{busy:?} is still saving")));
        }
        inner.extend(targets.iter().cloned());
        Ok(PendingGuard {
            pending: self.clone(),
            targets,
        })
    }

    /// True while a write to this exact block is in flight.
    pub fn is_block_pending(&self, id: &BlockId) -> bool {
        self.inner
            .lock()
            .iter()
            .any(|t| matches!(t, WriteTarget::Block { id: held, .. } if held == id))
    }

    pub fn is_day_pending(&self, participant: &ParticipantId, day: NaiveDate) -> bool {
        self.inner
            .lock()
            .iter()
            .any(|t| matches!(t, WriteTarget::Day(p, d) if p == participant && *d == day))
    }

    /// True when any in-flight write touches `block`, including a replace of
    /// its owner's day.
    pub fn is_locked(&self, block: &AvailabilityBlock) -> bool {
        let target = WriteTarget::block(block);
        self.inner.lock().iter().any(|held| held.conflicts_with(&target))
    }

    pub fn is_idle(&self) -> bool {
        self.inner.lock().is_empty()
    }

    fn release(&self, targets: &[WriteTarget]) {
        let mut inner = self.inner.lock();
        for target in targets {
            if let Some(pos) = inner.iter().position(|held| held == target) {
                inner.swap_remove(pos);
            }
        }
    }
}

/// Releases its targets when dropped.
#[derive(Debug)]
pub struct PendingGuard {
    pending: PendingWrites,
    targets: Vec<WriteTarget>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.pending.release(&self.targets);
    }
}

/// Availability service
pub struct AvailabilityService {
    repository: Arc<dyn AvailabilityRepository>,
    pending: PendingWrites,
}

impl AvailabilityService {
    pub fn new(repository: Arc<dyn AvailabilityRepository>) -> Self {
        Self {
            repository,
            pending: PendingWrites::new(),
        }
    }

    /// Share an existing pending set, e.g. one the UI already renders from.
    pub fn with_pending(mut self, pending: PendingWrites) -> Self {
        self.pending = pending;
        self
    }

    pub fn pending(&self) -> &PendingWrites {
        &self.pending
    }

    /// Fetch the event's blocks and keep those starting on `day`.
    pub async fn load_day(
        &self,
        event: &EventId,
        day: NaiveDate,
        viewer: Option<ParticipantId>,
    ) -> Result<DayBlocks> {
        let blocks = self.repository.blocks_for_event(event).await?;
        Ok(DayBlocks::new(day, viewer, blocks))
    }

    pub async fn load_event(&self, event: &EventId) -> Result<Vec<AvailabilityBlock>> {
        self.repository.blocks_for_event(event).await
    }

    /// Persist `commit`.
    ///
    /// # Errors
    /// - `InvalidGeometry` for a block shorter than the minimum (no write is
    ///   attempted)
    /// - `WriteInFlight` when a target already has a write pending
    /// - whatever the repository returns; logged and passed through
    pub async fn commit(&self, commit: Commit) -> Result<()> {
        validate(&commit)?;
        let kind = commit.kind();
        let _guard = self.pending.try_acquire(commit.targets())?;
        debug!(kind, "commit started");

        let result = self.apply(commit).await;
        match &result {
            Ok(()) => info!(kind, "commit persisted"),
            Err(err) => warn!(kind, error = %err, "commit failed; awaiting refresh"),
        }
        result
    }

    async fn apply(&self, commit: Commit) -> Result<()> {
        match commit {
            Commit::CreateBlock {
                participant,
                event,
                mut existing,
                interval,
            } => {
                existing.push(interval);
                existing.sort();
                self.repository
                    .persist_blocks(&participant, &event, interval.day(), &existing)
                    .await
            }
            Commit::UpdateBlock { edit, .. } => {
                self.repository
                    .update_block(&edit.block_id, edit.interval)
                    .await
            }
            Commit::DeleteBlock { id, .. } => self.repository.delete_block(&id).await,
            Commit::MarkAllDay {
                participant,
                event,
                days,
                window,
            } => {
                for day in days {
                    self.repository
                        .persist_blocks(&participant, &event, day, &[window.on(day)])
                        .await?;
                }
                Ok(())
            }
            Commit::ClearDays { participant, days } => {
                for day in days {
                    self.repository
                        .delete_blocks_for_day(&participant, day)
                        .await?;
                }
                Ok(())
            }
            Commit::Finalize { event, slot } => self.repository.finalize_event(&event, slot).await,
        }
    }
}

fn validate(commit: &Commit) -> Result<()> {
    let interval = match commit {
        Commit::CreateBlock { interval, .. } => interval,
        Commit::UpdateBlock { edit, .. } => &edit.interval,
        _ => return Ok(()),
    };
    if meets_minimum(interval, MIN_BLOCK_MINUTES) {
        Ok(())
    } else {
        Err(WhenlyError::InvalidGeometry(format!(
            "{interval} is shorter than {MIN_BLOCK_MINUTES} minutes"
        )))
    }
}
