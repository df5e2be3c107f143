//! Per-day block snapshot

use chrono::NaiveDate;
use whenly_domain::{AvailabilityBlock, BlockId, BlockSpan, ParticipantId, TimeInterval};

use crate::geometry::LaneLayout;

/// Blocks that start on one day, as last fetched, plus the viewer.
///
/// Read-only input to the gesture machines. Only the viewer's own subset is
/// used for collision checks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DayBlocks {
    day: NaiveDate,
    viewer: Option<ParticipantId>,
    blocks: Vec<AvailabilityBlock>,
}

impl DayBlocks {
    /// Keep the blocks from `all` that start on `day`, ordered by start.
    pub fn new(
        day: NaiveDate,
        viewer: Option<ParticipantId>,
        all: impl IntoIterator<Item = AvailabilityBlock>,
    ) -> Self {
        let mut blocks: Vec<_> = all.into_iter().filter(|b| b.interval.day() == day).collect();
        blocks.sort_by_key(|b| b.interval.start);
        Self { day, viewer, blocks }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn viewer(&self) -> Option<&ParticipantId> {
        self.viewer.as_ref()
    }

    pub fn blocks(&self) -> &[AvailabilityBlock] {
        &self.blocks
    }

    pub fn own_blocks(&self) -> impl Iterator<Item = &AvailabilityBlock> + '_ {
        self.blocks
            .iter()
            .filter(move |b| self.viewer.as_ref() == Some(&b.participant_id))
    }

    /// The viewer's collision set; empty without a viewer.
    pub fn own_spans(&self) -> Vec<BlockSpan> {
        self.own_blocks().map(AvailabilityBlock::span).collect()
    }

    pub fn own_intervals(&self) -> Vec<TimeInterval> {
        self.own_blocks().map(|b| b.interval).collect()
    }

    pub fn find(&self, id: &BlockId) -> Option<&AvailabilityBlock> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn is_own(&self, id: &BlockId) -> bool {
        self.own_blocks().any(|b| &b.id == id)
    }

    pub fn lanes(&self, overlap_percent: f64) -> LaneLayout {
        LaneLayout::for_blocks(&self.blocks, overlap_percent)
    }
}
