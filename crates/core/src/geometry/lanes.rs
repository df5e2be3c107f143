//! Side-by-side lanes for overlapping participants

use serde::Serialize;
use whenly_domain::{AvailabilityBlock, ParticipantId};

/// Horizontal placement as percentages of the grid width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LanePlacement {
    pub left_percent: f64,
    pub width_percent: f64,
}

impl LanePlacement {
    pub const FULL: Self = Self {
        left_percent: 0.0,
        width_percent: 100.0,
    };
}

/// Participant order for one day, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaneLayout {
    order: Vec<ParticipantId>,
    overlap_percent: f64,
}

impl LaneLayout {
    pub fn for_blocks(blocks: &[AvailabilityBlock], overlap_percent: f64) -> Self {
        let mut order: Vec<ParticipantId> = Vec::new();
        for block in blocks {
            if !order.contains(&block.participant_id) {
                order.push(block.participant_id.clone());
            }
        }
        Self {
            order,
            overlap_percent,
        }
    }

    pub fn lane_count(&self) -> usize {
        self.order.len()
    }

    /// Lane of `participant`. A lone participant, or one not present in the
    /// day, gets the full width.
    pub fn lane_for(&self, participant: &ParticipantId) -> LanePlacement {
        let count = self.order.len();
        let Some(index) = self.order.iter().position(|p| p == participant) else {
            return LanePlacement::FULL;
        };
        if count <= 1 {
            return LanePlacement::FULL;
        }
        let width = 100.0 / count as f64 + self.overlap_percent;
        let left = index as f64 * (100.0 - width) / (count - 1) as f64;
        LanePlacement {
            left_percent: left,
            width_percent: width,
        }
    }
}
