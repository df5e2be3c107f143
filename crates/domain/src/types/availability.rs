//! Availability blocks

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::constants::DEFAULT_PARTICIPANT_COLOR;
use crate::types::{BlockId, ParticipantId, TimeInterval};

/// A persisted interval owned by one participant within one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityBlock {
    pub id: BlockId,
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub participant_color: Option<String>,
    #[serde(flatten)]
    pub interval: TimeInterval,
}

impl AvailabilityBlock {
    pub fn start(&self) -> NaiveDateTime {
        self.interval.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.interval.end
    }

    /// Collision-set view of this block.
    pub fn span(&self) -> BlockSpan {
        BlockSpan {
            id: self.id.clone(),
            interval: self.interval,
        }
    }

    /// Render colour, falling back to the default blue.
    pub fn color(&self) -> &str {
        self.participant_color
            .as_deref()
            .unwrap_or(DEFAULT_PARTICIPANT_COLOR)
    }

    pub fn is_owned_by(&self, participant: &ParticipantId) -> bool {
        &self.participant_id == participant
    }
}

/// Id plus interval; the unit collision checks operate on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpan {
    pub id: BlockId,
    pub interval: TimeInterval,
}

impl BlockSpan {
    pub fn new(id: impl Into<BlockId>, interval: TimeInterval) -> Self {
        Self {
            id: id.into(),
            interval,
        }
    }
}
