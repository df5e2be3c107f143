//! Mode enums shared between the machines and the UI

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::impl_domain_status_conversions;

/// Which part of a block an edit session drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum EditMode {
    Move,
    ResizeTop,
    ResizeBottom,
}

impl_domain_status_conversions!(EditMode {
    Move => "move",
    ResizeTop => "resize-top",
    ResizeBottom => "resize-bottom",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Month,
    Day,
}

impl_domain_status_conversions!(CalendarView {
    Month => "month",
    Day => "day",
});

/// How an event's candidate dates were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum DateMode {
    Range,
    Specific,
}

impl_domain_status_conversions!(DateMode {
    Range => "range",
    Specific => "specific",
});
