//! Positional geometry for the day grid

pub mod grid;
pub mod lanes;

pub use grid::{BlockHit, BlockRect, DayGrid, Edge, HourLabel, PlacedBlock, PreviewRect};
pub use lanes::{LaneLayout, LanePlacement};
