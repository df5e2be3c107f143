//! Selection state machines
//!
//! [`DaySelection`] drives the month grid, [`BlockEditor`] the day grid.
//! Dialog state for the two modal paths lives in [`dialog`].

pub mod block_edit;
pub mod day_selection;
pub mod dialog;

pub use block_edit::{BlockEditor, CreateDrag, DragPoint, EditCommit, EditSession};
pub use day_selection::DaySelection;
pub use dialog::{AddBlockDialog, EditDialog, FinalizeDialog, TimeChoice};
