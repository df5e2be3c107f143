//! Pointer and gesture adapters
//!
//! Device events are normalised into [`PointerEvent`] once at the input
//! boundary. The adapters then route them into the selection machines and
//! report what the host should do next (persist, open a dialog, install or
//! remove window-level listeners).

pub mod grid_adapter;
pub mod long_press;
pub mod month_adapter;
pub mod pointer;

pub use grid_adapter::{DayGridGestures, GestureOutcome, GestureResponse, GridContext, GridInput, GridTarget, Key};
pub use long_press::{LongPress, LongPressState};
pub use month_adapter::{MonthContext, MonthGestures, MonthInput, MonthOutcome, MonthResponse};
pub use pointer::{DeviceCapabilities, PointerEvent, PointerPosition};

/// Whether the host should bind window-level move/release listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerChange {
    #[default]
    Unchanged,
    Install,
    Remove,
}
