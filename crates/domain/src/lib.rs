//! # Whenly Domain
//!
//! Data types shared by every layer of the availability-selection engine.
//!
//! This crate contains:
//! - Interval and availability block types
//! - Event scheduling metadata (valid dates, visible time window)
//! - Domain error types and Result definitions
//! - Configuration structures and domain constants
//!
//! ## Architecture
//! - Depends only on `whenly-common` for error classification
//! - No I/O, no gesture logic

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::palette::participant_color;
pub use utils::time_options::{
    finalize_time_options, format_time, format_time_short, generate_time_options,
};
