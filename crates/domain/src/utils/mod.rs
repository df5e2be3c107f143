//! Formatting and lookup helpers

pub mod palette;
pub mod time_options;
