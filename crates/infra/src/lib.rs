//! # Whenly Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Configuration loading (TOML/JSON file plus `WHENLY_*` overrides)
//! - An in-memory availability store implementing the repository and
//!   remote change feed ports
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `whenly-core`
//! - Contains all "impure" code (file system, environment, global
//!   subscriber)

pub mod config;
pub mod memory;
pub mod observability;

// Re-export commonly used items
pub use memory::InMemoryAvailabilityStore;
pub use observability::init_tracing;
