//! In-memory adapters for the availability ports.

pub mod store;

pub use store::InMemoryAvailabilityStore;
