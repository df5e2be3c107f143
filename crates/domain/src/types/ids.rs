//! Identifier newtypes
//!
//! Ids are opaque strings owned by the storage layer. Locally created blocks
//! get a UUIDv7 so they sort by creation time.

use std::fmt;

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "ts-gen", derive(TS))]
        #[cfg_attr(feature = "ts-gen", ts(export))]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Availability row id.
    BlockId
);
string_id!(
    /// Participant id within one event.
    ParticipantId
);
string_id!(
    /// Event id.
    EventId
);

impl BlockId {
    /// Fresh time-ordered id for a block created locally.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

impl ParticipantId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}
