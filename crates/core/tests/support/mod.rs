//! Shared test helpers for `whenly-core` integration tests.
//!
//! Recording mocks for the availability ports plus small fixture builders,
//! so the flow tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod repositories;

use chrono::{NaiveDate, NaiveDateTime};
use whenly_domain::{AvailabilityBlock, BlockId, ParticipantId, TimeInterval};

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).expect("valid date")
}

pub fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
    day(d).and_hms_opt(h, m, 0).expect("valid time")
}

pub fn interval(d: u32, (sh, sm): (u32, u32), (eh, em): (u32, u32)) -> TimeInterval {
    TimeInterval::new(at(d, sh, sm), at(d, eh, em)).expect("valid interval")
}

pub fn block(id: &str, owner: &str, interval: TimeInterval) -> AvailabilityBlock {
    AvailabilityBlock {
        id: BlockId::from(id),
        participant_id: ParticipantId::from(owner),
        participant_name: owner.to_string(),
        participant_color: None,
        interval,
    }
}
