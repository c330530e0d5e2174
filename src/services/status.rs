//! Display-status derivation for bookings.
//!
//! A booking's display status (upcoming / in progress / completed /
//! canceled) is derived, never stored: it falls out of comparing an
//! explicit `now` against the booking's constituent slots and their
//! persisted statuses. The clock is always a parameter so tests can inject
//! a frozen instant.

use crate::api::{BookingId, BookingSlot, BookingStatus};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Derived classification of a booking for display.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Upcoming,
    InProgress,
    Completed,
    Canceled,
}

/// Classify a booking from its constituent slots at instant `now`.
///
/// Priority order: canceled (from data) beats everything; then completed
/// when every slot is `done`; then in-progress when `now` lies inside any
/// slot's date+time range (half-open); then upcoming when any slot starts
/// in the future; otherwise completed (all slots elapsed even if the
/// provider has not flipped them to `done` yet).
pub fn classify(slots: &[BookingSlot], now: NaiveDateTime) -> DisplayStatus {
    if slots.iter().any(|s| s.status == BookingStatus::Canceled) {
        return DisplayStatus::Canceled;
    }
    if !slots.is_empty() && slots.iter().all(|s| s.status == BookingStatus::Done) {
        return DisplayStatus::Completed;
    }
    if slots
        .iter()
        .any(|s| s.starts_at() <= now && now < s.ends_at())
    {
        return DisplayStatus::InProgress;
    }
    if slots.iter().any(|s| s.starts_at() > now) {
        return DisplayStatus::Upcoming;
    }
    DisplayStatus::Completed
}

/// Classify a single-slot booking.
pub fn classify_slot(slot: &BookingSlot, now: NaiveDateTime) -> DisplayStatus {
    classify(std::slice::from_ref(slot), now)
}

/// Per-request memoization of classification results.
///
/// Scoped to one top-level request: the cache pins the `now` it was built
/// with, so results can never leak across different instants or booking
/// snapshots. Drop it when the request ends.
#[derive(Debug)]
pub struct StatusCache {
    now: NaiveDateTime,
    memo: HashMap<BookingId, DisplayStatus>,
}

impl StatusCache {
    /// Create a cache for one request evaluated at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now,
            memo: HashMap::new(),
        }
    }

    /// The instant this cache classifies against.
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Classify a booking, reusing the memoized result on repeat lookups
    /// of the same booking id within this request.
    pub fn classify(&mut self, booking_id: BookingId, slots: &[BookingSlot]) -> DisplayStatus {
        let now = self.now;
        *self
            .memo
            .entry(booking_id)
            .or_insert_with(|| classify(slots, now))
    }
}
