//! # Reservation Ledger
//!
//! Maps commitment hashes to pending reservations. A reservation is leaf
//! data: written once, read at reveal time, and then simply ignored. Stale
//! entries are never garbage-collected — a lapsed reservation's slot is
//! reclaimed by whoever overwrites it next, not by a sweeper.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::hash::CommitmentHash;

/// A pending commitment: who reserved the slot, and when.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// The address that made the commitment.
    pub committer: String,
    /// When the commitment was recorded.
    pub committed_at: DateTime<Utc>,
}

impl Reservation {
    /// The last instant at which this reservation can still be finalized.
    pub fn deadline(&self) -> DateTime<Utc> {
        self.committed_at + config::reservation_window()
    }

    /// The first instant at which this reservation may be revealed.
    pub fn revealable_at(&self) -> DateTime<Utc> {
        self.committed_at + config::min_reveal_delay()
    }

    /// Whether the reservation window has lapsed at `now`. Once lapsed,
    /// the slot is free for anyone — including a different committer — to
    /// overwrite.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.deadline()
    }

    /// Whether `now` falls inside the finalization window: at or after
    /// the reveal delay, at or before the deadline. Both bounds inclusive.
    pub fn finalizable_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.revealable_at() && now <= self.deadline()
    }
}

/// All pending reservations, keyed by commitment hash.
#[derive(Debug, Default)]
pub struct ReservationBook {
    entries: HashMap<CommitmentHash, Reservation>,
}

impl ReservationBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the reservation for a commitment hash, live or stale.
    pub fn get(&self, commitment: &CommitmentHash) -> Option<&Reservation> {
        self.entries.get(commitment)
    }

    /// Returns `true` if an unexpired reservation occupies this slot
    /// at `now`.
    pub fn is_occupied(&self, commitment: &CommitmentHash, now: DateTime<Utc>) -> bool {
        self.entries
            .get(commitment)
            .is_some_and(|r| !r.is_expired(now))
    }

    /// Writes a reservation, overwriting whatever was there. The caller
    /// (the protocol) is responsible for checking occupancy first.
    pub fn put(&mut self, commitment: CommitmentHash, reservation: Reservation) {
        self.entries.insert(commitment, reservation);
    }

    /// Number of entries in the book, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the book holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn reservation_at(when: DateTime<Utc>) -> Reservation {
        Reservation {
            committer: "alice".into(),
            committed_at: when,
        }
    }

    #[test]
    fn finalization_window_bounds_are_inclusive() {
        let r = reservation_at(t0());

        // One second early: no.
        assert!(!r.finalizable_at(t0() + Duration::minutes(5) - Duration::seconds(1)));
        // Exactly at the reveal delay: yes.
        assert!(r.finalizable_at(t0() + Duration::minutes(5)));
        // Exactly at the deadline: yes.
        assert!(r.finalizable_at(t0() + Duration::minutes(10)));
        // One second past: no.
        assert!(!r.finalizable_at(t0() + Duration::minutes(10) + Duration::seconds(1)));
    }

    #[test]
    fn expiry_is_strictly_after_the_deadline() {
        let r = reservation_at(t0());
        assert!(!r.is_expired(r.deadline()));
        assert!(r.is_expired(r.deadline() + Duration::seconds(1)));
    }

    #[test]
    fn occupancy_tracks_expiry() {
        let mut book = ReservationBook::new();
        let hash = [9u8; 32];
        book.put(hash, reservation_at(t0()));

        assert!(book.is_occupied(&hash, t0() + Duration::minutes(9)));
        assert!(!book.is_occupied(&hash, t0() + Duration::minutes(11)));
        // Stale entries remain readable — they're ignored, not deleted.
        assert!(book.get(&hash).is_some());
        assert_eq!(book.len(), 1);
        assert!(!book.is_empty());
    }

    #[test]
    fn unknown_hash_is_unoccupied() {
        let book = ReservationBook::new();
        assert!(!book.is_occupied(&[1u8; 32], t0()));
        assert!(book.get(&[1u8; 32]).is_none());
    }
}
