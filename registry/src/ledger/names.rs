//! # Name Ledger
//!
//! The primary durable record: name hash → owner and expiration.
//!
//! A name can be in three states, and the distinction matters:
//!
//! - **Vacant** — no entry in the map. Never registered, or voluntarily
//!   deleted.
//! - **Live** — entry present, expiration in the future. Untouchable by
//!   anyone but the owner.
//! - **Expired but present** — entry present, expiration in the past.
//!   Logically vacant (anyone may claim it through the protocol), but the
//!   record still names its last owner until a new registration overwrites
//!   it. That lingering owner can still renew or delete — a deliberate
//!   grace mechanic, not an oversight.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hash::NameHash;

/// A name's ownership record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    /// The current owner. An expired record still names its last owner.
    pub owner: String,
    /// When the registration's lock runs out.
    pub expires_at: DateTime<Utc>,
}

impl NameRecord {
    /// Whether the registration is still live (lock not yet run out) at
    /// `now`. A record whose expiration equals `now` is no longer live.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// All name records, keyed by canonical name hash.
#[derive(Debug, Default)]
pub struct NameLedger {
    records: HashMap<NameHash, NameRecord>,
}

impl NameLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a record by name hash, expired entries included.
    pub fn get(&self, name: &NameHash) -> Option<&NameRecord> {
        self.records.get(name)
    }

    /// Writes a record, overwriting any prior entry (the displacement
    /// path runs through here).
    pub fn put(&mut self, name: NameHash, record: NameRecord) {
        self.records.insert(name, record);
    }

    /// Removes a record entirely, returning it. This is the "zeroed"
    /// state — the next lookup sees full vacancy.
    pub fn remove(&mut self, name: &NameHash) -> Option<NameRecord> {
        self.records.remove(name)
    }

    /// Updates the expiration of an existing record in place. Returns
    /// `false` if no record exists for the hash.
    pub fn set_expiration(&mut self, name: &NameHash, expires_at: DateTime<Utc>) -> bool {
        match self.records.get_mut(name) {
            Some(record) => {
                record.expires_at = expires_at;
                true
            }
            None => false,
        }
    }

    /// Number of present records, expired ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
