//! # Registry Notifications
//!
//! Observable events emitted by successful registry operations. The
//! registry itself never consumes these — they exist for external
//! observers (indexers, auditors, UIs) watching the namespace change.
//!
//! Atomicity extends to the event log: a failed call emits nothing, even
//! if it staged events before failing. In particular, a registration that
//! records a displacement and then dies on the payment check takes the
//! displacement notification down with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hash::CommitmentHash;

/// An observable state change in the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A commitment slot was reserved.
    ReservationMade {
        /// The reserved commitment hash.
        commitment: CommitmentHash,
        /// Who reserved it.
        reserver: String,
        /// Last instant at which this reservation can be finalized.
        deadline: DateTime<Utc>,
    },

    /// A name was registered (or re-registered after expiry).
    NameRegistered {
        /// The revealed name.
        name: String,
        /// The new owner.
        owner: String,
        /// When this registration's lock runs out.
        expires_at: DateTime<Utc>,
    },

    /// An expired prior registration was overwritten. The displaced
    /// owner's fee is now a recoverable credit.
    OwnerDisplaced {
        /// The name that changed hands.
        name: String,
        /// The owner who was displaced.
        displaced: String,
    },

    /// A registration's lock was extended by its owner.
    RegistrationRenewed {
        /// The renewed name.
        name: String,
        /// The (unchanged) owner.
        owner: String,
        /// The new expiration.
        expires_at: DateTime<Utc>,
    },

    /// A registration was voluntarily deleted and its fee refunded.
    RegistrationDeleted {
        /// The vacated name.
        name: String,
    },
}
