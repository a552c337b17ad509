//! # Registry Error Taxonomy
//!
//! Every way a registry call can fail, in one place. All failures are
//! synchronous and terminal for the current call: the registry either
//! commits every effect of an operation or none of them, and a returned
//! error is a guarantee that no ledger changed.
//!
//! One variant deserves a note: [`RegistryError::InvalidReservation`]
//! deliberately conflates "not your reservation", "too early to reveal",
//! and "reservation lapsed" into a single opaque failure. Distinguishing
//! them would tell a front-runner exactly how their probe failed, which is
//! information they haven't paid for. Don't split it.

use thiserror::Error;

use crate::hash::CommitmentHash;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An unexpired reservation already occupies this commitment slot.
    /// The slot frees up once the holder's reservation window lapses.
    #[error("commitment {} is already reserved", hex::encode(.commitment))]
    HashAlreadyReserved {
        /// The contested commitment hash.
        commitment: CommitmentHash,
    },

    /// The name's byte length is outside the registrable bounds.
    #[error("invalid name length {actual}: must be between {min} and {max} bytes")]
    InvalidLength {
        /// Byte length of the rejected name.
        actual: usize,
        /// Minimum registrable length.
        min: usize,
        /// Maximum registrable length.
        max: usize,
    },

    /// The reservation is missing, expired, not yet revealable, or owned
    /// by someone else. Intentionally indistinguishable — see module docs.
    #[error("reservation is missing, not yours, or outside its timing window")]
    InvalidReservation,

    /// The revealed `(name, salt)` pair does not hash to the commitment.
    #[error(
        "commitment mismatch: (name, salt) hashes to {}, reservation holds {}",
        hex::encode(.expected),
        hex::encode(.actual)
    )]
    InvalidHash {
        /// The hash recomputed from the revealed name and salt.
        expected: CommitmentHash,
        /// The commitment hash the caller supplied.
        actual: CommitmentHash,
    },

    /// The name is currently held by an unexpired registration. A live
    /// name can never be reclaimed, valid reservation or not.
    #[error("name {name:?} is already registered and has not expired")]
    NameAlreadyRegistered {
        /// The contested name.
        name: String,
    },

    /// The supplied payment does not equal the required fee exactly.
    /// The registry makes no change — overpayment is not generosity,
    /// it's a mistake.
    #[error("invalid payment: required {required}, supplied {supplied}")]
    InvalidValue {
        /// The exact fee this operation requires.
        required: u64,
        /// What the caller actually sent.
        supplied: u64,
    },

    /// The caller is not the record's current owner. An expired record
    /// still names its last owner until someone overwrites it.
    #[error("caller {caller:?} is not the owner of this name (owner: {owner:?})")]
    NotNameOwner {
        /// The record's current owner. Empty if the record is vacant.
        owner: String,
        /// The caller who was rejected.
        caller: String,
    },

    /// The external value transfer was rejected. All state changes from
    /// this call have been rolled back; the caller may retry later.
    #[error("external value transfer failed: {reason}")]
    TransferFailed {
        /// The transfer sink's stated reason.
        reason: String,
    },

    /// A state-mutating call arrived while another call on this registry
    /// was mid-transfer. Reentrant calls fail outright; they never block.
    #[error("reentrant call rejected: registry is locked by an in-flight operation")]
    ReentrantCall,

    /// Arithmetic overflow in a monetary operation.
    ///
    /// If you're hitting this, someone is trying to accrue more than
    /// 18.4 quintillion smallest units. That's either a bug or an attack.
    #[error("amount overflow: operation would exceed representable value")]
    AmountOverflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_hex_commitments() {
        let err = RegistryError::HashAlreadyReserved {
            commitment: [0xab; 32],
        };
        let msg = err.to_string();
        assert!(msg.contains("abab"));
    }

    #[test]
    fn invalid_reservation_reveals_nothing() {
        // The message must not hint at which precondition failed.
        let msg = RegistryError::InvalidReservation.to_string();
        assert!(!msg.contains("early"));
        assert!(!msg.contains("late"));
    }

    #[test]
    fn invalid_value_reports_both_amounts() {
        let err = RegistryError::InvalidValue {
            required: 400_000,
            supplied: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("400000"));
        assert!(msg.contains("supplied 1"));
    }
}
