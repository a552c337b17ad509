// Copyright (c) 2026 Holdfast Labs. MIT License.
// See LICENSE for details.

//! # Holdfast — a commit/reveal name registry
//!
//! Holdfast is a pay-to-register name registry with front-running
//! resistance. Registering a name is a two-step dance:
//!
//! 1. **Reserve** — publish a salted hash of the name you want. Nobody can
//!    tell which name it is, so nobody can snipe it from you.
//! 2. **Register** — after a mandatory reveal delay (and before the
//!    reservation lapses), reveal the name and salt and pay a fee
//!    proportional to the name's length.
//!
//! Registrations are not forever. Each one locks the name for a fixed
//! period; once that passes, anyone can claim the name through the same
//! two-step protocol. The displaced owner doesn't get paid inline — their
//! fee becomes a *credit* they can withdraw whenever they like. Decoupling
//! the payout from the takeover keeps every transfer path reentrancy-safe.
//!
//! ## Modules
//!
//! - **config** — Every policy constant: lengths, prices, timing windows.
//! - **error** — The full failure taxonomy. Every failure aborts the call.
//! - **hash** — BLAKE3 commitment and name hashing, domain-separated.
//! - **time** — Clock abstraction so timing windows are actually testable.
//! - **events** — Observable notifications emitted by successful calls.
//! - **transfer** — The external value-transfer seam (and an in-memory bank).
//! - **ledger** — The three ledgers: reservations, names, credits.
//! - **registry** — The registration protocol tying it all together.
//!
//! ## Design Philosophy
//!
//! 1. All monetary arithmetic is checked. Money does not wrap.
//! 2. Every call commits fully or not at all — partial state is a bug.
//! 3. Value conservation is auditable: held value always equals locked
//!    fees plus unclaimed credits.
//! 4. If it touches money, it has tests. Plural.

pub mod config;
pub mod error;
pub mod events;
pub mod hash;
pub mod ledger;
pub mod registry;
pub mod time;
pub mod transfer;

pub use error::RegistryError;
pub use events::RegistryEvent;
pub use hash::{commitment_hash, name_hash, random_salt, CommitmentHash, NameHash, Salt};
pub use registry::Registry;
