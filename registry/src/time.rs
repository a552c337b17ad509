//! # Time Source Abstraction
//!
//! Every timing rule in the registry — reveal delays, reservation windows,
//! lock expirations — is a comparison against "now". Reading the wall
//! clock directly would make those rules untestable short of sleeping
//! through a ten-week lock, so the registry reads time through a trait.
//!
//! Production uses [`SystemTimeSource`]. Tests use [`ManualTimeSource`]
//! and move time by hand.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// A source of the current time.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A hand-cranked clock for deterministic tests.
///
/// Starts at a fixed instant and only moves when told to. Shared freely —
/// interior mutability means one `Arc<ManualTimeSource>` can drive both
/// the registry under test and the test's own assertions.
#[derive(Debug)]
pub struct ManualTimeSource {
    now: Mutex<DateTime<Utc>>,
}

impl ManualTimeSource {
    /// Creates a manual clock starting at the given instant.
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Advances the clock by the given duration.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now = *now + by;
    }

    /// Jumps the clock to an absolute instant. Going backwards is allowed
    /// — some tests need to check behavior around boundary instants from
    /// both sides.
    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock() = to;
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
