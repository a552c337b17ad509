//! # The Three Ledgers
//!
//! All durable registry state, split by concern:
//!
//! - [`reservations`] — commitment hash → who committed, and when.
//! - [`names`] — name hash → current owner and expiration.
//! - [`credits`] — address → recoverable value owed.
//!
//! The ledgers are dumb on purpose. They know their own data shapes and
//! expiry predicates, but the rules about who may mutate what, in which
//! order, for how much money — all of that lives in the registration
//! protocol ([`crate::registry`]), which is the ledgers' only caller.

pub mod credits;
pub mod names;
pub mod reservations;

pub use credits::CreditLedger;
pub use names::{NameLedger, NameRecord};
pub use reservations::{Reservation, ReservationBook};
