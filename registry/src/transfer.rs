//! # Value Transfer Seam
//!
//! The registry holds value (registration fees) and sometimes pays it
//! back out: deletion refunds and credit withdrawals. How value actually
//! moves is not the registry's business — it goes through the
//! [`ValueTransfer`] trait, and whatever sits behind it (a settlement
//! engine, a chain adapter, a test double) does the moving.
//!
//! The registry never retries a failed transfer. A rejection rolls the
//! whole call back and surfaces as `TransferFailed`; the caller retries
//! the operation when they've sorted out whatever the sink disliked.

use std::collections::HashMap;

use parking_lot::Mutex;
use thiserror::Error;

/// A rejected outbound transfer, with the sink's stated reason.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct TransferError {
    /// Why the sink refused the transfer.
    pub reason: String,
}

impl TransferError {
    /// Creates a transfer error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The outbound payment path for refunds and credit withdrawals.
///
/// Implementations must be all-or-nothing per call: either the full
/// amount reaches the recipient, or an error comes back and nothing
/// moved. The registry depends on that to keep its solvency accounting
/// honest.
pub trait ValueTransfer: Send + Sync {
    /// Sends `amount` smallest units to `to`.
    fn transfer(&self, to: &str, amount: u64) -> Result<(), TransferError>;
}

/// An in-memory bank: account balances in a map.
///
/// The default sink for local use and the workhorse of the test suite.
/// Receiving a transfer credits the recipient's balance; nothing ever
/// debits, because the registry only pushes value outward through this
/// seam.
#[derive(Debug, Default)]
pub struct InMemoryBank {
    balances: Mutex<HashMap<String, u64>>,
}

impl InMemoryBank {
    /// Creates an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the balance credited to `account` so far.
    pub fn balance_of(&self, account: &str) -> u64 {
        self.balances.lock().get(account).copied().unwrap_or(0)
    }
}

impl ValueTransfer for InMemoryBank {
    fn transfer(&self, to: &str, amount: u64) -> Result<(), TransferError> {
        let mut balances = self.balances.lock();
        let entry = balances.entry(to.to_string()).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| TransferError::new("recipient balance overflow"))?;
        Ok(())
    }
}
