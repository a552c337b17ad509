//! # Credit Ledger
//!
//! Recoverable value owed to displaced owners. When a new registration
//! overwrites an expired record, the old owner's fee doesn't get wired to
//! them inline — it lands here, and they pull it out on their own schedule.
//!
//! Accrual is monotonic (displacements only ever add) and withdrawal is
//! all-or-nothing (taking a credit zeroes it). All arithmetic is checked;
//! wrapping arithmetic and money do not mix.

use std::collections::HashMap;

use crate::error::RegistryError;

/// Recoverable balances, keyed by address.
#[derive(Debug, Default)]
pub struct CreditLedger {
    balances: HashMap<String, u64>,
}

impl CreditLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the credit currently owed to `address`.
    pub fn balance_of(&self, address: &str) -> u64 {
        self.balances.get(address).copied().unwrap_or(0)
    }

    /// Accrues `amount` to an address's credit.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AmountOverflow`] if the accrual would
    /// overflow, leaving the balance unchanged.
    pub fn accrue(&mut self, address: &str, amount: u64) -> Result<(), RegistryError> {
        let entry = self.balances.entry(address.to_string()).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or(RegistryError::AmountOverflow)?;
        Ok(())
    }

    /// Zeroes an address's credit and returns what was owed. Returns 0
    /// for addresses with no credit — that's a no-op, not an error.
    pub fn take(&mut self, address: &str) -> u64 {
        self.balances.remove(address).unwrap_or(0)
    }

    /// Restores a previously taken credit. The rollback path for a failed
    /// withdrawal transfer; restoring cannot overflow because the amount
    /// was representable moments ago and accrual in between is impossible
    /// inside a single guarded call.
    pub fn restore(&mut self, address: &str, amount: u64) {
        if amount > 0 {
            *self.balances.entry(address.to_string()).or_insert(0) += amount;
        }
    }

    /// Sum of all unclaimed credits. Used by the solvency audit.
    pub fn total_outstanding(&self) -> u64 {
        self.balances.values().sum()
    }
}
