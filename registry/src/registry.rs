//! # The Registration Protocol
//!
//! [`Registry`] orchestrates the five public operations — reserve,
//! register, renew, delete, recover — over the three ledgers. This is
//! where every timing window, payment rule, and ownership check is
//! enforced.
//!
//! ## Atomicity
//!
//! Each operation commits fully or not at all. Most failures are
//! pre-mutation validation, so there is nothing to roll back; the two
//! places where a mutation precedes a possible failure — the displacement
//! credit written before the payment check, and the ledger changes made
//! before an external transfer — carry explicit rollback paths.
//!
//! ## Reentrancy
//!
//! Deletion refunds and credit withdrawals hand control to an external
//! transfer sink mid-call. The sink must not be able to re-enter the
//! registry while the call is in flight, so every mutating operation
//! starts by acquiring a call-scoped `AtomicBool` flag and fails with
//! `ReentrantCall` if it's already held. The state mutex is *never* held
//! across the sink call — only the flag is, so a well-behaved sink can't
//! deadlock and a hostile one can't mutate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config;
use crate::error::RegistryError;
use crate::events::RegistryEvent;
use crate::hash::{self, CommitmentHash, NameHash, Salt};
use crate::ledger::{CreditLedger, NameLedger, NameRecord, Reservation, ReservationBook};
use crate::time::{SystemTimeSource, TimeSource};
use crate::transfer::ValueTransfer;

// ---------------------------------------------------------------------------
// Solvency
// ---------------------------------------------------------------------------

/// A snapshot of the registry's value accounting.
///
/// The registry is solvent when the value it holds equals the fees backing
/// present name records plus every unclaimed credit. No operation may
/// create or destroy value outside the fee, refund, and withdrawal paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolvencyReport {
    /// Total value the registry currently holds.
    pub held: u64,
    /// Fees locked behind present name records (expired-but-present
    /// records included — their fee still backs a refund or a credit).
    pub locked_fees: u64,
    /// Sum of all unclaimed displacement credits.
    pub outstanding_credits: u64,
}

impl SolvencyReport {
    /// Whether held value exactly covers locked fees plus credits.
    pub fn balanced(&self) -> bool {
        self.held == self.locked_fees + self.outstanding_credits
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// All mutable registry state, behind one mutex.
struct RegistryState {
    reservations: ReservationBook,
    names: NameLedger,
    credits: CreditLedger,
    /// Total value held: fees paid in, minus refunds and withdrawals out.
    held: u64,
    /// Fees currently locked behind present name records.
    locked_fees: u64,
    /// Notifications from successful calls, awaiting drainage.
    events: Vec<RegistryEvent>,
}

/// The name registry: commit/reveal reservations, length-priced
/// registrations, expiry-based turnover, and recoverable displacement
/// credits.
///
/// All methods take `&self`; the registry serializes its own state access
/// internally. Value leaves through the [`ValueTransfer`] sink supplied at
/// construction; time comes from the [`TimeSource`].
pub struct Registry {
    state: Mutex<RegistryState>,
    /// Call-scoped mutual-exclusion flag shared by all mutating entry
    /// points. Held, not the mutex, across external transfers.
    busy: AtomicBool,
    clock: Arc<dyn TimeSource>,
    sink: Arc<dyn ValueTransfer>,
}

/// RAII release for the call-scoped flag. Dropping it on any exit path —
/// success, error, or panic — reopens the registry.
struct CallGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Registry {
    /// Creates a registry on the system clock.
    pub fn new(sink: Arc<dyn ValueTransfer>) -> Self {
        Self::with_time_source(sink, Arc::new(SystemTimeSource))
    }

    /// Creates a registry with an explicit time source.
    pub fn with_time_source(sink: Arc<dyn ValueTransfer>, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                reservations: ReservationBook::new(),
                names: NameLedger::new(),
                credits: CreditLedger::new(),
                held: 0,
                locked_fees: 0,
                events: Vec::new(),
            }),
            busy: AtomicBool::new(false),
            clock,
            sink,
        }
    }

    /// Acquires the call-scoped flag, refusing reentrant callers outright.
    fn enter(&self) -> Result<CallGuard<'_>, RegistryError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(RegistryError::ReentrantCall);
        }
        Ok(CallGuard { flag: &self.busy })
    }

    // -----------------------------------------------------------------------
    // Mutating operations
    // -----------------------------------------------------------------------

    /// Reserves a commitment slot for `caller`.
    ///
    /// The slot may hold a prior reservation only if that reservation's
    /// window has lapsed — expiry fully releases the slot to anyone,
    /// including a different caller. Returns the finalization deadline.
    ///
    /// # Errors
    ///
    /// [`RegistryError::HashAlreadyReserved`] while an unexpired
    /// reservation occupies the slot.
    pub fn reserve_name(
        &self,
        caller: &str,
        commitment: CommitmentHash,
    ) -> Result<DateTime<Utc>, RegistryError> {
        let _guard = self.enter()?;
        let now = self.clock.now();
        let mut state = self.state.lock();

        if state.reservations.is_occupied(&commitment, now) {
            return Err(RegistryError::HashAlreadyReserved { commitment });
        }

        let reservation = Reservation {
            committer: caller.to_string(),
            committed_at: now,
        };
        let deadline = reservation.deadline();
        state.reservations.put(commitment, reservation);
        state.events.push(RegistryEvent::ReservationMade {
            commitment,
            reserver: caller.to_string(),
            deadline,
        });

        info!(
            commitment = %hex::encode(commitment),
            reserver = caller,
            %deadline,
            "commitment reserved"
        );
        Ok(deadline)
    }

    /// Finalizes a reservation into a registration.
    ///
    /// Validations run in a fixed order (length, reservation, hash,
    /// availability, payment) and the error reports only the first
    /// failure. The displacement credit for an expired prior owner is
    /// written *before* the payment check and revoked if the payment
    /// turns out wrong — the call as a whole stays atomic.
    ///
    /// Returns the new record. The consumed reservation is left in the
    /// book; stale commitments are ignored, never reclaimed.
    pub fn register_name(
        &self,
        caller: &str,
        commitment: CommitmentHash,
        name: &str,
        salt: &Salt,
        payment: u64,
    ) -> Result<NameRecord, RegistryError> {
        let _guard = self.enter()?;
        let now = self.clock.now();

        // 1. Length bound.
        let length = name.len();
        if !(config::MIN_NAME_LENGTH..=config::MAX_NAME_LENGTH).contains(&length) {
            return Err(RegistryError::InvalidLength {
                actual: length,
                min: config::MIN_NAME_LENGTH,
                max: config::MAX_NAME_LENGTH,
            });
        }

        let mut state = self.state.lock();

        // 2. Reservation ownership and timing. One opaque error for all
        // three failure modes — callers don't get to learn which.
        let valid = state
            .reservations
            .get(&commitment)
            .is_some_and(|r| r.committer == caller && r.finalizable_at(now));
        if !valid {
            return Err(RegistryError::InvalidReservation);
        }

        // 3. Commitment integrity.
        let expected = hash::commitment_hash(name, salt);
        if expected != commitment {
            return Err(RegistryError::InvalidHash {
                expected,
                actual: commitment,
            });
        }

        // 4. Availability. A live name is untouchable, reservation or not.
        let name_key = hash::name_hash(name);
        let prior = state.names.get(&name_key).cloned();
        if let Some(ref record) = prior {
            if record.is_live(now) {
                return Err(RegistryError::NameAlreadyRegistered {
                    name: name.to_string(),
                });
            }
        }

        let fee = config::registration_fee(length);
        let new_held = state
            .held
            .checked_add(payment)
            .ok_or(RegistryError::AmountOverflow)?;

        // 5. Displacement credit, written before the payment check. The
        // prior record's locked fee becomes the displaced owner's credit.
        let displaced = match prior {
            Some(record) => {
                state.credits.accrue(&record.owner, fee)?;
                state.locked_fees = state.locked_fees.saturating_sub(fee);
                Some(record.owner)
            }
            None => None,
        };

        // Payment must match the fee exactly. A wrong amount unwinds the
        // displacement credit written above.
        if payment != fee {
            if let Some(ref owner) = displaced {
                let total = state.credits.take(owner);
                state.credits.restore(owner, total - fee);
                state.locked_fees += fee;
            }
            return Err(RegistryError::InvalidValue {
                required: fee,
                supplied: payment,
            });
        }

        // 6. Commit.
        let record = NameRecord {
            owner: caller.to_string(),
            expires_at: now + config::lock_duration(),
        };
        state.names.put(name_key, record.clone());
        state.held = new_held;
        state.locked_fees += fee;

        if let Some(displaced) = displaced {
            info!(name, %displaced, "expired owner displaced");
            state.events.push(RegistryEvent::OwnerDisplaced {
                name: name.to_string(),
                displaced,
            });
        }
        state.events.push(RegistryEvent::NameRegistered {
            name: name.to_string(),
            owner: caller.to_string(),
            expires_at: record.expires_at,
        });

        info!(name, owner = caller, fee, expires_at = %record.expires_at, "name registered");
        Ok(record)
    }

    /// Extends a registration's lock from now.
    ///
    /// An expired record still names its last owner, so a displaced-but-
    /// not-yet-overwritten owner can renew and silently un-expire the
    /// name. Returns the new expiration.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotNameOwner`] if the caller doesn't own the
    /// record (a vacant record reports an empty owner).
    pub fn renew_registration(
        &self,
        caller: &str,
        name: &str,
    ) -> Result<DateTime<Utc>, RegistryError> {
        let _guard = self.enter()?;
        let now = self.clock.now();
        let mut state = self.state.lock();

        let name_key = hash::name_hash(name);
        match state.names.get(&name_key) {
            None => {
                return Err(RegistryError::NotNameOwner {
                    owner: String::new(),
                    caller: caller.to_string(),
                })
            }
            Some(record) if record.owner != caller => {
                return Err(RegistryError::NotNameOwner {
                    owner: record.owner.clone(),
                    caller: caller.to_string(),
                })
            }
            Some(_) => {}
        }

        let expires_at = now + config::lock_duration();
        state.names.set_expiration(&name_key, expires_at);
        state.events.push(RegistryEvent::RegistrationRenewed {
            name: name.to_string(),
            owner: caller.to_string(),
            expires_at,
        });

        info!(name, owner = caller, %expires_at, "registration renewed");
        Ok(expires_at)
    }

    /// Deletes a registration and refunds the original fee.
    ///
    /// The record is cleared, then the refund goes out through the
    /// transfer sink. A rejected transfer restores the record and fails
    /// the whole call. Returns the refunded amount.
    ///
    /// Same ownership rule as renewal: an expired owner can still delete
    /// and reclaim their fee until someone overwrites the record.
    pub fn delete_registration(&self, caller: &str, name: &str) -> Result<u64, RegistryError> {
        let _guard = self.enter()?;
        let mut state = self.state.lock();

        let name_key = hash::name_hash(name);
        let record = match state.names.remove(&name_key) {
            None => {
                return Err(RegistryError::NotNameOwner {
                    owner: String::new(),
                    caller: caller.to_string(),
                })
            }
            Some(record) if record.owner != caller => {
                let owner = record.owner.clone();
                state.names.put(name_key, record);
                return Err(RegistryError::NotNameOwner {
                    owner,
                    caller: caller.to_string(),
                });
            }
            Some(record) => record,
        };

        // The original fee, recomputed from the name itself.
        let refund = config::registration_fee(name.len());
        drop(state);

        // The flag stays held across the sink call; the mutex does not.
        if let Err(err) = self.sink.transfer(caller, refund) {
            let mut state = self.state.lock();
            state.names.put(name_key, record);
            debug!(name, reason = %err, "refund transfer rejected, registration restored");
            return Err(RegistryError::TransferFailed {
                reason: err.reason,
            });
        }

        let mut state = self.state.lock();
        debug_assert!(state.held >= refund && state.locked_fees >= refund);
        state.held = state.held.saturating_sub(refund);
        state.locked_fees = state.locked_fees.saturating_sub(refund);
        state.events.push(RegistryEvent::RegistrationDeleted {
            name: name.to_string(),
        });

        info!(name, owner = caller, refund, "registration deleted");
        Ok(refund)
    }

    /// Withdraws the caller's accumulated displacement credit.
    ///
    /// Zeroes the credit, then pays it out through the transfer sink. A
    /// rejected transfer restores the credit and fails the call. A zero
    /// balance is a no-op, not an error. Returns the amount withdrawn.
    pub fn recover_balance(&self, caller: &str) -> Result<u64, RegistryError> {
        let _guard = self.enter()?;
        let mut state = self.state.lock();

        let amount = state.credits.take(caller);
        if amount == 0 {
            return Ok(0);
        }
        drop(state);

        if let Err(err) = self.sink.transfer(caller, amount) {
            let mut state = self.state.lock();
            state.credits.restore(caller, amount);
            debug!(caller, reason = %err, "credit withdrawal rejected, credit restored");
            return Err(RegistryError::TransferFailed {
                reason: err.reason,
            });
        }

        let mut state = self.state.lock();
        debug_assert!(state.held >= amount);
        state.held = state.held.saturating_sub(amount);

        info!(caller, amount, "credit recovered");
        Ok(amount)
    }

    // -----------------------------------------------------------------------
    // Read-only queries
    // -----------------------------------------------------------------------

    /// The stored reservation for a commitment hash, stale ones included.
    pub fn reservation(&self, commitment: &CommitmentHash) -> Option<Reservation> {
        self.state.lock().reservations.get(commitment).cloned()
    }

    /// The stored record for a name, expired ones included.
    pub fn record(&self, name: &str) -> Option<NameRecord> {
        self.record_by_hash(&hash::name_hash(name))
    }

    /// The stored record for a canonical name hash.
    pub fn record_by_hash(&self, name_key: &NameHash) -> Option<NameRecord> {
        self.state.lock().names.get(name_key).cloned()
    }

    /// The pending recoverable credit for an address.
    pub fn credit_of(&self, address: &str) -> u64 {
        self.state.lock().credits.balance_of(address)
    }

    /// Total value the registry currently holds.
    pub fn held_value(&self) -> u64 {
        self.state.lock().held
    }

    /// Snapshots the value accounting for a solvency check.
    pub fn audit(&self) -> SolvencyReport {
        let state = self.state.lock();
        SolvencyReport {
            held: state.held,
            locked_fees: state.locked_fees,
            outstanding_credits: state.credits.total_outstanding(),
        }
    }

    /// Drains and returns all notifications accumulated since the last
    /// drain, in emission order.
    pub fn drain_events(&self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.state.lock().events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualTimeSource;
    use crate::transfer::InMemoryBank;
    use chrono::{Duration, TimeZone};

    const ALICE: &str = "addr:alice";
    const BOB: &str = "addr:bob";

    fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn setup() -> (Arc<Registry>, Arc<ManualTimeSource>, Arc<InMemoryBank>) {
        let clock = Arc::new(ManualTimeSource::starting_at(start_time()));
        let bank = Arc::new(InMemoryBank::new());
        let registry = Arc::new(Registry::with_time_source(bank.clone(), clock.clone()));
        (registry, clock, bank)
    }

    /// Reserve, wait out the reveal delay, and register in one go.
    fn register(
        registry: &Registry,
        clock: &ManualTimeSource,
        caller: &str,
        name: &str,
        salt: &Salt,
    ) -> NameRecord {
        let commitment = hash::commitment_hash(name, salt);
        registry.reserve_name(caller, commitment).unwrap();
        clock.advance(config::min_reveal_delay());
        registry
            .register_name(caller, commitment, name, salt, config::registration_fee(name.len()))
            .unwrap()
    }

    #[test]
    fn reserve_then_register_happy_path() {
        let (registry, clock, _) = setup();
        let salt = [1u8; 32];
        let commitment = hash::commitment_hash("test", &salt);

        let deadline = registry.reserve_name(ALICE, commitment).unwrap();
        assert_eq!(deadline, start_time() + Duration::minutes(10));

        clock.advance(Duration::minutes(5));
        let record = registry
            .register_name(ALICE, commitment, "test", &salt, 400_000)
            .unwrap();

        assert_eq!(record.owner, ALICE);
        assert_eq!(record.expires_at, clock.now() + Duration::weeks(10));
        assert_eq!(registry.held_value(), 400_000);
        assert!(registry.audit().balanced());
    }

    #[test]
    fn double_reserve_within_window_rejected() {
        let (registry, clock, _) = setup();
        let commitment = [2u8; 32];

        registry.reserve_name(ALICE, commitment).unwrap();
        clock.advance(Duration::minutes(3));
        let result = registry.reserve_name(BOB, commitment);
        assert!(matches!(
            result,
            Err(RegistryError::HashAlreadyReserved { .. })
        ));
        // The original reservation is intact.
        assert_eq!(registry.reservation(&commitment).unwrap().committer, ALICE);
    }

    #[test]
    fn lapsed_reservation_is_overwritten_by_anyone() {
        let (registry, clock, _) = setup();
        let commitment = [2u8; 32];

        registry.reserve_name(ALICE, commitment).unwrap();
        clock.advance(Duration::minutes(10) + Duration::seconds(1));

        registry.reserve_name(BOB, commitment).unwrap();
        let reservation = registry.reservation(&commitment).unwrap();
        assert_eq!(reservation.committer, BOB);
        assert_eq!(reservation.committed_at, clock.now());
    }

    #[test]
    fn register_too_short_or_too_long_name() {
        let (registry, clock, _) = setup();
        let salt = [1u8; 32];

        for name in ["ab", "elevenchars"] {
            let commitment = hash::commitment_hash(name, &salt);
            registry.reserve_name(ALICE, commitment).unwrap();
            clock.advance(config::min_reveal_delay());
            let result = registry.register_name(ALICE, commitment, name, &salt, 0);
            assert!(
                matches!(result, Err(RegistryError::InvalidLength { actual, .. }) if actual == name.len())
            );
        }
    }

    #[test]
    fn register_before_reveal_delay_rejected() {
        let (registry, clock, _) = setup();
        let salt = [1u8; 32];
        let commitment = hash::commitment_hash("test", &salt);

        registry.reserve_name(ALICE, commitment).unwrap();
        clock.advance(Duration::minutes(5) - Duration::seconds(1));
        let result = registry.register_name(ALICE, commitment, "test", &salt, 400_000);
        assert!(matches!(result, Err(RegistryError::InvalidReservation)));
        assert!(registry.record("test").is_none());
    }

    #[test]
    fn register_after_window_rejected() {
        let (registry, clock, _) = setup();
        let salt = [1u8; 32];
        let commitment = hash::commitment_hash("test", &salt);

        registry.reserve_name(ALICE, commitment).unwrap();
        clock.advance(Duration::minutes(10) + Duration::seconds(1));
        let result = registry.register_name(ALICE, commitment, "test", &salt, 400_000);
        assert!(matches!(result, Err(RegistryError::InvalidReservation)));
    }

    #[test]
    fn register_someone_elses_reservation_rejected() {
        let (registry, clock, _) = setup();
        let salt = [1u8; 32];
        let commitment = hash::commitment_hash("test", &salt);

        registry.reserve_name(ALICE, commitment).unwrap();
        clock.advance(config::min_reveal_delay());
        let result = registry.register_name(BOB, commitment, "test", &salt, 400_000);
        // Same opaque error as the timing failures.
        assert!(matches!(result, Err(RegistryError::InvalidReservation)));
    }

    #[test]
    fn register_with_mismatched_salt_rejected() {
        let (registry, clock, _) = setup();
        let commitment = hash::commitment_hash("test", &[1u8; 32]);

        registry.reserve_name(ALICE, commitment).unwrap();
        clock.advance(config::min_reveal_delay());
        let result = registry.register_name(ALICE, commitment, "test", &[2u8; 32], 400_000);
        assert!(matches!(result, Err(RegistryError::InvalidHash { .. })));
        assert!(registry.record("test").is_none());
    }

    #[test]
    fn register_wrong_payment_rejected_and_rolled_back() {
        let (registry, clock, _) = setup();
        let salt = [1u8; 32];
        let commitment = hash::commitment_hash("test", &salt);

        registry.reserve_name(ALICE, commitment).unwrap();
        clock.advance(config::min_reveal_delay());
        let result = registry.register_name(ALICE, commitment, "test", &salt, 399_999);
        assert!(matches!(
            result,
            Err(RegistryError::InvalidValue {
                required: 400_000,
                supplied: 399_999
            })
        ));
        assert!(registry.record("test").is_none());
        assert_eq!(registry.held_value(), 0);
    }

    #[test]
    fn live_name_cannot_be_reclaimed_even_with_valid_reservation() {
        let (registry, clock, _) = setup();
        register(&registry, &clock, ALICE, "test", &[1u8; 32]);

        let salt = [9u8; 32];
        let commitment = hash::commitment_hash("test", &salt);
        registry.reserve_name(BOB, commitment).unwrap();
        clock.advance(config::min_reveal_delay());
        let result = registry.register_name(BOB, commitment, "test", &salt, 400_000);
        assert!(matches!(
            result,
            Err(RegistryError::NameAlreadyRegistered { .. })
        ));
    }

    #[test]
    fn displacement_credits_the_expired_owner() {
        let (registry, clock, _) = setup();
        register(&registry, &clock, ALICE, "test", &[1u8; 32]);

        // Let the lock run out, then Bob claims the name.
        clock.advance(Duration::weeks(10));
        register(&registry, &clock, BOB, "test", &[2u8; 32]);

        assert_eq!(registry.record("test").unwrap().owner, BOB);
        assert_eq!(registry.credit_of(ALICE), 400_000);
        // Both fees are accounted for: Bob's is locked, Alice's is credit.
        assert_eq!(registry.held_value(), 800_000);
        assert!(registry.audit().balanced());
    }

    #[test]
    fn displacement_rolls_back_when_payment_is_wrong() {
        let (registry, clock, _) = setup();
        register(&registry, &clock, ALICE, "test", &[1u8; 32]);
        clock.advance(Duration::weeks(10));

        let salt = [2u8; 32];
        let commitment = hash::commitment_hash("test", &salt);
        registry.reserve_name(BOB, commitment).unwrap();
        clock.advance(config::min_reveal_delay());

        let result = registry.register_name(BOB, commitment, "test", &salt, 1);
        assert!(matches!(result, Err(RegistryError::InvalidValue { .. })));

        // The staged displacement credit must be gone, the record intact.
        assert_eq!(registry.credit_of(ALICE), 0);
        assert_eq!(registry.record("test").unwrap().owner, ALICE);
        assert!(registry.audit().balanced());
        // And no displacement notification escaped the failed call.
        let events = registry.drain_events();
        assert!(!events
            .iter()
            .any(|e| matches!(e, RegistryEvent::OwnerDisplaced { .. })));
    }

    #[test]
    fn renew_resets_expiration_from_now() {
        let (registry, clock, _) = setup();
        register(&registry, &clock, ALICE, "test", &[1u8; 32]);

        clock.advance(Duration::weeks(1));
        let expires_at = registry.renew_registration(ALICE, "test").unwrap();
        assert_eq!(expires_at, clock.now() + Duration::weeks(10));
        assert_eq!(registry.record("test").unwrap().expires_at, expires_at);
    }

    #[test]
    fn expired_owner_can_still_renew_before_overwrite() {
        let (registry, clock, _) = setup();
        register(&registry, &clock, ALICE, "test", &[1u8; 32]);

        clock.advance(Duration::weeks(11));
        let expires_at = registry.renew_registration(ALICE, "test").unwrap();
        // The name is live again, as if it never expired.
        assert!(registry.record("test").unwrap().is_live(clock.now()));
        assert_eq!(expires_at, clock.now() + Duration::weeks(10));
    }

    #[test]
    fn renew_by_non_owner_rejected() {
        let (registry, clock, _) = setup();
        register(&registry, &clock, ALICE, "test", &[1u8; 32]);

        let result = registry.renew_registration(BOB, "test");
        assert!(
            matches!(result, Err(RegistryError::NotNameOwner { owner, caller })
                if owner == ALICE && caller == BOB)
        );
    }

    #[test]
    fn renew_vacant_name_reports_empty_owner() {
        let (registry, _, _) = setup();
        let result = registry.renew_registration(ALICE, "ghost");
        assert!(
            matches!(result, Err(RegistryError::NotNameOwner { owner, .. }) if owner.is_empty())
        );
    }

    #[test]
    fn delete_refunds_the_exact_fee() {
        let (registry, clock, bank) = setup();
        register(&registry, &clock, ALICE, "test123", &[1u8; 32]);
        assert_eq!(registry.held_value(), 700_000);

        let refund = registry.delete_registration(ALICE, "test123").unwrap();
        assert_eq!(refund, 700_000);
        assert_eq!(bank.balance_of(ALICE), 700_000);
        assert!(registry.record("test123").is_none());
        assert_eq!(registry.held_value(), 0);
        assert!(registry.audit().balanced());
    }

    #[test]
    fn delete_by_non_owner_rejected() {
        let (registry, clock, _) = setup();
        register(&registry, &clock, ALICE, "test", &[1u8; 32]);

        let result = registry.delete_registration(BOB, "test");
        assert!(matches!(result, Err(RegistryError::NotNameOwner { .. })));
        assert!(registry.record("test").is_some());
    }

    #[test]
    fn recover_balance_with_no_credit_is_a_noop() {
        let (registry, _, bank) = setup();
        assert_eq!(registry.recover_balance(ALICE).unwrap(), 0);
        assert_eq!(bank.balance_of(ALICE), 0);
    }

    #[test]
    fn recover_balance_withdraws_everything() {
        let (registry, clock, bank) = setup();
        register(&registry, &clock, ALICE, "test", &[1u8; 32]);
        clock.advance(Duration::weeks(10));
        register(&registry, &clock, BOB, "test", &[2u8; 32]);

        let withdrawn = registry.recover_balance(ALICE).unwrap();
        assert_eq!(withdrawn, 400_000);
        assert_eq!(bank.balance_of(ALICE), 400_000);
        assert_eq!(registry.credit_of(ALICE), 0);
        // Only Bob's locked fee remains held.
        assert_eq!(registry.held_value(), 400_000);
        assert!(registry.audit().balanced());
    }

    #[test]
    fn events_emitted_in_order() {
        let (registry, clock, _) = setup();
        register(&registry, &clock, ALICE, "test", &[1u8; 32]);
        registry.renew_registration(ALICE, "test").unwrap();
        registry.delete_registration(ALICE, "test").unwrap();

        let events = registry.drain_events();
        assert!(matches!(events[0], RegistryEvent::ReservationMade { .. }));
        assert!(matches!(events[1], RegistryEvent::NameRegistered { .. }));
        assert!(matches!(
            events[2],
            RegistryEvent::RegistrationRenewed { .. }
        ));
        assert!(matches!(
            events[3],
            RegistryEvent::RegistrationDeleted { .. }
        ));
        // Drained means drained.
        assert!(registry.drain_events().is_empty());
    }

    #[test]
    fn consumed_reservation_cannot_re_register_a_live_name() {
        let (registry, clock, _) = setup();
        let salt = [1u8; 32];
        let record = register(&registry, &clock, ALICE, "test", &salt);
        assert_eq!(record.owner, ALICE);

        // The reservation is still in the book, but the name is now live.
        let commitment = hash::commitment_hash("test", &salt);
        let result = registry.register_name(ALICE, commitment, "test", &salt, 400_000);
        assert!(matches!(
            result,
            Err(RegistryError::NameAlreadyRegistered { .. })
        ));
    }
}
