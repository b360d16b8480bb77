//! # Outbound Ports
//!
//! What the recovery protocol needs from the rest of the system: the share
//! ledger, a way to pay escrowed collateral out, and the clock.

use shared_types::{Address, LedgerError, LedgerEvent, Shares, Timestamp, Wei};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Share ledger access - outbound port.
pub trait LedgerAccess {
    /// Shares held by `account`.
    fn balance_of(&self, account: &Address) -> Shares;

    /// Move shares without allowance or pause checks, returning the
    /// `Transfer` record.
    ///
    /// All-or-nothing: an `Err` leaves balances untouched.
    fn transfer_internal(
        &mut self,
        from: Address,
        to: Address,
        amount: Shares,
    ) -> Result<LedgerEvent, LedgerError>;
}

/// Collateral payout - outbound port.
///
/// Releases escrowed native value. An `Err` means nothing was paid.
pub trait CollateralPayout {
    /// Pay `amount` out of escrow to `to`.
    fn release(&mut self, to: Address, amount: Wei) -> Result<(), LedgerError>;
}

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in seconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock time source for testing.
#[derive(Debug, Default)]
pub struct MockTimeSource {
    time: AtomicU64,
}

impl MockTimeSource {
    /// Start the clock at `initial`.
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, secs: u64) {
        self.time.fetch_add(secs, Ordering::SeqCst);
    }

    /// Set the clock.
    pub fn set(&self, time: Timestamp) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}

/// Mock ledger for testing.
#[derive(Clone, Debug, Default)]
pub struct MockLedger {
    /// Balances per account.
    pub balances: HashMap<Address, Shares>,
}

impl MockLedger {
    /// Builder: seed a balance.
    #[must_use]
    pub fn with_balance(mut self, account: Address, balance: Shares) -> Self {
        self.balances.insert(account, balance);
        self
    }
}

impl LedgerAccess for MockLedger {
    fn balance_of(&self, account: &Address) -> Shares {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn transfer_internal(
        &mut self,
        from: Address,
        to: Address,
        amount: Shares,
    ) -> Result<LedgerEvent, LedgerError> {
        let available = self.balance_of(&from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        *self.balances.entry(from).or_insert(0) -= amount;
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(LedgerEvent::Transfer { from, to, amount })
    }
}

/// Mock payout for testing. Records every release.
#[derive(Clone, Debug, Default)]
pub struct MockPayout {
    /// Releases in order.
    pub payments: Vec<(Address, Wei)>,
    /// Should fail?
    pub should_fail: bool,
}

impl MockPayout {
    /// Total released to `account`.
    pub fn paid_to(&self, account: &Address) -> Wei {
        self.payments
            .iter()
            .filter(|(to, _)| to == account)
            .fold(Wei::zero(), |acc, (_, amount)| acc + *amount)
    }
}

impl CollateralPayout for MockPayout {
    fn release(&mut self, to: Address, amount: Wei) -> Result<(), LedgerError> {
        if self.should_fail {
            return Err(LedgerError::InsufficientFunds {
                account: to,
                required: amount,
                available: Wei::zero(),
            });
        }
        self.payments.push((to, amount));
        Ok(())
    }
}
