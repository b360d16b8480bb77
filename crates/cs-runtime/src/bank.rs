//! # Native Bank
//!
//! Native-value accounts plus the escrow that holds claim collateral.
//!
//! Value attached to a call is moved into escrow before the call runs and
//! moved back if the call fails. Collateral leaves escrow only through
//! [`CollateralPayout::release`].

use cs_02_lost_key_recovery::CollateralPayout;
use shared_types::{Address, LedgerError, Wei};
use std::collections::HashMap;
use tracing::debug;

/// Native-value balances and the collateral escrow.
#[derive(Clone, Debug, Default)]
pub struct NativeBank {
    balances: HashMap<Address, Wei>,
    escrow: Wei,
}

impl NativeBank {
    /// Empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account` from outside the system.
    pub fn deposit(&mut self, account: Address, amount: Wei) {
        let balance = self.balances.entry(account).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Native balance of `account`.
    pub fn balance_of(&self, account: &Address) -> Wei {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Value currently held in escrow.
    pub fn escrow(&self) -> Wei {
        self.escrow
    }

    /// Move call value from `account` into escrow.
    pub fn lock(&mut self, account: Address, amount: Wei) -> Result<(), LedgerError> {
        let available = self.balance_of(&account);
        if available < amount {
            return Err(LedgerError::InsufficientFunds {
                account,
                required: amount,
                available,
            });
        }
        self.escrow = self
            .escrow
            .checked_add(amount)
            .ok_or(LedgerError::Overflow { context: "escrow" })?;
        self.balances.insert(account, available - amount);
        debug!(%account, %amount, "Call value locked");
        Ok(())
    }

    /// Return value locked by [`lock`](Self::lock) for a call that failed.
    pub fn unlock(&mut self, account: Address, amount: Wei) {
        self.escrow = self.escrow.saturating_sub(amount);
        self.deposit(account, amount);
        debug!(%account, %amount, "Call value returned");
    }
}

impl CollateralPayout for NativeBank {
    fn release(&mut self, to: Address, amount: Wei) -> Result<(), LedgerError> {
        if self.escrow < amount {
            return Err(LedgerError::InsufficientFunds {
                account: to,
                required: amount,
                available: self.escrow,
            });
        }
        self.escrow -= amount;
        self.deposit(to, amount);
        debug!(%to, %amount, "Collateral released");
        Ok(())
    }
}
