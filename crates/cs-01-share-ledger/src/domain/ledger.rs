//! # Share Ledger
//!
//! Balances, allowances, the authorized share cap and the pause flag.
//!
//! ## Invariants
//!
//! - Σ balances == `total_supply` after every operation.
//! - `total_supply <= total_shares` after every operation.
//! - A rejected operation leaves balances, allowances, supply and flags
//!   untouched: every check runs before the first write.
//!
//! Owner-gated operations take a resolved [`Caller`]; the ledger itself does
//! not know who the owner is.

use crate::domain::entities::TokenMetadata;
use shared_types::{Address, Caller, LedgerError, LedgerEvent, Shares};
use std::collections::HashMap;
use tracing::{debug, info};

/// Fungible share ledger.
#[derive(Clone, Debug)]
pub struct ShareLedger {
    metadata: TokenMetadata,
    balances: HashMap<Address, Shares>,
    allowances: HashMap<(Address, Address), Shares>,
    total_supply: Shares,
    total_shares: Shares,
    paused: bool,
}

impl ShareLedger {
    /// Create an empty, unpaused ledger.
    pub fn new(metadata: TokenMetadata) -> Self {
        let total_shares = metadata.total_shares;
        Self {
            metadata,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_supply: 0,
            total_shares,
            paused: false,
        }
    }

    // =========================================================================
    // VIEWS
    // =========================================================================

    /// Token name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Token symbol.
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Display decimals.
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// Shares held by `account` (0 when unknown).
    pub fn balance_of(&self, account: &Address) -> Shares {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Remaining amount `spender` may move out of `owner`'s balance.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    /// Shares currently issued.
    pub fn total_supply(&self) -> Shares {
        self.total_supply
    }

    /// Authorized share cap.
    pub fn total_shares(&self) -> Shares {
        self.total_shares
    }

    /// Returns true while mutations are halted.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // =========================================================================
    // ISSUANCE (owner)
    // =========================================================================

    /// Issue `amount` new shares to `to`.
    ///
    /// Emits `Mint` followed by `Transfer { from: zero }`.
    pub fn mint(
        &mut self,
        caller: &Caller,
        to: Address,
        amount: Shares,
        message: &str,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        self.mint_many(caller, &[to], &[amount], message)
    }

    /// Issue shares to several recipients at once. All-or-nothing.
    pub fn mint_many(
        &mut self,
        caller: &Caller,
        recipients: &[Address],
        amounts: &[Shares],
        message: &str,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        caller.require_owner("mint")?;
        self.ensure_not_paused()?;

        if recipients.len() != amounts.len() {
            return Err(LedgerError::LengthMismatch {
                recipients: recipients.len(),
                amounts: amounts.len(),
            });
        }
        if recipients.iter().any(Address::is_zero) {
            return Err(zero_recipient());
        }

        let minted = amounts.iter().try_fold(0u128, |acc, amount| {
            acc.checked_add(*amount)
                .ok_or(LedgerError::Overflow { context: "mint" })
        })?;
        let supply = self
            .total_supply
            .checked_add(minted)
            .ok_or(LedgerError::Overflow { context: "mint" })?;
        if supply > self.total_shares {
            return Err(LedgerError::CapExceeded {
                supply,
                total_shares: self.total_shares,
            });
        }

        let mut events = Vec::with_capacity(recipients.len() * 2);
        for (to, amount) in recipients.iter().zip(amounts) {
            *self.balances.entry(*to).or_insert(0) += *amount;
            events.push(LedgerEvent::Mint {
                shareholder: *to,
                amount: *amount,
                message: message.to_string(),
            });
            events.push(LedgerEvent::Transfer {
                from: Address::ZERO,
                to: *to,
                amount: *amount,
            });
        }
        self.total_supply = supply;

        info!(
            recipients = recipients.len(),
            minted,
            total_supply = supply,
            "Shares minted"
        );
        Ok(events)
    }

    /// Withdraw `amount` shares from the owner's own balance.
    pub fn unmint(
        &mut self,
        caller: &Caller,
        amount: Shares,
        message: &str,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let owner = caller.require_owner("unmint")?;
        self.ensure_not_paused()?;

        let available = self.balance_of(&owner);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        self.debit(&owner, amount);
        self.total_supply -= amount;

        info!(amount, total_supply = self.total_supply, "Shares unminted");
        Ok(vec![
            LedgerEvent::Unmint {
                amount,
                message: message.to_string(),
            },
            LedgerEvent::Transfer {
                from: owner,
                to: Address::ZERO,
                amount,
            },
        ])
    }

    /// Change the authorized share cap. It may not drop below current supply.
    pub fn set_total_shares(
        &mut self,
        caller: &Caller,
        new_total: Shares,
    ) -> Result<(), LedgerError> {
        caller.require_owner("set total shares")?;
        self.ensure_not_paused()?;

        if new_total < self.total_supply {
            return Err(LedgerError::CapExceeded {
                supply: self.total_supply,
                total_shares: new_total,
            });
        }

        info!(previous = self.total_shares, new_total, "Total shares changed");
        self.total_shares = new_total;
        Ok(())
    }

    /// Set the pause flag. The only mutation permitted while paused.
    pub fn pause(
        &mut self,
        caller: &Caller,
        paused: bool,
        message: &str,
    ) -> Result<LedgerEvent, LedgerError> {
        caller.require_owner("pause")?;

        self.paused = paused;
        info!(paused, reason = message, "Pause flag set");
        Ok(LedgerEvent::Pause {
            paused,
            message: message.to_string(),
        })
    }

    // =========================================================================
    // TRANSFERS
    // =========================================================================

    /// Check that `from` could send `amount` to `to` right now.
    pub fn validate_transfer(
        &self,
        from: &Address,
        to: &Address,
        amount: Shares,
    ) -> Result<(), LedgerError> {
        self.ensure_not_paused()?;
        self.validate_movement(from, to, amount)
    }

    /// Check that `spender` could move `amount` from `from` to `to` right now.
    pub fn validate_transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Shares,
    ) -> Result<(), LedgerError> {
        self.ensure_not_paused()?;
        let available = self.allowance(from, spender);
        if available < amount {
            return Err(LedgerError::InsufficientAllowance {
                required: amount,
                available,
            });
        }
        self.validate_movement(from, to, amount)
    }

    /// Move shares out of the caller's own balance.
    pub fn transfer(
        &mut self,
        caller: &Caller,
        to: Address,
        amount: Shares,
    ) -> Result<LedgerEvent, LedgerError> {
        let from = caller.address();
        self.validate_transfer(&from, &to, amount)?;
        Ok(self.apply_movement(from, to, amount))
    }

    /// Move shares out of `from`'s balance using the caller's allowance.
    pub fn transfer_from(
        &mut self,
        caller: &Caller,
        from: Address,
        to: Address,
        amount: Shares,
    ) -> Result<LedgerEvent, LedgerError> {
        let spender = caller.address();
        self.validate_transfer_from(&spender, &from, &to, amount)?;

        let remaining = self.allowance(&from, &spender) - amount;
        self.allowances.insert((from, spender), remaining);
        Ok(self.apply_movement(from, to, amount))
    }

    /// Move shares on behalf of the recovery protocol.
    ///
    /// Bypasses the pause flag and any allowance. Not reachable from outside
    /// the runtime.
    pub fn transfer_internal(
        &mut self,
        from: Address,
        to: Address,
        amount: Shares,
    ) -> Result<LedgerEvent, LedgerError> {
        self.validate_movement(&from, &to, amount)?;
        Ok(self.apply_movement(from, to, amount))
    }

    // =========================================================================
    // ALLOWANCES
    // =========================================================================

    /// Set the allowance of `spender` over the caller's balance.
    pub fn approve(
        &mut self,
        caller: &Caller,
        spender: Address,
        value: Shares,
    ) -> Result<LedgerEvent, LedgerError> {
        self.ensure_not_paused()?;
        Ok(self.set_allowance(caller.address(), spender, value))
    }

    /// Raise the allowance of `spender` by `added`.
    pub fn increase_approval(
        &mut self,
        caller: &Caller,
        spender: Address,
        added: Shares,
    ) -> Result<LedgerEvent, LedgerError> {
        self.ensure_not_paused()?;
        let approver = caller.address();
        let value = self
            .allowance(&approver, &spender)
            .checked_add(added)
            .ok_or(LedgerError::Overflow {
                context: "increase approval",
            })?;
        Ok(self.set_allowance(approver, spender, value))
    }

    /// Lower the allowance of `spender` by `subtracted`, stopping at zero.
    pub fn decrease_approval(
        &mut self,
        caller: &Caller,
        spender: Address,
        subtracted: Shares,
    ) -> Result<LedgerEvent, LedgerError> {
        self.ensure_not_paused()?;
        let approver = caller.address();
        let value = self
            .allowance(&approver, &spender)
            .saturating_sub(subtracted);
        Ok(self.set_allowance(approver, spender, value))
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn ensure_not_paused(&self) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        Ok(())
    }

    fn validate_movement(
        &self,
        from: &Address,
        to: &Address,
        amount: Shares,
    ) -> Result<(), LedgerError> {
        if to.is_zero() {
            return Err(zero_recipient());
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        if from != to && self.balance_of(to).checked_add(amount).is_none() {
            return Err(LedgerError::Overflow {
                context: "transfer",
            });
        }
        Ok(())
    }

    /// Caller has run `validate_movement`.
    fn apply_movement(&mut self, from: Address, to: Address, amount: Shares) -> LedgerEvent {
        self.debit(&from, amount);
        *self.balances.entry(to).or_insert(0) += amount;

        debug!(%from, %to, amount, "Shares transferred");
        LedgerEvent::Transfer { from, to, amount }
    }

    fn debit(&mut self, account: &Address, amount: Shares) {
        if let Some(balance) = self.balances.get_mut(account) {
            *balance -= amount;
            if *balance == 0 {
                self.balances.remove(account);
            }
        }
    }

    fn set_allowance(&mut self, approver: Address, spender: Address, value: Shares) -> LedgerEvent {
        if value == 0 {
            self.allowances.remove(&(approver, spender));
        } else {
            self.allowances.insert((approver, spender), value);
        }
        debug!(%approver, %spender, value, "Allowance set");
        LedgerEvent::Approval {
            approver,
            spender,
            value,
        }
    }
}

fn zero_recipient() -> LedgerError {
    LedgerError::InvalidParameter {
        name: "recipient",
        reason: "zero address".to_string(),
    }
}
