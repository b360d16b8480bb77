//! # Claimable Share Token
//!
//! The deployed contract: share ledger, recovery protocol and activity
//! guard composed over one native-value bank and one audit log.
//!
//! ## Call Execution
//!
//! 1. Resolve the caller's role.
//! 2. Reject value sent to calls that do not accept it, then lock the value
//!    in escrow.
//! 3. Dispatch. Each operation validates fully before it writes.
//! 4. On success append the events; on failure return the locked value.
//!
//! Call timestamps never go backwards: a call stamped before the last
//! executed one is rejected.
//!
//! A transfer whose paying account has a live claim clears that claim in
//! the same call, before the shares move.

use crate::bank::NativeBank;
use crate::call::LedgerCall;
use cs_01_share_ledger::{AccessControl, ShareLedger, TokenMetadata};
use cs_02_lost_key_recovery::{
    ActivityGuard, ClaimParameters, ClearedCollateralPolicy, RecoveryProtocol,
};
use shared_types::{
    Address, CallEnvelope, Caller, EventLog, Hash, LedgerError, LedgerEvent, Shares, Timestamp,
    Wei,
};
use tracing::{debug, warn};

/// Deployment parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenConfig {
    /// Token metadata and initial share cap.
    pub metadata: TokenMetadata,
    /// Initial owner.
    pub owner: Address,
    /// Master identity.
    pub master: Address,
    /// Initial claim parameters.
    pub params: ClaimParameters,
    /// Who receives the collateral of a cleared claim.
    pub policy: ClearedCollateralPolicy,
}

/// The composed contract state.
#[derive(Clone, Debug)]
pub struct ClaimableShareToken {
    access: AccessControl,
    ledger: ShareLedger,
    recovery: RecoveryProtocol,
    guard: ActivityGuard,
    bank: NativeBank,
    events: EventLog,
    last_timestamp: Timestamp,
}

impl ClaimableShareToken {
    /// Deploy with no shares issued and no native balances.
    pub fn deploy(config: TokenConfig) -> Result<Self, LedgerError> {
        let access = AccessControl::new(config.owner, config.master)?;
        Ok(Self {
            access,
            ledger: ShareLedger::new(config.metadata),
            recovery: RecoveryProtocol::new(config.params, config.policy),
            guard: ActivityGuard,
            bank: NativeBank::new(),
            events: EventLog::new(),
            last_timestamp: 0,
        })
    }

    /// Credit native value to `account` from outside the contract.
    pub fn fund(&mut self, account: Address, amount: Wei) {
        self.bank.deposit(account, amount);
    }

    /// Execute one call. All-or-nothing.
    pub fn execute(
        &mut self,
        envelope: &CallEnvelope<LedgerCall>,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let caller = self.access.resolve(envelope.caller);
        let value = envelope.value;
        let call = &envelope.payload;

        if envelope.timestamp < self.last_timestamp {
            warn!(
                call = call.name(),
                timestamp = envelope.timestamp,
                last = self.last_timestamp,
                "Call stamped in the past"
            );
            return Err(LedgerError::InvalidParameter {
                name: "timestamp",
                reason: format!(
                    "{} precedes the last executed call at {}",
                    envelope.timestamp, self.last_timestamp
                ),
            });
        }

        if !value.is_zero() {
            if !call.accepts_value() {
                return Err(LedgerError::InvalidParameter {
                    name: "value",
                    reason: format!("{} does not accept native value", call.name()),
                });
            }
            self.bank.lock(envelope.caller, value)?;
        }

        match self.dispatch(&caller, value, envelope.timestamp, call) {
            Ok(events) => {
                debug!(call = call.name(), events = events.len(), "Call executed");
                self.events.extend(events.iter().cloned());
                self.last_timestamp = envelope.timestamp;
                Ok(events)
            }
            Err(err) => {
                if !value.is_zero() {
                    self.bank.unlock(envelope.caller, value);
                }
                warn!(call = call.name(), caller = %envelope.caller, error = %err, "Call rejected");
                Err(err)
            }
        }
    }

    fn dispatch(
        &mut self,
        caller: &Caller,
        value: Wei,
        now: Timestamp,
        call: &LedgerCall,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        match call {
            LedgerCall::Transfer { to, amount } => {
                let from = caller.address();
                self.ledger.validate_transfer(&from, to, *amount)?;
                let mut events = self.guard_sender(from)?;
                events.push(self.ledger.transfer(caller, *to, *amount)?);
                Ok(events)
            }
            LedgerCall::TransferFrom { from, to, amount } => {
                self.ledger
                    .validate_transfer_from(&caller.address(), from, to, *amount)?;
                let mut events = self.guard_sender(*from)?;
                events.push(self.ledger.transfer_from(caller, *from, *to, *amount)?);
                Ok(events)
            }
            LedgerCall::Approve { spender, value } => {
                Ok(vec![self.ledger.approve(caller, *spender, *value)?])
            }
            LedgerCall::IncreaseApproval { spender, added } => {
                Ok(vec![self.ledger.increase_approval(caller, *spender, *added)?])
            }
            LedgerCall::DecreaseApproval {
                spender,
                subtracted,
            } => Ok(vec![self
                .ledger
                .decrease_approval(caller, *spender, *subtracted)?]),
            LedgerCall::Mint {
                to,
                amount,
                message,
            } => self.ledger.mint(caller, *to, *amount, message),
            LedgerCall::MintMany {
                recipients,
                amounts,
                message,
            } => self.ledger.mint_many(caller, recipients, amounts, message),
            LedgerCall::Unmint { amount, message } => self.ledger.unmint(caller, *amount, message),
            LedgerCall::SetTotalShares { total_shares } => {
                self.ledger.set_total_shares(caller, *total_shares)?;
                Ok(Vec::new())
            }
            LedgerCall::Pause { paused, message } => {
                Ok(vec![self.ledger.pause(caller, *paused, message)?])
            }
            LedgerCall::TransferOwnership { new_owner } => {
                Ok(vec![self.access.transfer_ownership(caller, *new_owner)?])
            }
            LedgerCall::PrepareClaim { commitment } => Ok(vec![self.recovery.prepare_claim(
                caller.address(),
                *commitment,
                now,
            )]),
            LedgerCall::DeclareLost { target, nonce } => Ok(vec![self.recovery.declare_lost(
                &self.ledger,
                caller.address(),
                *target,
                *nonce,
                value,
                now,
            )?]),
            LedgerCall::ResolveClaim { target } => {
                self.recovery
                    .resolve_claim(&mut self.ledger, &mut self.bank, caller, *target, now)
            }
            LedgerCall::DeleteClaim { target } => Ok(vec![self.recovery.delete_claim(
                &mut self.bank,
                caller,
                *target,
            )?]),
            LedgerCall::ClearClaim => Ok(vec![self.recovery.clear_claim(&mut self.bank, caller)?]),
            LedgerCall::SetClaimParameters {
                collateral_rate,
                clearing_period_days,
            } => Ok(vec![self.recovery.set_claim_parameters(
                caller,
                *collateral_rate,
                *clearing_period_days,
            )?]),
        }
    }

    fn guard_sender(&mut self, sender: Address) -> Result<Vec<LedgerEvent>, LedgerError> {
        Ok(self
            .guard
            .on_outgoing_transfer(&mut self.recovery, &mut self.bank, sender)?
            .into_iter()
            .collect())
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Audit log.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Timestamp of the last executed call, zero before the first.
    pub fn last_timestamp(&self) -> Timestamp {
        self.last_timestamp
    }

    /// Token name.
    pub fn name(&self) -> &str {
        self.ledger.name()
    }

    /// Token symbol.
    pub fn symbol(&self) -> &str {
        self.ledger.symbol()
    }

    /// Display decimals.
    pub fn decimals(&self) -> u8 {
        self.ledger.decimals()
    }

    /// Shares held by `account`.
    pub fn balance_of(&self, account: &Address) -> Shares {
        self.ledger.balance_of(account)
    }

    /// Allowance of `spender` over `owner`'s shares.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.ledger.allowance(owner, spender)
    }

    /// Shares issued.
    pub fn total_supply(&self) -> Shares {
        self.ledger.total_supply()
    }

    /// Authorized share cap.
    pub fn total_shares(&self) -> Shares {
        self.ledger.total_shares()
    }

    /// Current owner.
    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    /// Master identity.
    pub fn master(&self) -> Address {
        self.access.master()
    }

    /// Returns true while ledger mutations are halted.
    pub fn is_paused(&self) -> bool {
        self.ledger.is_paused()
    }

    /// Native value per share required as collateral.
    pub fn collateral_rate(&self) -> Wei {
        self.recovery.params().collateral_rate()
    }

    /// Clearing period in days.
    pub fn clearing_period(&self) -> u64 {
        self.recovery.params().clearing_period_days()
    }

    /// Clearing period in seconds, as compared against claim timestamps.
    pub fn clearing_period_secs(&self) -> Timestamp {
        self.recovery.params().clearing_period()
    }

    /// Fixed delay between commitment and reveal, in seconds.
    pub fn pre_claim_waiting_period(&self) -> Timestamp {
        self.recovery.params().pre_claim_waiting_period()
    }

    /// Cleared-collateral policy.
    pub fn policy(&self) -> ClearedCollateralPolicy {
        self.recovery.policy()
    }

    /// Claimant against `target`, zero when unclaimed.
    pub fn get_claimant(&self, target: &Address) -> Address {
        self.recovery.get_claimant(target)
    }

    /// Collateral escrowed against `target`, zero when unclaimed.
    pub fn get_collateral(&self, target: &Address) -> Wei {
        self.recovery.get_collateral(target)
    }

    /// Declaration time of the claim against `target`, zero when unclaimed.
    pub fn get_time_stamp(&self, target: &Address) -> Timestamp {
        self.recovery.get_time_stamp(target)
    }

    /// Commitment registered by `claimer`, zero when absent.
    pub fn get_msg_hash(&self, claimer: &Address) -> Hash {
        self.recovery.get_msg_hash(claimer)
    }

    /// Commitment time of `claimer`, zero when absent.
    pub fn get_pre_claim_time_stamp(&self, claimer: &Address) -> Timestamp {
        self.recovery.get_pre_claim_time_stamp(claimer)
    }

    /// Sum of collateral of live claims.
    pub fn escrowed_collateral(&self) -> Wei {
        self.recovery.escrowed_collateral()
    }

    /// Number of live claims.
    pub fn live_claims(&self) -> usize {
        self.recovery.live_claims()
    }

    /// Native value held by `account`.
    pub fn native_balance_of(&self, account: &Address) -> Wei {
        self.bank.balance_of(account)
    }

    /// Native value held by the bank's escrow.
    pub fn escrow_balance(&self) -> Wei {
        self.bank.escrow()
    }
}
