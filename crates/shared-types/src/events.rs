//! # Audit Events
//!
//! Fixed-schema records appended by every successful mutating operation.
//! Tests and off-chain monitors consume these as the audit trail.
//!
//! ## Emitters
//!
//! | Event | Emitted by |
//! |-------|-----------|
//! | `Transfer`, `Approval` | ShareLedger transfers and approvals |
//! | `Mint`, `Unmint` | Owner issuance |
//! | `Pause` | Owner pause toggle |
//! | `OwnershipTransferred` | Master ownership change |
//! | `ClaimPrepared` | CommitmentStore |
//! | `ClaimDeclared`, `ClaimResolved`, `ClaimDeleted`, `ClaimCleared` | RecoveryProtocol / ActivityGuard |
//! | `ClaimParametersChanged` | Owner parameter update |

use crate::entities::{Address, Shares, Wei};
use serde::{Deserialize, Serialize};

/// One audit record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum LedgerEvent {
    /// Shares moved. `from` is zero for mints, `to` is zero for unmints.
    Transfer {
        from: Address,
        to: Address,
        amount: Shares,
    },
    /// Allowance set. `value` is the resulting allowance.
    Approval {
        approver: Address,
        spender: Address,
        value: Shares,
    },
    /// New shares issued.
    Mint {
        shareholder: Address,
        amount: Shares,
        message: String,
    },
    /// Shares withdrawn from the owner's balance.
    Unmint { amount: Shares, message: String },
    /// Pause flag toggled.
    Pause { paused: bool, message: String },
    /// Owner replaced by the master.
    OwnershipTransferred { previous: Address, new: Address },
    /// Commitment registered.
    ClaimPrepared { claimer: Address },
    /// Claim opened against `target`; `balance` is the target's balance at declaration.
    ClaimDeclared {
        target: Address,
        claimant: Address,
        balance: Shares,
    },
    /// Claim succeeded; `amount` shares moved to the claimant.
    ClaimResolved {
        target: Address,
        claimant: Address,
        amount: Shares,
        collateral: Wei,
    },
    /// Claim deleted by the owner; collateral refunded to the claimant.
    ClaimDeleted {
        target: Address,
        claimant: Address,
        collateral: Wei,
    },
    /// Claim cleared by the target (explicitly or through activity).
    /// `recipient` is the account the collateral was paid to.
    ClaimCleared {
        target: Address,
        claimant: Address,
        collateral: Wei,
        recipient: Address,
    },
    /// Claim parameters changed by the owner.
    ClaimParametersChanged {
        collateral_rate: Wei,
        clearing_period_days: u64,
    },
}

impl LedgerEvent {
    /// The event name as used in the audit log.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "Transfer",
            Self::Approval { .. } => "Approval",
            Self::Mint { .. } => "Mint",
            Self::Unmint { .. } => "Unmint",
            Self::Pause { .. } => "Pause",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
            Self::ClaimPrepared { .. } => "ClaimPrepared",
            Self::ClaimDeclared { .. } => "ClaimDeclared",
            Self::ClaimResolved { .. } => "ClaimResolved",
            Self::ClaimDeleted { .. } => "ClaimDeleted",
            Self::ClaimCleared { .. } => "ClaimCleared",
            Self::ClaimParametersChanged { .. } => "ClaimParametersChanged",
        }
    }
}

/// Append-only event channel.
///
/// Records are only ever pushed at the end. Operations collect their events
/// and append them after every fallible step has succeeded, so a failed
/// call never leaves a partial record.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    records: Vec<LedgerEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record.
    pub fn append(&mut self, event: LedgerEvent) {
        self.records.push(event);
    }

    /// Append a batch of records in order.
    pub fn extend(&mut self, events: impl IntoIterator<Item = LedgerEvent>) {
        self.records.extend(events);
    }

    /// All records, oldest first.
    #[must_use]
    pub fn records(&self) -> &[LedgerEvent] {
        &self.records
    }

    /// Records appended at or after `offset`.
    #[must_use]
    pub fn since(&self, offset: usize) -> &[LedgerEvent] {
        self.records.get(offset..).unwrap_or(&[])
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
