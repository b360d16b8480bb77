//! # Error Types
//!
//! The single error taxonomy for every ledger and recovery operation.
//!
//! Every variant is a synchronous, caller-correctable business-rule
//! violation. A call that returns any of them has left no state behind.

use crate::entities::{Address, Shares, Timestamp, Wei};
use thiserror::Error;

/// Errors returned by ledger, access-control and recovery operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Caller does not hold the role the action requires.
    #[error("Unauthorized: {caller:?} may not {action}")]
    Unauthorized {
        caller: Address,
        action: &'static str,
    },

    /// Ledger mutations are paused.
    #[error("Ledger is paused")]
    Paused,

    /// Issued supply would exceed the authorized share count.
    #[error("Share cap exceeded: supply {supply} > authorized {total_shares}")]
    CapExceeded { supply: Shares, total_shares: Shares },

    /// Batch arguments differ in length.
    #[error("Length mismatch: {recipients} recipients, {amounts} amounts")]
    LengthMismatch { recipients: usize, amounts: usize },

    /// The claimer has no registered commitment.
    #[error("No commitment registered for {claimer:?}")]
    NoCommitment { claimer: Address },

    /// The revealed nonce does not reproduce the stored commitment.
    #[error("Commitment hash mismatch for claimer {claimer:?}")]
    HashMismatch { claimer: Address },

    /// A waiting period has not yet elapsed.
    #[error("Too early: {elapsed}s elapsed, {required}s required")]
    TooEarly {
        elapsed: Timestamp,
        required: Timestamp,
    },

    /// The target holds no shares, there is nothing to recover.
    #[error("Target {target:?} has zero balance")]
    ZeroBalance { target: Address },

    /// A live claim already exists for the target.
    #[error("Target {target:?} is already claimed")]
    AlreadyClaimed { target: Address },

    /// The attached value does not cover the required collateral.
    #[error("Insufficient collateral: paid {paid}, required {required}")]
    InsufficientCollateral { paid: Wei, required: Wei },

    /// No live claim exists for the target.
    #[error("No claim exists for {target:?}")]
    NoClaim { target: Address },

    /// Share balance too small for the debit.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Shares, available: Shares },

    /// Allowance too small for `transfer_from`.
    #[error("Insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance { required: Shares, available: Shares },

    /// A parameter is out of its permitted range.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// Arithmetic overflow in a share amount.
    #[error("Arithmetic overflow in {context}")]
    Overflow { context: &'static str },

    /// The caller cannot cover the native value attached to the call.
    #[error("Insufficient funds: {account:?} has {available}, needs {required}")]
    InsufficientFunds {
        account: Address,
        required: Wei,
        available: Wei,
    },
}

impl LedgerError {
    /// Stable machine-readable name of the failure kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::Paused => "paused",
            Self::CapExceeded { .. } => "cap_exceeded",
            Self::LengthMismatch { .. } => "length_mismatch",
            Self::NoCommitment { .. } => "no_commitment",
            Self::HashMismatch { .. } => "hash_mismatch",
            Self::TooEarly { .. } => "too_early",
            Self::ZeroBalance { .. } => "zero_balance",
            Self::AlreadyClaimed { .. } => "already_claimed",
            Self::InsufficientCollateral { .. } => "insufficient_collateral",
            Self::NoClaim { .. } => "no_claim",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::InsufficientAllowance { .. } => "insufficient_allowance",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::Overflow { .. } => "overflow",
            Self::InsufficientFunds { .. } => "insufficient_funds",
        }
    }
}
