//! # Ledger Calls
//!
//! Every state-changing entry point of the claimable share token as a
//! serializable payload. The caller and attached value travel in the
//! surrounding [`CallEnvelope`](shared_types::CallEnvelope).

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use shared_types::{Address, Hash, Shares, Wei};

/// A state-changing call.
///
/// Share amounts travel as decimal strings. The `call` tag makes serde
/// buffer the payload, and that buffer cannot hold 128-bit integers.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum LedgerCall {
    /// Send shares from the caller.
    Transfer {
        /// Recipient.
        to: Address,
        /// Shares to move.
        #[serde_as(as = "DisplayFromStr")]
        amount: Shares,
    },
    /// Send shares from `from` using the caller's allowance.
    TransferFrom {
        /// Paying account.
        from: Address,
        /// Recipient.
        to: Address,
        /// Shares to move.
        #[serde_as(as = "DisplayFromStr")]
        amount: Shares,
    },
    /// Set an allowance.
    Approve {
        /// Account allowed to spend.
        spender: Address,
        /// New allowance.
        #[serde_as(as = "DisplayFromStr")]
        value: Shares,
    },
    /// Raise an allowance.
    IncreaseApproval {
        /// Account allowed to spend.
        spender: Address,
        /// Shares added to the allowance.
        #[serde_as(as = "DisplayFromStr")]
        added: Shares,
    },
    /// Lower an allowance, stopping at zero.
    DecreaseApproval {
        /// Account allowed to spend.
        spender: Address,
        /// Shares removed from the allowance.
        #[serde_as(as = "DisplayFromStr")]
        subtracted: Shares,
    },
    /// Issue shares (owner).
    Mint {
        /// Recipient.
        to: Address,
        /// Shares to issue.
        #[serde_as(as = "DisplayFromStr")]
        amount: Shares,
        /// Free-text memo carried into the event.
        #[serde(default)]
        message: String,
    },
    /// Issue shares to several recipients (owner).
    MintMany {
        /// Recipients, paired with `amounts` by position.
        recipients: Vec<Address>,
        /// Shares per recipient.
        #[serde_as(as = "Vec<DisplayFromStr>")]
        amounts: Vec<Shares>,
        /// Free-text memo carried into the events.
        #[serde(default)]
        message: String,
    },
    /// Withdraw shares from the owner's balance (owner).
    Unmint {
        /// Shares to withdraw.
        #[serde_as(as = "DisplayFromStr")]
        amount: Shares,
        /// Free-text memo carried into the event.
        #[serde(default)]
        message: String,
    },
    /// Change the authorized share cap (owner).
    SetTotalShares {
        /// New cap.
        #[serde_as(as = "DisplayFromStr")]
        total_shares: Shares,
    },
    /// Set the pause flag (owner).
    Pause {
        /// New flag.
        paused: bool,
        /// Free-text memo carried into the event.
        #[serde(default)]
        message: String,
    },
    /// Replace the owner (master).
    TransferOwnership {
        /// Incoming owner.
        new_owner: Address,
    },
    /// Register a recovery commitment.
    PrepareClaim {
        /// `keccak256(nonce ‖ claimer ‖ target)`.
        commitment: Hash,
    },
    /// Reveal a commitment and open a claim. Collateral is the call value.
    DeclareLost {
        /// Account declared lost.
        target: Address,
        /// Nonce behind the caller's commitment.
        nonce: Hash,
    },
    /// Collect a matured claim (claimant).
    ResolveClaim {
        /// Claimed account.
        target: Address,
    },
    /// Cancel a claim (owner).
    DeleteClaim {
        /// Claimed account.
        target: Address,
    },
    /// Cancel the claim against the caller.
    ClearClaim,
    /// Change the collateral rate and clearing period (owner).
    SetClaimParameters {
        /// Native value per share.
        collateral_rate: Wei,
        /// Dispute window in days.
        clearing_period_days: u64,
    },
}

impl LedgerCall {
    /// Stable name of the call, used in receipts and metrics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::TransferFrom { .. } => "transfer_from",
            Self::Approve { .. } => "approve",
            Self::IncreaseApproval { .. } => "increase_approval",
            Self::DecreaseApproval { .. } => "decrease_approval",
            Self::Mint { .. } => "mint",
            Self::MintMany { .. } => "mint_many",
            Self::Unmint { .. } => "unmint",
            Self::SetTotalShares { .. } => "set_total_shares",
            Self::Pause { .. } => "pause",
            Self::TransferOwnership { .. } => "transfer_ownership",
            Self::PrepareClaim { .. } => "prepare_claim",
            Self::DeclareLost { .. } => "declare_lost",
            Self::ResolveClaim { .. } => "resolve_claim",
            Self::DeleteClaim { .. } => "delete_claim",
            Self::ClearClaim => "clear_claim",
            Self::SetClaimParameters { .. } => "set_claim_parameters",
        }
    }

    /// Only `declare_lost` accepts native value.
    #[must_use]
    pub const fn accepts_value(&self) -> bool {
        matches!(self, Self::DeclareLost { .. })
    }
}
