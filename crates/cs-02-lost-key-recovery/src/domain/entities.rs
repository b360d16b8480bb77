//! # Domain Entities
//!
//! Commitments and claims of the recovery protocol.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, Timestamp, Wei};

/// A registered commitment, keyed by claimer.
///
/// At most one per claimer; a newer `prepare_claim` overwrites it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreClaim {
    /// `keccak256(nonce ‖ claimer ‖ target)`.
    pub commitment: Hash,
    /// When the commitment was registered.
    pub created_at: Timestamp,
}

/// An open recovery claim, keyed by target.
///
/// At most one per target. Destroyed by exactly one of resolve, owner
/// delete, self-clear or activity clear, each of which pays `collateral`
/// out once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Account that declared the target lost.
    pub claimant: Address,
    /// Native value escrowed at declaration.
    pub collateral: Wei,
    /// When the claim was declared.
    pub created_at: Timestamp,
}

/// Who receives the collateral of a claim cleared by the target.
///
/// Owner deletion and successful resolution always pay the claimant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearedCollateralPolicy {
    /// Return the collateral to the claimant.
    #[default]
    RefundClaimant,
    /// Pay the collateral to the defending holder.
    ForfeitToHolder,
}

impl ClearedCollateralPolicy {
    /// Recipient of a cleared claim's collateral.
    #[must_use]
    pub fn recipient(&self, target: Address, claim: &Claim) -> Address {
        match self {
            Self::RefundClaimant => claim.claimant,
            Self::ForfeitToHolder => target,
        }
    }
}
