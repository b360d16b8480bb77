//! # Domain Invariants
//!
//! Business rules of the recovery protocol.

use shared_types::{commitment_hash, Address, Hash, LedgerError, Timestamp, Wei};

/// Invariant: waiting period elapsed.
///
/// Boundary inclusive: exactly `required` seconds after `since` is enough.
pub fn invariant_period_elapsed(
    since: Timestamp,
    now: Timestamp,
    required: Timestamp,
) -> Result<(), LedgerError> {
    let elapsed = now.saturating_sub(since);
    if elapsed < required {
        return Err(LedgerError::TooEarly { elapsed, required });
    }
    Ok(())
}

/// Invariant: the revealed nonce reproduces the commitment.
///
/// The claimer is part of the preimage, so a copied reveal submitted by
/// anyone else does not match.
pub fn invariant_commitment_matches(
    commitment: &Hash,
    nonce: &Hash,
    claimer: &Address,
    target: &Address,
) -> bool {
    commitment_hash(nonce, claimer, target) == *commitment
}

/// Invariant: collateral covers the requirement.
///
/// `required` is `None` when `rate × balance` overflowed, which no payment
/// can cover.
pub fn invariant_collateral_sufficient(
    paid: Wei,
    required: Option<Wei>,
) -> Result<(), LedgerError> {
    match required {
        Some(required) if paid >= required => Ok(()),
        Some(required) => Err(LedgerError::InsufficientCollateral { paid, required }),
        None => Err(LedgerError::InsufficientCollateral {
            paid,
            required: Wei::MAX,
        }),
    }
}
