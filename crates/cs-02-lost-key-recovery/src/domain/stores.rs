//! # Commitment and Claim Stores
//!
//! Keyed storage for pre-claims (by claimer) and claims (by target).
//! Accessors return zero values for absent entries.

use crate::domain::entities::{Claim, PreClaim};
use shared_types::{Address, Hash, Timestamp, Wei};
use std::collections::HashMap;

/// Pre-claim commitments, one per claimer.
#[derive(Clone, Debug, Default)]
pub struct CommitmentStore {
    entries: HashMap<Address, PreClaim>,
}

impl CommitmentStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite the claimer's commitment.
    pub fn register(&mut self, claimer: Address, commitment: Hash, now: Timestamp) {
        self.entries.insert(
            claimer,
            PreClaim {
                commitment,
                created_at: now,
            },
        );
    }

    /// The claimer's commitment, if any.
    pub fn read(&self, claimer: &Address) -> Option<&PreClaim> {
        self.entries.get(claimer)
    }

    /// Drop the claimer's commitment.
    pub fn clear(&mut self, claimer: &Address) -> Option<PreClaim> {
        self.entries.remove(claimer)
    }

    /// Commitment hash, zero when absent.
    pub fn msg_hash(&self, claimer: &Address) -> Hash {
        self.read(claimer)
            .map(|pre| pre.commitment)
            .unwrap_or(Hash::ZERO)
    }

    /// Registration time, zero when absent.
    pub fn time_stamp(&self, claimer: &Address) -> Timestamp {
        self.read(claimer).map(|pre| pre.created_at).unwrap_or(0)
    }

    /// Number of registered commitments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no commitments are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Live claims, one per target.
#[derive(Clone, Debug, Default)]
pub struct ClaimRegistry {
    claims: HashMap<Address, Claim>,
}

impl ClaimRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The live claim against `target`, if any.
    pub fn get(&self, target: &Address) -> Option<&Claim> {
        self.claims.get(target)
    }

    /// Returns true if `target` has a live claim.
    pub fn contains(&self, target: &Address) -> bool {
        self.claims.contains_key(target)
    }

    /// Open a claim. Caller has checked that none exists.
    pub fn open(&mut self, target: Address, claim: Claim) {
        self.claims.insert(target, claim);
    }

    /// Close the claim against `target`.
    pub fn close(&mut self, target: &Address) -> Option<Claim> {
        self.claims.remove(target)
    }

    /// Claimant, zero address when absent.
    pub fn claimant(&self, target: &Address) -> Address {
        self.get(target)
            .map(|claim| claim.claimant)
            .unwrap_or(Address::ZERO)
    }

    /// Escrowed collateral, zero when absent.
    pub fn collateral(&self, target: &Address) -> Wei {
        self.get(target)
            .map(|claim| claim.collateral)
            .unwrap_or_default()
    }

    /// Declaration time, zero when absent.
    pub fn time_stamp(&self, target: &Address) -> Timestamp {
        self.get(target).map(|claim| claim.created_at).unwrap_or(0)
    }

    /// Sum of collateral across live claims.
    pub fn total_collateral(&self) -> Wei {
        self.claims
            .values()
            .fold(Wei::zero(), |acc, claim| acc.saturating_add(claim.collateral))
    }

    /// Number of live claims.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Returns true if no claims are live.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
