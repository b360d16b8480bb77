//! # Hashing Helpers
//!
//! Keccak-256 based commitment scheme for the claim reveal phase.
//!
//! A commitment binds a secret nonce to both the claimer and the target:
//!
//! ```text
//! commitment = keccak256(nonce[32] || claimer[20] || target[20])
//! ```
//!
//! Binding the claimer prevents a front-runner from replaying a revealed
//! nonce under their own address; binding the target prevents the same
//! commitment from being redirected at a different account.

use crate::entities::{Address, Hash};
use sha3::{Digest, Keccak256};

/// Computes the Keccak-256 digest of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    Hash(hasher.finalize().into())
}

/// Derives a 32-byte claim nonce from a human-readable phrase.
#[must_use]
pub fn nonce_from_phrase(phrase: &str) -> Hash {
    keccak256(phrase.as_bytes())
}

/// Computes the packed commitment over `(nonce, claimer, target)`.
#[must_use]
pub fn commitment_hash(nonce: &Hash, claimer: &Address, target: &Address) -> Hash {
    let mut packed = [0u8; 72];
    packed[..32].copy_from_slice(nonce.as_bytes());
    packed[32..52].copy_from_slice(claimer.as_bytes());
    packed[52..].copy_from_slice(target.as_bytes());
    keccak256(&packed)
}
