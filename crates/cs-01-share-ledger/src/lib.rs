//! # CS-01 Share Ledger
//!
//! Fungible share bookkeeping for the claimable share token.
//!
//! **Subsystem ID:** 1  
//! **Architecture:** Domain core, consumed by the recovery protocol through ports
//!
//! ## Purpose
//!
//! - Balances, transfers, approvals and allowances
//! - Issuance bounded by an authorized share cap (`total_shares`)
//! - Owner/master role registry
//! - A pause flag gating every ledger mutation
//!
//! ## Invariants
//!
//! | Invariant | Enforced by |
//! |-----------|-------------|
//! | Σ balances == total supply | `ShareLedger` (debit/credit in one step) |
//! | Total supply <= total shares | `mint_many`, `set_total_shares` |
//! | Only the master replaces the owner | `AccessControl::transfer_ownership` |
//! | Paused ledger rejects mutations | every mutation except `pause` |
//!
//! ## Module Structure
//!
//! ```text
//! cs-01-share-ledger/
//! └── domain/          # AccessControl, ShareLedger, TokenMetadata
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;

// Re-exports
pub use domain::{AccessControl, ShareLedger, TokenMetadata};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
