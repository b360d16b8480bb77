//! # CS-02 Lost-Key Recovery
//!
//! Commit-reveal recovery of shares stranded behind a lost key.
//!
//! **Subsystem ID:** 2  
//! **Architecture:** Hexagonal (domain + ports/adapters)
//!
//! ## Purpose
//!
//! A third party recovers a dormant account's shares by:
//! 1. Registering `keccak256(nonce ‖ claimer ‖ target)` (`prepare_claim`)
//! 2. Revealing the nonce at least 24h later with collateral of
//!    `rate × balance(target)` attached (`declare_lost`)
//! 3. Collecting the balance after the clearing period (`resolve_claim`)
//!
//! The claim can be cancelled by the owner (`delete_claim`), by the target
//! (`clear_claim`), or implicitly whenever the target sends shares
//! (`ActivityGuard`).
//!
//! ## Security Properties
//!
//! | Defense | Description |
//! |---------|-------------|
//! | Claimer-bound commitment | A copied reveal fails `HashMismatch` |
//! | Pre-claim delay | Reveal rejected for 24h after commit |
//! | Collateral at stake | Claimant escrows value proportional to the target balance |
//! | Single claim per target | Second declaration fails `AlreadyClaimed` |
//! | Activity clears | Any transfer by the target cancels the claim |
//!
//! ## Module Structure
//!
//! ```text
//! cs-02-lost-key-recovery/
//! ├── domain/          # PreClaim, Claim, ClaimParameters, stores, invariants
//! ├── ports/           # LedgerAccess, CollateralPayout, TimeSource
//! ├── adapters/        # LedgerAccess for ShareLedger
//! ├── protocol.rs      # RecoveryProtocol
//! └── guard.rs         # ActivityGuard
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod guard;
pub mod ports;
pub mod protocol;

// Re-exports
pub use domain::{
    default_collateral_rate, Claim, ClaimParameters, ClaimRegistry, ClearedCollateralPolicy,
    CommitmentStore, PreClaim, DEFAULT_CLEARING_PERIOD_DAYS, MIN_CLEARING_PERIOD_DAYS,
    PRE_CLAIM_WAITING_PERIOD,
};
pub use guard::ActivityGuard;
pub use ports::{
    CollateralPayout, LedgerAccess, MockLedger, MockPayout, MockTimeSource, SystemTimeSource,
    TimeSource,
};
pub use protocol::RecoveryProtocol;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
