//! # CS Runtime
//!
//! The claimable share token as a running system.
//!
//! ## Components
//!
//! - `ClaimableShareToken`: ledger + recovery protocol + activity guard,
//!   executing one call at a time, all-or-nothing
//! - `NativeBank`: native-value accounts and the collateral escrow
//! - `LedgerService`: lock-serialized executor producing receipts
//! - `RuntimeConfig`: defaults, environment overrides, validation
//! - `Script`: JSON call scripts replayed by the `cs-node` binary
//!
//! ## Escrow Invariant
//!
//! After every call, the bank's escrow equals the sum of collateral of live
//! claims.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bank;
pub mod call;
pub mod config;
pub mod contract;
pub mod script;
pub mod service;

// Re-exports
pub use bank::NativeBank;
pub use call::LedgerCall;
pub use config::{ConfigError, RuntimeConfig, DEFAULT_MASTER, DEFAULT_OWNER};
pub use contract::{ClaimableShareToken, TokenConfig};
pub use script::{Script, ScriptError};
pub use service::{LedgerService, Receipt, ReceiptStatus};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
