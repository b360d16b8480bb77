//! # Domain Module
//!
//! Core domain types for the share ledger.

pub mod access;
pub mod entities;
pub mod ledger;

pub use access::AccessControl;
pub use entities::TokenMetadata;
pub use ledger::ShareLedger;
