//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits against the share ledger.

mod share_ledger;
