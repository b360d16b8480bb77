//! # Domain Entities for the Share Ledger

use serde::{Deserialize, Serialize};
use shared_types::Shares;

/// Descriptive token metadata and the initial authorized share count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable token name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display decimals. Shares are indivisible, so this is normally 0.
    pub decimals: u8,
    /// Authorized share count at deployment.
    pub total_shares: Shares,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "Alethena Shares".to_string(),
            symbol: "ATH".to_string(),
            decimals: 0,
            total_shares: 1000,
        }
    }
}
