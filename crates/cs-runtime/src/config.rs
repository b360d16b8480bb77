//! # Runtime Configuration
//!
//! Deployment parameters with defaults, environment overrides and
//! validation.

use crate::contract::TokenConfig;
use cs_01_share_ledger::TokenMetadata;
use cs_02_lost_key_recovery::{
    default_collateral_rate, ClaimParameters, ClearedCollateralPolicy,
    DEFAULT_CLEARING_PERIOD_DAYS, MIN_CLEARING_PERIOD_DAYS,
};
use shared_types::{Address, Shares, Wei};
use std::env;
use thiserror::Error;
use tracing::info;

/// Master identity used when `CS_MASTER` is unset.
pub const DEFAULT_MASTER: Address = Address::new([
    0x0e, 0x0a, 0x1a, 0x8d, 0xaa, 0x22, 0x8d, 0xef, 0x4a, 0x4a, 0x86, 0x13, 0xb3, 0xe4, 0x0a, 0xaf,
    0x43, 0x5d, 0x31, 0x9e,
]);

/// Owner used when `CS_OWNER` is unset.
pub const DEFAULT_OWNER: Address = Address::repeat(0x11);

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable does not parse.
    #[error("Invalid value for {var}: {reason}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Parse failure.
        reason: String,
    },

    /// The assembled configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Initial owner.
    pub owner: Address,
    /// Master identity.
    pub master: Address,
    /// Token metadata and initial share cap.
    pub token: TokenMetadata,
    /// Native value per share required as collateral.
    pub collateral_rate: Wei,
    /// Clearing period in days.
    pub clearing_period_days: u64,
    /// Pay cleared collateral to the defending holder instead of refunding.
    pub forfeit_cleared_collateral: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER,
            master: DEFAULT_MASTER,
            token: TokenMetadata::default(),
            collateral_rate: default_collateral_rate(),
            clearing_period_days: DEFAULT_CLEARING_PERIOD_DAYS,
            forfeit_cleared_collateral: false,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables over the defaults.
    ///
    /// # Environment Variables
    ///
    /// - `CS_OWNER`, `CS_MASTER`: hex addresses
    /// - `CS_TOKEN_NAME`, `CS_TOKEN_SYMBOL`: token metadata
    /// - `CS_TOTAL_SHARES`: initial share cap
    /// - `CS_COLLATERAL_RATE`: wei per share, decimal
    /// - `CS_CLEARING_PERIOD_DAYS`: clearing period
    /// - `CS_FORFEIT_CLEARED_COLLATERAL`: `true`/`1` to forfeit cleared collateral
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("CS_OWNER") {
            config.owner = parse_address("CS_OWNER", &v)?;
        }
        if let Some(v) = lookup("CS_MASTER") {
            config.master = parse_address("CS_MASTER", &v)?;
        }
        if let Some(v) = lookup("CS_TOKEN_NAME") {
            config.token.name = v;
        }
        if let Some(v) = lookup("CS_TOKEN_SYMBOL") {
            config.token.symbol = v;
        }
        if let Some(v) = lookup("CS_TOTAL_SHARES") {
            config.token.total_shares =
                v.parse::<Shares>()
                    .map_err(|e| ConfigError::InvalidEnv {
                        var: "CS_TOTAL_SHARES",
                        reason: e.to_string(),
                    })?;
        }
        if let Some(v) = lookup("CS_COLLATERAL_RATE") {
            config.collateral_rate =
                Wei::from_dec_str(&v).map_err(|e| ConfigError::InvalidEnv {
                    var: "CS_COLLATERAL_RATE",
                    reason: format!("{e:?}"),
                })?;
        }
        if let Some(v) = lookup("CS_CLEARING_PERIOD_DAYS") {
            config.clearing_period_days = v.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidEnv {
                    var: "CS_CLEARING_PERIOD_DAYS",
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(v) = lookup("CS_FORFEIT_CLEARED_COLLATERAL") {
            config.forfeit_cleared_collateral = v.to_lowercase() == "true" || v == "1";
        }

        info!(
            owner = %config.owner,
            master = %config.master,
            total_shares = config.token.total_shares,
            clearing_period_days = config.clearing_period_days,
            "Runtime configuration loaded"
        );
        Ok(config)
    }

    /// Check the configuration for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.is_zero() || self.master.is_zero() {
            return Err(ConfigError::Invalid(
                "owner and master must be non-zero".to_string(),
            ));
        }
        if self.owner == self.master {
            return Err(ConfigError::Invalid(
                "owner and master must be distinct".to_string(),
            ));
        }
        if self.collateral_rate.is_zero() {
            return Err(ConfigError::Invalid(
                "collateral rate must be at least 1".to_string(),
            ));
        }
        if self.clearing_period_days < MIN_CLEARING_PERIOD_DAYS {
            return Err(ConfigError::Invalid(format!(
                "clearing period must be at least {MIN_CLEARING_PERIOD_DAYS} days"
            )));
        }
        Ok(())
    }

    /// Deployment parameters for the contract.
    pub fn token_config(&self) -> Result<TokenConfig, ConfigError> {
        self.validate()?;
        let params = ClaimParameters::new(self.collateral_rate, self.clearing_period_days)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let policy = if self.forfeit_cleared_collateral {
            ClearedCollateralPolicy::ForfeitToHolder
        } else {
            ClearedCollateralPolicy::RefundClaimant
        };

        Ok(TokenConfig {
            metadata: self.token.clone(),
            owner: self.owner,
            master: self.master,
            params,
            policy,
        })
    }
}

fn parse_address(var: &'static str, value: &str) -> Result<Address, ConfigError> {
    value.parse().map_err(|e: shared_types::ParseHexError| ConfigError::InvalidEnv {
        var,
        reason: e.to_string(),
    })
}
