//! # Claim Parameters
//!
//! Owner-adjustable collateral rate and clearing period, plus the fixed
//! pre-claim waiting period.

use serde::{Deserialize, Serialize};
use shared_types::{LedgerError, Shares, Timestamp, Wei, SECONDS_PER_DAY};

/// Minimum permitted clearing period, in days.
pub const MIN_CLEARING_PERIOD_DAYS: u64 = 30;

/// Default clearing period, in days.
pub const DEFAULT_CLEARING_PERIOD_DAYS: u64 = 180;

/// Delay between `prepare_claim` and `declare_lost` (24 hours).
pub const PRE_CLAIM_WAITING_PERIOD: Timestamp = SECONDS_PER_DAY;

/// Default collateral rate: 10^18 wei per share.
pub fn default_collateral_rate() -> Wei {
    Wei::exp10(18)
}

/// Claim parameters singleton.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimParameters {
    collateral_rate: Wei,
    clearing_period_days: u64,
    #[serde(skip, default = "pre_claim_waiting_period")]
    pre_claim_waiting_period: Timestamp,
}

fn pre_claim_waiting_period() -> Timestamp {
    PRE_CLAIM_WAITING_PERIOD
}

impl Default for ClaimParameters {
    fn default() -> Self {
        Self {
            collateral_rate: default_collateral_rate(),
            clearing_period_days: DEFAULT_CLEARING_PERIOD_DAYS,
            pre_claim_waiting_period: PRE_CLAIM_WAITING_PERIOD,
        }
    }
}

impl ClaimParameters {
    /// Validated parameters.
    ///
    /// `collateral_rate` must be at least 1 and `clearing_period_days` at
    /// least [`MIN_CLEARING_PERIOD_DAYS`].
    pub fn new(collateral_rate: Wei, clearing_period_days: u64) -> Result<Self, LedgerError> {
        if collateral_rate.is_zero() {
            return Err(LedgerError::InvalidParameter {
                name: "collateral_rate",
                reason: "must be at least 1".to_string(),
            });
        }
        if clearing_period_days < MIN_CLEARING_PERIOD_DAYS {
            return Err(LedgerError::InvalidParameter {
                name: "clearing_period_days",
                reason: format!(
                    "{clearing_period_days} is below the minimum of {MIN_CLEARING_PERIOD_DAYS}"
                ),
            });
        }
        Ok(Self {
            collateral_rate,
            clearing_period_days,
            pre_claim_waiting_period: PRE_CLAIM_WAITING_PERIOD,
        })
    }

    /// Native value required per share.
    #[must_use]
    pub fn collateral_rate(&self) -> Wei {
        self.collateral_rate
    }

    /// Clearing period in days.
    #[must_use]
    pub fn clearing_period_days(&self) -> u64 {
        self.clearing_period_days
    }

    /// Clearing period in seconds.
    #[must_use]
    pub fn clearing_period(&self) -> Timestamp {
        self.clearing_period_days.saturating_mul(SECONDS_PER_DAY)
    }

    /// Fixed pre-claim waiting period in seconds.
    #[must_use]
    pub fn pre_claim_waiting_period(&self) -> Timestamp {
        self.pre_claim_waiting_period
    }

    /// Collateral for a target holding `balance` shares, `None` on overflow.
    #[must_use]
    pub fn required_collateral(&self, balance: Shares) -> Option<Wei> {
        self.collateral_rate.checked_mul(Wei::from(balance))
    }
}
