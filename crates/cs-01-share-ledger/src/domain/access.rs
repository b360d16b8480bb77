//! # Access Control
//!
//! Owner/master role registry.
//!
//! - `owner`: administrative authority (mint, unmint, pause, parameters,
//!   claim override).
//! - `master`: the only identity that may replace the owner. The owner
//!   cannot reassign itself.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Caller, LedgerError, LedgerEvent};
use tracing::info;

/// Role registry for a deployed ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    owner: Address,
    master: Address,
}

impl AccessControl {
    /// Create the registry. Owner and master must be distinct, non-zero accounts.
    pub fn new(owner: Address, master: Address) -> Result<Self, LedgerError> {
        if owner.is_zero() || master.is_zero() {
            return Err(LedgerError::InvalidParameter {
                name: "roles",
                reason: "owner and master must be non-zero".to_string(),
            });
        }
        if owner == master {
            return Err(LedgerError::InvalidParameter {
                name: "roles",
                reason: "owner and master must be distinct".to_string(),
            });
        }
        Ok(Self { owner, master })
    }

    /// Current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Master identity.
    #[must_use]
    pub fn master(&self) -> Address {
        self.master
    }

    /// Returns true if `caller` is the owner.
    #[must_use]
    pub fn is_owner(&self, caller: &Address) -> bool {
        *caller == self.owner
    }

    /// Returns true if `caller` is the master.
    #[must_use]
    pub fn is_master(&self, caller: &Address) -> bool {
        *caller == self.master
    }

    /// Tag a raw caller address with its role for the current call.
    #[must_use]
    pub fn resolve(&self, caller: Address) -> Caller {
        if self.is_master(&caller) {
            Caller::Master(caller)
        } else if self.is_owner(&caller) {
            Caller::Owner(caller)
        } else {
            Caller::Other(caller)
        }
    }

    /// Replace the owner. Master only.
    pub fn transfer_ownership(
        &mut self,
        caller: &Caller,
        new_owner: Address,
    ) -> Result<LedgerEvent, LedgerError> {
        caller.require_master("transfer ownership")?;

        if new_owner.is_zero() || new_owner == self.master {
            return Err(LedgerError::InvalidParameter {
                name: "new_owner",
                reason: "must be non-zero and distinct from master".to_string(),
            });
        }

        let previous = std::mem::replace(&mut self.owner, new_owner);
        info!(previous = ?previous, new = ?new_owner, "Ownership transferred");

        Ok(LedgerEvent::OwnershipTransferred {
            previous,
            new: new_owner,
        })
    }
}
