//! # Caller Roles
//!
//! Every entry point resolves the raw caller address into a role-tagged
//! `Caller` once, at the start of the call. Gated operations then match on
//! the variant instead of comparing addresses at each call site.

use crate::entities::Address;
use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};

/// A caller tagged with the role it holds for the current call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Caller {
    /// The administrative owner.
    Owner(Address),
    /// The master identity (sole authority to transfer ownership).
    Master(Address),
    /// Any other account.
    Other(Address),
}

impl Caller {
    /// The address behind the role.
    #[must_use]
    pub const fn address(&self) -> Address {
        match self {
            Self::Owner(addr) | Self::Master(addr) | Self::Other(addr) => *addr,
        }
    }

    /// Returns true for `Caller::Owner`.
    #[must_use]
    pub const fn is_owner(&self) -> bool {
        matches!(self, Self::Owner(_))
    }

    /// Returns true for `Caller::Master`.
    #[must_use]
    pub const fn is_master(&self) -> bool {
        matches!(self, Self::Master(_))
    }

    /// Fails with `Unauthorized` unless the caller is the owner.
    pub fn require_owner(&self, action: &'static str) -> Result<Address, LedgerError> {
        match self {
            Self::Owner(addr) => Ok(*addr),
            _ => Err(LedgerError::Unauthorized {
                caller: self.address(),
                action,
            }),
        }
    }

    /// Fails with `Unauthorized` unless the caller is the master.
    pub fn require_master(&self, action: &'static str) -> Result<Address, LedgerError> {
        match self {
            Self::Master(addr) => Ok(*addr),
            _ => Err(LedgerError::Unauthorized {
                caller: self.address(),
                action,
            }),
        }
    }
}
