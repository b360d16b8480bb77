//! # Activity Guard
//!
//! A transfer paid out of a claimed account proves the key is not lost.
//! The guard runs inside the same call as that transfer and clears the
//! claim before the shares move. When the payout fails the transfer must
//! not proceed either.

use crate::ports::CollateralPayout;
use crate::protocol::RecoveryProtocol;
use shared_types::{Address, LedgerError, LedgerEvent};
use tracing::debug;

/// Auto-clear hook for outgoing transfers.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActivityGuard;

impl ActivityGuard {
    /// Clear any live claim against `sender`.
    ///
    /// Returns `Ok(None)` when `sender` is not claimed.
    pub fn on_outgoing_transfer<P: CollateralPayout>(
        &self,
        protocol: &mut RecoveryProtocol,
        payout: &mut P,
        sender: Address,
    ) -> Result<Option<LedgerEvent>, LedgerError> {
        if !protocol.is_claimed(&sender) {
            return Ok(None);
        }
        debug!(%sender, "Claimed account is active");
        protocol.settle_cleared(payout, sender)
    }
}
