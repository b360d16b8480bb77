//! Share Ledger Adapter
//!
//! Implements `LedgerAccess` for `ShareLedger`.

use crate::ports::LedgerAccess;
use cs_01_share_ledger::ShareLedger;
use shared_types::{Address, LedgerError, LedgerEvent, Shares};

impl LedgerAccess for ShareLedger {
    fn balance_of(&self, account: &Address) -> Shares {
        ShareLedger::balance_of(self, account)
    }

    fn transfer_internal(
        &mut self,
        from: Address,
        to: Address,
        amount: Shares,
    ) -> Result<LedgerEvent, LedgerError> {
        ShareLedger::transfer_internal(self, from, to, amount)
    }
}
