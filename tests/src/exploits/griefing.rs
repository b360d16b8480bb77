//! # Hostile Claims
//!
//! A claim filed against a holder who still controls the key. The holder
//! keeps full use of the shares, and any outgoing transfer ends the claim.
//! Under the forfeit policy the attacker also loses the collateral.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use cs_02_lost_key_recovery::ClearedCollateralPolicy;
    use cs_runtime::LedgerCall;
    use shared_types::{LedgerError, LedgerEvent};

    const ATTACKER: shared_types::Address = OTHER_2;
    const VICTIM: shared_types::Address = SHAREHOLDER_2;

    #[test]
    fn test_claim_does_not_freeze_victim() {
        let mut h = Harness::with_shareholders();
        h.open_claim(ATTACKER, VICTIM, "grief");

        h.call(
            VICTIM,
            LedgerCall::Approve {
                spender: TOKENHOLDER_1,
                value: 20,
            },
        )
        .unwrap();
        h.call(
            VICTIM,
            LedgerCall::Transfer {
                to: TOKENHOLDER_2,
                amount: 20,
            },
        )
        .unwrap();
        assert_eq!(h.token.balance_of(&TOKENHOLDER_2), 20);
        assert_eq!(h.token.live_claims(), 0);
    }

    #[test]
    fn test_zero_amount_transfer_clears_claim() {
        let mut h = Harness::with_shareholders();
        h.open_claim(ATTACKER, VICTIM, "grief");

        let events = h
            .call(
                VICTIM,
                LedgerCall::Transfer {
                    to: VICTIM,
                    amount: 0,
                },
            )
            .unwrap();
        assert!(matches!(events[0], LedgerEvent::ClaimCleared { .. }));
        assert_eq!(h.token.balance_of(&VICTIM), 20);
    }

    #[test]
    fn test_attacker_pays_for_failed_griefing_under_forfeit() {
        let mut h = Harness::with_policy(ClearedCollateralPolicy::ForfeitToHolder);
        h.issue_shares();
        h.open_claim(ATTACKER, VICTIM, "grief");

        let events = h.call(VICTIM, LedgerCall::ClearClaim).unwrap();
        assert_eq!(
            events,
            vec![LedgerEvent::ClaimCleared {
                target: VICTIM,
                claimant: ATTACKER,
                collateral: ether(20),
                recipient: VICTIM,
            }]
        );
        assert_eq!(h.token.native_balance_of(&ATTACKER), ether(980));
        assert_eq!(h.token.native_balance_of(&VICTIM), ether(1_020));
    }

    #[test]
    fn test_repeat_claim_needs_fresh_commitment_and_wait() {
        let mut h = Harness::with_shareholders();
        let nonce = h.prepare(ATTACKER, VICTIM, "grief");
        h.advance(PRE_CLAIM_WAIT);
        h.declare(ATTACKER, VICTIM, nonce).unwrap();
        h.call(VICTIM, LedgerCall::ClearClaim).unwrap();

        assert_eq!(
            h.declare(ATTACKER, VICTIM, nonce).unwrap_err(),
            LedgerError::NoCommitment { claimer: ATTACKER }
        );
        h.prepare(ATTACKER, VICTIM, "grief again");
        assert!(matches!(
            h.declare(ATTACKER, VICTIM, nonce).unwrap_err(),
            LedgerError::HashMismatch { .. }
        ));
    }

    #[test]
    fn test_attacker_cannot_clear_or_delete_others_claims() {
        let mut h = Harness::with_shareholders();
        h.open_claim(OTHER_1, SHAREHOLDER_1, "honest");

        assert_eq!(
            h.call(ATTACKER, LedgerCall::ClearClaim).unwrap_err(),
            LedgerError::NoClaim { target: ATTACKER }
        );
        assert!(matches!(
            h.call(
                ATTACKER,
                LedgerCall::DeleteClaim {
                    target: SHAREHOLDER_1
                }
            )
            .unwrap_err(),
            LedgerError::Unauthorized { .. }
        ));
        assert_eq!(h.token.get_claimant(&SHAREHOLDER_1), OTHER_1);
    }
}
