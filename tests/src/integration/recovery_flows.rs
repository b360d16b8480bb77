//! # Recovery Flows
//!
//! The three lifecycles of a claim, run against a deployed token:
//!
//! 1. **Resolved**: a legitimate claim matures and the claimant collects.
//! 2. **Cleared**: the "lost" holder moves shares and the claim disappears.
//! 3. **Deleted**: the owner cancels a claim and refunds the collateral.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use cs_02_lost_key_recovery::ClearedCollateralPolicy;
    use cs_runtime::LedgerCall;
    use shared_types::{
        commitment_hash, nonce_from_phrase, Address, Hash, LedgerError, LedgerEvent, Wei,
    };

    // =========================================================================
    // CASE 1: LEGITIMATE CLAIM RESOLVED AFTER THE CLEARING PERIOD
    // =========================================================================

    #[test]
    fn test_prepare_claim_records_commitment_and_time() {
        let mut h = Harness::with_shareholders();
        let nonce = nonce_from_phrase("Best nonce ever");
        let commitment = commitment_hash(&nonce, &OTHER_1, &SHAREHOLDER_1);

        let events = h
            .call(OTHER_1, LedgerCall::PrepareClaim { commitment })
            .unwrap();

        assert_eq!(events, vec![LedgerEvent::ClaimPrepared { claimer: OTHER_1 }]);
        assert_eq!(h.token.get_msg_hash(&OTHER_1), commitment);
        assert_eq!(h.token.get_pre_claim_time_stamp(&OTHER_1), GENESIS);
    }

    #[test]
    fn test_declare_rejected_before_pre_claim_period() {
        let mut h = Harness::with_shareholders();
        let nonce = h.prepare(OTHER_1, SHAREHOLDER_1, "Best nonce ever");

        let err = h.declare(OTHER_1, SHAREHOLDER_1, nonce).unwrap_err();
        assert!(matches!(err, LedgerError::TooEarly { elapsed: 0, .. }));
        assert_eq!(h.token.native_balance_of(&OTHER_1), ether(1_000));
    }

    #[test]
    fn test_declare_rejected_for_wrong_nonce_claimer_or_target() {
        let mut h = Harness::with_shareholders();
        let nonce = h.prepare(OTHER_1, SHAREHOLDER_1, "Best nonce ever");
        h.advance(PRE_CLAIM_WAIT);

        let wrong = nonce_from_phrase("Worst nonce ever");
        assert_eq!(
            h.declare(OTHER_1, SHAREHOLDER_1, wrong).unwrap_err(),
            LedgerError::HashMismatch { claimer: OTHER_1 }
        );
        assert_eq!(
            h.declare(OTHER_2, SHAREHOLDER_1, nonce).unwrap_err(),
            LedgerError::NoCommitment { claimer: OTHER_2 }
        );
        assert_eq!(
            h.declare(OTHER_1, SHAREHOLDER_2, nonce).unwrap_err(),
            LedgerError::HashMismatch { claimer: OTHER_1 }
        );
        assert_eq!(h.token.live_claims(), 0);
        assert!(h.token.escrow_balance().is_zero());
    }

    #[test]
    fn test_legitimate_claim_resolved_after_clearing_period() {
        let mut h = Harness::with_shareholders();
        let nonce = h.prepare(OTHER_1, SHAREHOLDER_1, "Best nonce ever");
        h.advance(PRE_CLAIM_WAIT);

        let collateral = ether(10);
        let events = h
            .call_with_value(
                OTHER_1,
                collateral,
                LedgerCall::DeclareLost {
                    target: SHAREHOLDER_1,
                    nonce,
                },
            )
            .unwrap();
        assert_eq!(
            events,
            vec![LedgerEvent::ClaimDeclared {
                target: SHAREHOLDER_1,
                claimant: OTHER_1,
                balance: 10,
            }]
        );
        let declared_at = h.now;
        assert_eq!(h.token.get_claimant(&SHAREHOLDER_1), OTHER_1);
        assert_eq!(h.token.get_collateral(&SHAREHOLDER_1), collateral);
        assert_eq!(h.token.get_time_stamp(&SHAREHOLDER_1), declared_at);
        assert_eq!(h.token.get_pre_claim_time_stamp(&OTHER_1), 0);
        assert_eq!(h.token.get_msg_hash(&OTHER_1), Hash::ZERO);
        assert_eq!(h.token.native_balance_of(&OTHER_1), ether(990));
        assert_eq!(h.token.escrow_balance(), collateral);

        let err = h
            .call(OTHER_1, LedgerCall::ResolveClaim { target: SHAREHOLDER_1 })
            .unwrap_err();
        assert!(matches!(err, LedgerError::TooEarly { .. }));

        h.advance(300 * DAY);
        let events = h
            .call(OTHER_1, LedgerCall::ResolveClaim { target: SHAREHOLDER_1 })
            .unwrap();
        assert_eq!(
            events,
            vec![
                LedgerEvent::Transfer {
                    from: SHAREHOLDER_1,
                    to: OTHER_1,
                    amount: 10,
                },
                LedgerEvent::ClaimResolved {
                    target: SHAREHOLDER_1,
                    claimant: OTHER_1,
                    amount: 10,
                    collateral,
                },
            ]
        );

        assert_eq!(h.token.get_claimant(&SHAREHOLDER_1), Address::ZERO);
        assert!(h.token.get_collateral(&SHAREHOLDER_1).is_zero());
        assert_eq!(h.token.get_time_stamp(&SHAREHOLDER_1), 0);
        assert_eq!(h.token.balance_of(&SHAREHOLDER_1), 0);
        assert_eq!(h.token.balance_of(&OTHER_1), 10);
        assert_eq!(h.token.native_balance_of(&OTHER_1), ether(1_000));
        assert!(h.token.escrow_balance().is_zero());
    }

    #[test]
    fn test_resolve_at_exact_clearing_boundary() {
        let mut h = Harness::with_shareholders();
        h.open_claim(OTHER_1, SHAREHOLDER_1, "boundary");
        let period = h.token.clearing_period_secs();

        h.advance(period - 1);
        assert!(h
            .call(OTHER_1, LedgerCall::ResolveClaim { target: SHAREHOLDER_1 })
            .is_err());

        h.advance(1);
        assert!(h
            .call(OTHER_1, LedgerCall::ResolveClaim { target: SHAREHOLDER_1 })
            .is_ok());
    }

    #[test]
    fn test_only_claimant_may_resolve() {
        let mut h = Harness::with_shareholders();
        h.open_claim(OTHER_1, SHAREHOLDER_1, "mine");
        h.advance(300 * DAY);

        for caller in [OTHER_2, OWNER, MASTER, SHAREHOLDER_1] {
            let err = h
                .call(caller, LedgerCall::ResolveClaim { target: SHAREHOLDER_1 })
                .unwrap_err();
            assert!(matches!(err, LedgerError::Unauthorized { .. }));
        }
        assert!(h.token.get_claimant(&SHAREHOLDER_1) == OTHER_1);
    }

    #[test]
    fn test_resolve_collects_balance_grown_after_declaration() {
        let mut h = Harness::with_shareholders();
        h.open_claim(OTHER_1, SHAREHOLDER_1, "grow");
        h.mint(SHAREHOLDER_1, 5);
        h.advance(300 * DAY);

        h.call(OTHER_1, LedgerCall::ResolveClaim { target: SHAREHOLDER_1 })
            .unwrap();
        assert_eq!(h.token.balance_of(&OTHER_1), 15);
        assert_eq!(h.token.balance_of(&SHAREHOLDER_1), 0);
    }

    // =========================================================================
    // CASE 2: CLAIM CLEARED BY ACTIVITY
    // =========================================================================

    #[test]
    fn test_underfunded_and_zero_balance_declarations_rejected() {
        let mut h = Harness::with_shareholders();
        let nonce = h.prepare(OTHER_1, SHAREHOLDER_2, "Even better nonce");
        h.advance(PRE_CLAIM_WAIT);

        let err = h
            .call_with_value(
                OTHER_1,
                ether(10),
                LedgerCall::DeclareLost {
                    target: SHAREHOLDER_2,
                    nonce,
                },
            )
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientCollateral {
                paid: ether(10),
                required: ether(20),
            }
        );

        let nonce = h.prepare(OTHER_1, TOKENHOLDER_3, "Even better nonce");
        h.advance(PRE_CLAIM_WAIT);
        let err = h
            .call_with_value(
                OTHER_1,
                ether(10),
                LedgerCall::DeclareLost {
                    target: TOKENHOLDER_3,
                    nonce,
                },
            )
            .unwrap_err();
        assert_eq!(err, LedgerError::ZeroBalance { target: TOKENHOLDER_3 });
        assert_eq!(h.token.native_balance_of(&OTHER_1), ether(1_000));
    }

    #[test]
    fn test_second_claim_on_claimed_target_rejected() {
        let mut h = Harness::with_shareholders();
        h.open_claim(OTHER_2, SHAREHOLDER_2, "Wow that nonce");

        let nonce = h.prepare(OTHER_3, SHAREHOLDER_2, "Even better nonce 2");
        h.advance(PRE_CLAIM_WAIT);
        assert_eq!(
            h.declare(OTHER_3, SHAREHOLDER_2, nonce).unwrap_err(),
            LedgerError::AlreadyClaimed {
                target: SHAREHOLDER_2
            }
        );
        // The losing commitment survives for a later attempt.
        assert_ne!(h.token.get_msg_hash(&OTHER_3), Hash::ZERO);
    }

    #[test]
    fn test_transfer_from_claimed_account_clears_claim() {
        let mut h = Harness::with_shareholders();
        h.open_claim(OTHER_2, SHAREHOLDER_2, "Wow that nonce");
        let collateral = h.token.get_collateral(&SHAREHOLDER_2);
        assert_eq!(collateral, ether(20));

        let events = h
            .call(
                SHAREHOLDER_2,
                LedgerCall::Transfer {
                    to: TOKENHOLDER_2,
                    amount: 5,
                },
            )
            .unwrap();

        assert_eq!(
            events,
            vec![
                LedgerEvent::ClaimCleared {
                    target: SHAREHOLDER_2,
                    claimant: OTHER_2,
                    collateral,
                    recipient: OTHER_2,
                },
                LedgerEvent::Transfer {
                    from: SHAREHOLDER_2,
                    to: TOKENHOLDER_2,
                    amount: 5,
                },
            ]
        );
        assert_eq!(h.token.get_claimant(&SHAREHOLDER_2), Address::ZERO);
        assert!(h.token.get_collateral(&SHAREHOLDER_2).is_zero());
        assert_eq!(h.token.get_time_stamp(&SHAREHOLDER_2), 0);
        assert_eq!(h.token.balance_of(&TOKENHOLDER_2), 5);
        assert_eq!(h.token.native_balance_of(&OTHER_2), ether(1_000));
    }

    #[test]
    fn test_forfeit_policy_pays_defending_holder() {
        let mut h = Harness::with_policy(ClearedCollateralPolicy::ForfeitToHolder);
        h.issue_shares();
        h.open_claim(OTHER_2, SHAREHOLDER_2, "hostile");

        h.call(
            SHAREHOLDER_2,
            LedgerCall::Transfer {
                to: TOKENHOLDER_2,
                amount: 1,
            },
        )
        .unwrap();

        assert_eq!(h.token.native_balance_of(&SHAREHOLDER_2), ether(1_020));
        assert_eq!(h.token.native_balance_of(&OTHER_2), ether(980));
    }

    #[test]
    fn test_spending_through_allowance_clears_owner_claim() {
        let mut h = Harness::with_shareholders();
        h.open_claim(OTHER_1, SHAREHOLDER_1, "allowance");
        h.call(
            SHAREHOLDER_1,
            LedgerCall::Approve {
                spender: TOKENHOLDER_1,
                value: 4,
            },
        )
        .unwrap();
        assert_eq!(h.token.get_claimant(&SHAREHOLDER_1), OTHER_1);

        let events = h
            .call(
                TOKENHOLDER_1,
                LedgerCall::TransferFrom {
                    from: SHAREHOLDER_1,
                    to: TOKENHOLDER_1,
                    amount: 4,
                },
            )
            .unwrap();
        assert!(matches!(events[0], LedgerEvent::ClaimCleared { .. }));
        assert_eq!(h.token.live_claims(), 0);
    }

    #[test]
    fn test_incoming_transfer_does_not_clear_claim() {
        let mut h = Harness::with_shareholders();
        h.open_claim(OTHER_1, SHAREHOLDER_1, "incoming");

        h.call(
            OWNER,
            LedgerCall::Transfer {
                to: SHAREHOLDER_1,
                amount: 3,
            },
        )
        .unwrap();
        assert_eq!(h.token.get_claimant(&SHAREHOLDER_1), OTHER_1);
    }

    #[test]
    fn test_target_clears_claim_explicitly() {
        let mut h = Harness::with_shareholders();
        h.open_claim(OTHER_1, SHAREHOLDER_1, "explicit");

        let events = h.call(SHAREHOLDER_1, LedgerCall::ClearClaim).unwrap();
        assert_eq!(
            events,
            vec![LedgerEvent::ClaimCleared {
                target: SHAREHOLDER_1,
                claimant: OTHER_1,
                collateral: ether(10),
                recipient: OTHER_1,
            }]
        );
        assert_eq!(h.token.balance_of(&SHAREHOLDER_1), 10);
        assert_eq!(
            h.call(SHAREHOLDER_1, LedgerCall::ClearClaim).unwrap_err(),
            LedgerError::NoClaim {
                target: SHAREHOLDER_1
            }
        );
    }

    // =========================================================================
    // CASE 3: CLAIM DELETED BY THE OWNER
    // =========================================================================

    #[test]
    fn test_owner_deletes_claim_and_refunds_claimant() {
        let mut h = Harness::with_shareholders();
        h.open_claim(OTHER_3, SHAREHOLDER_3, "Even better nonce 3");
        assert_eq!(h.token.native_balance_of(&OTHER_3), ether(970));

        let err = h
            .call(OTHER_3, LedgerCall::DeleteClaim { target: SHAREHOLDER_3 })
            .unwrap_err();
        assert!(matches!(err, LedgerError::Unauthorized { .. }));

        let events = h
            .call(OWNER, LedgerCall::DeleteClaim { target: SHAREHOLDER_3 })
            .unwrap();
        assert_eq!(
            events,
            vec![LedgerEvent::ClaimDeleted {
                target: SHAREHOLDER_3,
                claimant: OTHER_3,
                collateral: ether(30),
            }]
        );
        assert_eq!(h.token.get_claimant(&SHAREHOLDER_3), Address::ZERO);
        assert_eq!(h.token.native_balance_of(&OTHER_3), ether(1_000));
        assert_eq!(h.token.balance_of(&SHAREHOLDER_3), 30);

        assert_eq!(
            h.call(OWNER, LedgerCall::DeleteClaim { target: SHAREHOLDER_3 })
                .unwrap_err(),
            LedgerError::NoClaim {
                target: SHAREHOLDER_3
            }
        );
    }

    #[test]
    fn test_target_can_be_claimed_again_after_deletion() {
        let mut h = Harness::with_shareholders();
        h.open_claim(OTHER_3, SHAREHOLDER_3, "first");
        h.call(OWNER, LedgerCall::DeleteClaim { target: SHAREHOLDER_3 })
            .unwrap();

        h.open_claim(OTHER_1, SHAREHOLDER_3, "second");
        assert_eq!(h.token.get_claimant(&SHAREHOLDER_3), OTHER_1);
    }

    // =========================================================================
    // PARAMETERS
    // =========================================================================

    #[test]
    fn test_claim_parameter_changes() {
        let mut h = Harness::with_shareholders();

        let events = h
            .call(
                OWNER,
                LedgerCall::SetClaimParameters {
                    collateral_rate: ether(5),
                    clearing_period_days: 50,
                },
            )
            .unwrap();
        assert_eq!(
            events,
            vec![LedgerEvent::ClaimParametersChanged {
                collateral_rate: ether(5),
                clearing_period_days: 50,
            }]
        );
        assert_eq!(h.token.collateral_rate(), ether(5));
        assert_eq!(h.token.clearing_period(), 50);
        assert_eq!(h.token.clearing_period_secs(), 50 * DAY);

        for (rate, days) in [(ether(5), 20), (Wei::zero(), 50)] {
            let err = h
                .call(
                    OWNER,
                    LedgerCall::SetClaimParameters {
                        collateral_rate: rate,
                        clearing_period_days: days,
                    },
                )
                .unwrap_err();
            assert!(matches!(err, LedgerError::InvalidParameter { .. }));
        }
        assert_eq!(h.token.clearing_period(), 50);
        assert_eq!(h.token.clearing_period_secs(), 50 * DAY);

        let err = h
            .call(
                OTHER_1,
                LedgerCall::SetClaimParameters {
                    collateral_rate: ether(1),
                    clearing_period_days: 60,
                },
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::Unauthorized { .. }));
    }

    #[test]
    fn test_live_claim_keeps_its_collateral_after_rate_change() {
        let mut h = Harness::with_shareholders();
        h.open_claim(OTHER_1, SHAREHOLDER_1, "rate");
        h.call(
            OWNER,
            LedgerCall::SetClaimParameters {
                collateral_rate: ether(5),
                clearing_period_days: 30,
            },
        )
        .unwrap();

        assert_eq!(h.token.get_collateral(&SHAREHOLDER_1), ether(10));
        h.advance(30 * DAY);
        h.call(OTHER_1, LedgerCall::ResolveClaim { target: SHAREHOLDER_1 })
            .unwrap();
        assert_eq!(h.token.native_balance_of(&OTHER_1), ether(1_000));
    }

    #[test]
    fn test_unmint_by_claimed_owner_keeps_claim() {
        let mut h = Harness::with_shareholders();
        h.open_claim(OTHER_1, OWNER, "owner key");
        assert_eq!(h.token.get_collateral(&OWNER), ether(100));

        h.call(
            OWNER,
            LedgerCall::Unmint {
                amount: 40,
                message: "buyback".to_string(),
            },
        )
        .unwrap();
        assert_eq!(h.token.get_claimant(&OWNER), OTHER_1);
        assert_eq!(h.token.get_collateral(&OWNER), ether(100));
        assert_eq!(h.token.escrow_balance(), ether(100));

        h.advance(h.token.clearing_period_secs());
        let events = h
            .call(OTHER_1, LedgerCall::ResolveClaim { target: OWNER })
            .unwrap();
        assert!(matches!(
            events.last(),
            Some(LedgerEvent::ClaimResolved { amount: 60, .. })
        ));
        assert_eq!(h.token.balance_of(&OTHER_1), 60);
        assert_eq!(h.token.native_balance_of(&OTHER_1), ether(1_000));
    }
}
