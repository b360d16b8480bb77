//! # Recovery Protocol
//!
//! Commit → reveal → dispute window → resolution.
//!
//! ```text
//! prepare_claim ──(≥ 24h)──► declare_lost ──► Claim ──┬─(≥ clearing period)─► resolve_claim
//!                                                     ├─ delete_claim (owner)
//!                                                     ├─ clear_claim (target)
//!                                                     └─ ActivityGuard (target transfers)
//! ```
//!
//! Every exit from `Claim` pays the escrowed collateral out exactly once.
//! Payouts go through [`CollateralPayout`] before the claim is removed, so a
//! failed payout leaves the claim in place.
//!
//! None of these operations consult the ledger's pause flag.

use crate::domain::{
    invariant_collateral_sufficient, invariant_commitment_matches, invariant_period_elapsed,
    Claim, ClaimParameters, ClaimRegistry, ClearedCollateralPolicy, CommitmentStore,
};
use crate::ports::{CollateralPayout, LedgerAccess};
use shared_types::{Address, Caller, Hash, LedgerError, LedgerEvent, Timestamp, Wei};
use tracing::{debug, info, warn};

/// State of the lost-key recovery protocol.
#[derive(Clone, Debug, Default)]
pub struct RecoveryProtocol {
    commitments: CommitmentStore,
    claims: ClaimRegistry,
    params: ClaimParameters,
    policy: ClearedCollateralPolicy,
}

impl RecoveryProtocol {
    /// Protocol with the given parameters and cleared-collateral policy.
    pub fn new(params: ClaimParameters, policy: ClearedCollateralPolicy) -> Self {
        Self {
            commitments: CommitmentStore::new(),
            claims: ClaimRegistry::new(),
            params,
            policy,
        }
    }

    // =========================================================================
    // COMMIT / REVEAL
    // =========================================================================

    /// Register (or overwrite) the caller's commitment. Open to anyone.
    pub fn prepare_claim(&mut self, claimer: Address, commitment: Hash, now: Timestamp) -> LedgerEvent {
        self.commitments.register(claimer, commitment, now);
        debug!(%claimer, %commitment, now, "Claim prepared");
        LedgerEvent::ClaimPrepared { claimer }
    }

    /// Reveal the nonce and open a claim against `target`.
    ///
    /// `paid` is the native value attached to the call; the caller's
    /// runtime holds it in escrow and returns it if this fails.
    pub fn declare_lost<L: LedgerAccess>(
        &mut self,
        ledger: &L,
        claimer: Address,
        target: Address,
        nonce: Hash,
        paid: Wei,
        now: Timestamp,
    ) -> Result<LedgerEvent, LedgerError> {
        let pre = self
            .commitments
            .read(&claimer)
            .ok_or(LedgerError::NoCommitment { claimer })?;

        if !invariant_commitment_matches(&pre.commitment, &nonce, &claimer, &target) {
            return Err(LedgerError::HashMismatch { claimer });
        }
        invariant_period_elapsed(pre.created_at, now, self.params.pre_claim_waiting_period())?;

        let balance = ledger.balance_of(&target);
        if balance == 0 {
            return Err(LedgerError::ZeroBalance { target });
        }
        if self.claims.contains(&target) {
            return Err(LedgerError::AlreadyClaimed { target });
        }
        invariant_collateral_sufficient(paid, self.params.required_collateral(balance))?;

        self.claims.open(
            target,
            Claim {
                claimant: claimer,
                collateral: paid,
                created_at: now,
            },
        );
        self.commitments.clear(&claimer);

        info!(%target, %claimer, balance, collateral = %paid, "Claim declared");
        Ok(LedgerEvent::ClaimDeclared {
            target,
            claimant: claimer,
            balance,
        })
    }

    // =========================================================================
    // RESOLUTION
    // =========================================================================

    /// Claimant collects the target's entire balance and the collateral once
    /// the clearing period has passed.
    pub fn resolve_claim<L: LedgerAccess, P: CollateralPayout>(
        &mut self,
        ledger: &mut L,
        payout: &mut P,
        caller: &Caller,
        target: Address,
        now: Timestamp,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let claim = self.live_claim(&target)?;
        if caller.address() != claim.claimant {
            return Err(LedgerError::Unauthorized {
                caller: caller.address(),
                action: "resolve this claim",
            });
        }
        invariant_period_elapsed(claim.created_at, now, self.params.clearing_period())?;

        let amount = ledger.balance_of(&target);
        let moved = ledger.transfer_internal(target, claim.claimant, amount)?;
        if let Err(err) = payout.release(claim.claimant, claim.collateral) {
            ledger.transfer_internal(claim.claimant, target, amount)?;
            return Err(err);
        }
        self.claims.close(&target);

        info!(%target, claimant = %claim.claimant, amount, "Claim resolved");
        Ok(vec![
            moved,
            LedgerEvent::ClaimResolved {
                target,
                claimant: claim.claimant,
                amount,
                collateral: claim.collateral,
            },
        ])
    }

    /// Owner cancels a claim. Collateral goes back to the claimant.
    pub fn delete_claim<P: CollateralPayout>(
        &mut self,
        payout: &mut P,
        caller: &Caller,
        target: Address,
    ) -> Result<LedgerEvent, LedgerError> {
        caller.require_owner("delete a claim")?;
        let claim = self.live_claim(&target)?;

        payout.release(claim.claimant, claim.collateral)?;
        self.claims.close(&target);

        info!(%target, claimant = %claim.claimant, "Claim deleted by owner");
        Ok(LedgerEvent::ClaimDeleted {
            target,
            claimant: claim.claimant,
            collateral: claim.collateral,
        })
    }

    /// The claimed-against account proves control by clearing its own claim.
    pub fn clear_claim<P: CollateralPayout>(
        &mut self,
        payout: &mut P,
        caller: &Caller,
    ) -> Result<LedgerEvent, LedgerError> {
        let target = caller.address();
        self.settle_cleared(payout, target)?
            .ok_or(LedgerError::NoClaim { target })
    }

    /// Close the claim against `target`, if any, paying the collateral out
    /// according to the cleared-collateral policy.
    pub(crate) fn settle_cleared<P: CollateralPayout>(
        &mut self,
        payout: &mut P,
        target: Address,
    ) -> Result<Option<LedgerEvent>, LedgerError> {
        let Some(claim) = self.claims.get(&target).copied() else {
            return Ok(None);
        };
        let recipient = self.policy.recipient(target, &claim);

        payout.release(recipient, claim.collateral)?;
        self.claims.close(&target);

        info!(%target, claimant = %claim.claimant, %recipient, "Claim cleared");
        Ok(Some(LedgerEvent::ClaimCleared {
            target,
            claimant: claim.claimant,
            collateral: claim.collateral,
            recipient,
        }))
    }

    // =========================================================================
    // PARAMETERS
    // =========================================================================

    /// Owner replaces the collateral rate and clearing period.
    ///
    /// Live claims keep the collateral they escrowed.
    pub fn set_claim_parameters(
        &mut self,
        caller: &Caller,
        collateral_rate: Wei,
        clearing_period_days: u64,
    ) -> Result<LedgerEvent, LedgerError> {
        caller.require_owner("set claim parameters")?;
        let params = ClaimParameters::new(collateral_rate, clearing_period_days).map_err(|err| {
            warn!(error = %err, "Rejected claim parameters");
            err
        })?;
        self.params = params;

        info!(%collateral_rate, clearing_period_days, "Claim parameters changed");
        Ok(LedgerEvent::ClaimParametersChanged {
            collateral_rate,
            clearing_period_days,
        })
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Active parameters.
    pub fn params(&self) -> &ClaimParameters {
        &self.params
    }

    /// Cleared-collateral policy.
    pub fn policy(&self) -> ClearedCollateralPolicy {
        self.policy
    }

    /// Live claim against `target`, if any.
    pub fn claim(&self, target: &Address) -> Option<&Claim> {
        self.claims.get(target)
    }

    /// Returns true if `target` has a live claim.
    pub fn is_claimed(&self, target: &Address) -> bool {
        self.claims.contains(target)
    }

    /// Claimant of the claim against `target`, zero when absent.
    pub fn get_claimant(&self, target: &Address) -> Address {
        self.claims.claimant(target)
    }

    /// Collateral of the claim against `target`, zero when absent.
    pub fn get_collateral(&self, target: &Address) -> Wei {
        self.claims.collateral(target)
    }

    /// Declaration time of the claim against `target`, zero when absent.
    pub fn get_time_stamp(&self, target: &Address) -> Timestamp {
        self.claims.time_stamp(target)
    }

    /// Commitment hash of `claimer`, zero when absent.
    pub fn get_msg_hash(&self, claimer: &Address) -> Hash {
        self.commitments.msg_hash(claimer)
    }

    /// Commitment time of `claimer`, zero when absent.
    pub fn get_pre_claim_time_stamp(&self, claimer: &Address) -> Timestamp {
        self.commitments.time_stamp(claimer)
    }

    /// Sum of collateral held for live claims.
    pub fn escrowed_collateral(&self) -> Wei {
        self.claims.total_collateral()
    }

    /// Number of live claims.
    pub fn live_claims(&self) -> usize {
        self.claims.len()
    }

    fn live_claim(&self, target: &Address) -> Result<Claim, LedgerError> {
        self.claims
            .get(target)
            .copied()
            .ok_or(LedgerError::NoClaim { target: *target })
    }
}
