//! Shared accounts and a harness that drives the contract with a manual clock.

use cs_01_share_ledger::TokenMetadata;
use cs_02_lost_key_recovery::{ClaimParameters, ClearedCollateralPolicy};
use cs_runtime::{ClaimableShareToken, LedgerCall, TokenConfig, DEFAULT_MASTER};
use shared_types::{
    commitment_hash, nonce_from_phrase, Address, CallEnvelope, Hash, LedgerError, LedgerEvent,
    Shares, Timestamp, Wei, SECONDS_PER_DAY,
};

pub const OWNER: Address = Address::repeat(0x01);
pub const MASTER: Address = DEFAULT_MASTER;

pub const SHAREHOLDER_1: Address = Address::repeat(0x21);
pub const SHAREHOLDER_2: Address = Address::repeat(0x22);
pub const SHAREHOLDER_3: Address = Address::repeat(0x23);

pub const TOKENHOLDER_1: Address = Address::repeat(0x41);
pub const TOKENHOLDER_2: Address = Address::repeat(0x42);
pub const TOKENHOLDER_3: Address = Address::repeat(0x43);

pub const OTHER_1: Address = Address::repeat(0x71);
pub const OTHER_2: Address = Address::repeat(0x72);
pub const OTHER_3: Address = Address::repeat(0x73);

pub const GENESIS: Timestamp = 1_600_000_000;
pub const DAY: u64 = SECONDS_PER_DAY;
/// Pre-claim waiting period plus a little slack.
pub const PRE_CLAIM_WAIT: u64 = DAY + 5;

pub fn ether(n: u64) -> Wei {
    Wei::exp10(18) * Wei::from(n)
}

pub fn config(policy: ClearedCollateralPolicy) -> TokenConfig {
    TokenConfig {
        metadata: TokenMetadata::default(),
        owner: OWNER,
        master: MASTER,
        params: ClaimParameters::default(),
        policy,
    }
}

/// The contract plus a manually advanced clock.
pub struct Harness {
    pub token: ClaimableShareToken,
    pub now: Timestamp,
}

impl Harness {
    /// Fresh deployment with the default policy. Claim candidates are funded.
    pub fn new() -> Self {
        Self::with_policy(ClearedCollateralPolicy::default())
    }

    pub fn with_policy(policy: ClearedCollateralPolicy) -> Self {
        let mut token = ClaimableShareToken::deploy(config(policy)).unwrap();
        for account in [OTHER_1, OTHER_2, OTHER_3, SHAREHOLDER_1, SHAREHOLDER_2] {
            token.fund(account, ether(1_000));
        }
        Self {
            token,
            now: GENESIS,
        }
    }

    /// Owner 100, shareholders 10, 20 and 30.
    pub fn with_shareholders() -> Self {
        let mut h = Self::new();
        h.issue_shares();
        h
    }

    pub fn issue_shares(&mut self) {
        for (to, amount) in [
            (OWNER, 100),
            (SHAREHOLDER_1, 10),
            (SHAREHOLDER_2, 20),
            (SHAREHOLDER_3, 30),
        ] {
            self.mint(to, amount);
        }
    }

    pub fn advance(&mut self, secs: u64) {
        self.now += secs;
    }

    pub fn call(
        &mut self,
        caller: Address,
        call: LedgerCall,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        self.call_with_value(caller, Wei::zero(), call)
    }

    pub fn call_with_value(
        &mut self,
        caller: Address,
        value: Wei,
        call: LedgerCall,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let envelope = CallEnvelope::new(caller, self.now, call).with_value(value);
        self.token.execute(&envelope)
    }

    pub fn mint(&mut self, to: Address, amount: Shares) {
        self.mint_as(OWNER, to, amount);
    }

    pub fn mint_as(&mut self, owner: Address, to: Address, amount: Shares) {
        self.call(
            owner,
            LedgerCall::Mint {
                to,
                amount,
                message: "issue".to_string(),
            },
        )
        .unwrap();
    }

    /// Register a commitment for `claimer` against `target`; returns the nonce.
    pub fn prepare(&mut self, claimer: Address, target: Address, phrase: &str) -> Hash {
        let nonce = nonce_from_phrase(phrase);
        self.call(
            claimer,
            LedgerCall::PrepareClaim {
                commitment: commitment_hash(&nonce, &claimer, &target),
            },
        )
        .unwrap();
        nonce
    }

    /// Collateral the target's current balance requires.
    pub fn required_collateral(&self, target: &Address) -> Wei {
        self.token.collateral_rate() * Wei::from(self.token.balance_of(target))
    }

    /// Declare `target` lost, paying exactly the required collateral.
    pub fn declare(
        &mut self,
        claimer: Address,
        target: Address,
        nonce: Hash,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let value = self.required_collateral(&target);
        self.call_with_value(claimer, value, LedgerCall::DeclareLost { target, nonce })
    }

    /// Prepare, wait out the pre-claim period and declare.
    pub fn open_claim(&mut self, claimer: Address, target: Address, phrase: &str) {
        let nonce = self.prepare(claimer, target, phrase);
        self.advance(PRE_CLAIM_WAIT);
        self.declare(claimer, target, nonce).unwrap();
    }

    /// Sum of native value held by the given accounts plus the escrow.
    pub fn native_total(&self, accounts: &[Address]) -> Wei {
        accounts
            .iter()
            .fold(self.token.escrow_balance(), |acc, a| {
                acc + self.token.native_balance_of(a)
            })
    }
}

pub const ALL_ACCOUNTS: [Address; 11] = [
    OWNER,
    MASTER,
    SHAREHOLDER_1,
    SHAREHOLDER_2,
    SHAREHOLDER_3,
    TOKENHOLDER_1,
    TOKENHOLDER_2,
    TOKENHOLDER_3,
    OTHER_1,
    OTHER_2,
    OTHER_3,
];
