//! # Ledger Service
//!
//! Strictly serialized executor around the contract. Each submitted call
//! runs to completion under the lock before the next one starts, and
//! produces a [`Receipt`] keyed by the envelope's correlation id.
//!
//! The service clock is authoritative: an envelope stamped after it is
//! rejected without reaching the contract.

use crate::call::LedgerCall;
use crate::contract::{ClaimableShareToken, TokenConfig};
use cs_02_lost_key_recovery::{SystemTimeSource, TimeSource};
use parking_lot::Mutex;
use serde::Serialize;
use shared_types::{Address, CallEnvelope, LedgerError, LedgerEvent, Wei};
use tracing::{info, warn};
use uuid::Uuid;

/// Outcome of one call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReceiptStatus {
    /// Call succeeded.
    Accepted,
    /// Call failed and left no trace.
    Rejected {
        /// Machine-readable error kind.
        kind: String,
        /// Human-readable error.
        message: String,
    },
}

/// Result of one call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// Correlation id of the envelope.
    pub correlation_id: Uuid,
    /// Call name.
    pub call: String,
    /// Outcome.
    #[serde(flatten)]
    pub status: ReceiptStatus,
    /// Events appended by the call.
    pub events: Vec<LedgerEvent>,
}

impl Receipt {
    /// Returns true if the call succeeded.
    pub fn is_accepted(&self) -> bool {
        self.status == ReceiptStatus::Accepted
    }
}

/// Serialized executor.
pub struct LedgerService<T: TimeSource = SystemTimeSource> {
    token: Mutex<ClaimableShareToken>,
    clock: T,
}

impl LedgerService<SystemTimeSource> {
    /// Deploy with the system clock.
    pub fn deploy(config: TokenConfig) -> Result<Self, LedgerError> {
        Self::with_clock(config, SystemTimeSource)
    }
}

impl<T: TimeSource> LedgerService<T> {
    /// Deploy with a custom clock.
    pub fn with_clock(config: TokenConfig, clock: T) -> Result<Self, LedgerError> {
        let token = ClaimableShareToken::deploy(config)?;
        info!(
            owner = %token.owner(),
            master = %token.master(),
            total_shares = token.total_shares(),
            "Claimable share token deployed"
        );
        Ok(Self {
            token: Mutex::new(token),
            clock,
        })
    }

    /// Credit native value to `account` from outside the contract.
    pub fn fund(&self, account: Address, amount: Wei) {
        self.token.lock().fund(account, amount);
        info!(%account, %amount, "Account funded");
    }

    /// Execute a call at the envelope's timestamp.
    pub fn submit(&self, envelope: CallEnvelope<LedgerCall>) -> Receipt {
        let now = self.clock.now();
        if envelope.timestamp > now {
            warn!(
                call = envelope.payload.name(),
                timestamp = envelope.timestamp,
                now,
                "Call stamped in the future"
            );
            let err = LedgerError::InvalidParameter {
                name: "timestamp",
                reason: format!("{} is ahead of the service clock at {now}", envelope.timestamp),
            };
            return receipt(&envelope, Err(err));
        }

        let mut token = self.token.lock();
        let outcome = token.execute(&envelope);
        publish_escrow(&token);
        drop(token);
        receipt(&envelope, outcome)
    }

    /// Execute a call stamped with the service clock.
    ///
    /// The clock is read under the lock, so concurrent callers execute in
    /// timestamp order.
    pub fn call(&self, caller: Address, value: Wei, call: LedgerCall) -> Receipt {
        let mut token = self.token.lock();
        let envelope = CallEnvelope::new(caller, self.clock.now(), call).with_value(value);
        let outcome = token.execute(&envelope);
        publish_escrow(&token);
        drop(token);
        receipt(&envelope, outcome)
    }

    /// Read the contract state under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&ClaimableShareToken) -> R) -> R {
        f(&self.token.lock())
    }

    /// The service clock.
    pub fn clock(&self) -> &T {
        &self.clock
    }
}

fn receipt(
    envelope: &CallEnvelope<LedgerCall>,
    outcome: Result<Vec<LedgerEvent>, LedgerError>,
) -> Receipt {
    let call = envelope.payload.name();
    match outcome {
        Ok(events) => {
            cs_telemetry::record_call(call, None);
            for event in &events {
                if let Some(transition) = claim_transition(event) {
                    cs_telemetry::record_claim_transition(transition);
                }
            }
            Receipt {
                correlation_id: envelope.correlation_id,
                call: call.to_string(),
                status: ReceiptStatus::Accepted,
                events,
            }
        }
        Err(err) => {
            cs_telemetry::record_call(call, Some(err.kind()));
            Receipt {
                correlation_id: envelope.correlation_id,
                call: call.to_string(),
                status: ReceiptStatus::Rejected {
                    kind: err.kind().to_string(),
                    message: err.to_string(),
                },
                events: Vec::new(),
            }
        }
    }
}

fn claim_transition(event: &LedgerEvent) -> Option<&'static str> {
    match event {
        LedgerEvent::ClaimDeclared { .. } => Some("declared"),
        LedgerEvent::ClaimResolved { .. } => Some("resolved"),
        LedgerEvent::ClaimDeleted { .. } => Some("deleted"),
        LedgerEvent::ClaimCleared { .. } => Some("cleared"),
        _ => None,
    }
}

fn publish_escrow(token: &ClaimableShareToken) {
    let escrow = token.escrow_balance();
    let approx = if escrow > Wei::from(u128::MAX) {
        f64::MAX
    } else {
        escrow.as_u128() as f64
    };
    cs_telemetry::set_escrow(approx, token.live_claims());
}
