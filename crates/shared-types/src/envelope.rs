//! # `CallEnvelope` Wrapper
//!
//! The wrapper for every call submitted to the ledger runtime.
//!
//! ## Properties
//!
//! - **Caller Authority**: `caller` is the sole source of identity. Payloads
//!   MUST NOT carry their own sender fields.
//! - **Attached Value**: `value` is native value sent with the call (only
//!   meaningful for claim declarations); it is returned if the call fails.
//! - **Execution Time**: `timestamp` is the time the call executes at; all
//!   waiting periods are evaluated against it.
//! - **Correlation**: `correlation_id` ties a receipt back to its call.

use crate::entities::{Address, Timestamp, Wei};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A call with its execution context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallEnvelope<T> {
    /// Identifier echoed in the receipt.
    #[serde(default = "Uuid::new_v4")]
    pub correlation_id: Uuid,
    /// Account issuing the call.
    pub caller: Address,
    /// Native value attached to the call.
    #[serde(default)]
    pub value: Wei,
    /// Execution timestamp in seconds.
    pub timestamp: Timestamp,
    /// The call itself.
    pub payload: T,
}

impl<T> CallEnvelope<T> {
    /// Wrap a payload with no attached value.
    pub fn new(caller: Address, timestamp: Timestamp, payload: T) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            caller,
            value: Wei::zero(),
            timestamp,
            payload,
        }
    }

    /// Attach native value to the call.
    #[must_use]
    pub fn with_value(mut self, value: Wei) -> Self {
        self.value = value;
        self
    }
}
