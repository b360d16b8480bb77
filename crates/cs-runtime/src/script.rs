//! # Call Scripts
//!
//! JSON replay scripts for the `cs-node` binary.
//!
//! ```json
//! {
//!   "balances": { "0x0a0a...0a0a": "0x56bc75e2d63100000" },
//!   "calls": [
//!     { "caller": "0x1111...1111", "timestamp": 0,
//!       "payload": { "call": "mint", "to": "0x0b0b...0b0b", "amount": "10" } }
//!   ]
//! }
//! ```
//!
//! A bare array of envelopes is accepted as a script without balances.

use crate::call::LedgerCall;
use serde::Deserialize;
use shared_types::{Address, CallEnvelope, Wei};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Script loading errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The file could not be read.
    #[error("Failed to read script {path}: {source}")]
    Io {
        /// Script path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid script.
    #[error("Malformed script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A replayable sequence of calls.
#[derive(Debug, Default, Deserialize)]
pub struct Script {
    /// Native balances credited before the first call.
    #[serde(default)]
    pub balances: BTreeMap<Address, Wei>,
    /// Calls in execution order.
    pub calls: Vec<CallEnvelope<LedgerCall>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptFile {
    Full(Script),
    Calls(Vec<CallEnvelope<LedgerCall>>),
}

impl Script {
    /// Parse a script from JSON text.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        Ok(match serde_json::from_str::<ScriptFile>(text)? {
            ScriptFile::Full(script) => script,
            ScriptFile::Calls(calls) => Script {
                balances: BTreeMap::new(),
                calls,
            },
        })
    }

    /// Read and parse a script file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ScriptError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Self::parse(&text)
    }
}
