//! # Shared Types Crate
//!
//! This crate contains the value objects, the caller role model, the
//! `LedgerEvent` audit schema and the `LedgerError` taxonomy used by every
//! crate in the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Envelope Authority**: The `CallEnvelope<T>` is the sole wrapper for
//!   calls submitted to the runtime; its `caller` field is authoritative.
//! - **One Taxonomy**: Every rejected precondition maps to exactly one
//!   `LedgerError` variant so callers can tell failures apart.

pub mod caller;
pub mod crypto;
pub mod entities;
pub mod envelope;
pub mod errors;
pub mod events;

pub use caller::Caller;
pub use crypto::{commitment_hash, keccak256, nonce_from_phrase};
pub use entities::*;
pub use envelope::CallEnvelope;
pub use errors::*;
pub use events::*;
