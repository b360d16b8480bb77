//! # Ports Module
//!
//! Outbound dependencies of the recovery protocol.

pub mod outbound;

pub use outbound::*;
