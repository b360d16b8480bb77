//! # Claimable-Shares Test Suite
//!
//! Unified test crate driving the composed token end to end.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared accounts and a clocked harness
//! │
//! ├── exploits/         # Attack simulations
//! │   ├── front_running.rs
//! │   └── griefing.rs
//! │
//! └── integration/      # Cross-crate flows
//!     ├── recovery_flows.rs
//!     ├── ledger_flows.rs
//!     └── service_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p cs-tests
//!
//! # By category
//! cargo test -p cs-tests integration::
//! cargo test -p cs-tests exploits::
//! ```

#![allow(dead_code)]


#[cfg(test)]
pub(crate) mod fixtures;
