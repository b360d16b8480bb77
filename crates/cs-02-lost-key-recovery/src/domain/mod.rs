//! # Domain Module
//!
//! Commitments, claims, parameters and the rules that bind them.

pub mod entities;
pub mod invariants;
pub mod params;
pub mod stores;

pub use entities::*;
pub use invariants::*;
pub use params::*;
pub use stores::*;
