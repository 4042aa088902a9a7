//! Core modules for the liquidation engine.
//!
//! This module contains the fundamental building blocks:
//! - Opaque identifiers for sources, accounts and assets
//! - Strongly-typed amounts for each side of the pool
//! - Per-source configuration and reserve state

pub mod amounts;
pub mod config;
pub mod ids;
pub mod state;

pub use amounts::*;
pub use config::*;
pub use ids::*;
pub use state::*;
