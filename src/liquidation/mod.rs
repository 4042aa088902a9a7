//! Liquidation module: the swap executor and its notification hook.
//!
//! - [`engine::LiquidationEngine`]: per-source stores, access control and the
//!   atomic swap executor
//! - [`listener::SwapListener`]: optional post-swap notification hook

pub mod engine;
pub mod listener;

pub use engine::*;
pub use listener::*;
