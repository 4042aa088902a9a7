//! Utility modules for the liquidation engine.
//!
//! This module contains shared utilities used across the engine:
//! - Checked wide arithmetic
//! - Constants

pub mod constants;
pub mod math;

pub use constants::*;
pub use math::*;
