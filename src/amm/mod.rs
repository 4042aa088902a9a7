//! Constant-product AMM math.
//!
//! Pure pricing functions with no storage access; the engine extracts raw
//! reserve values, calls in here, and persists the results itself.

pub mod pricing;

pub use pricing::*;
