//! Accrual oracle layer.
//!
//! This module isolates the engine from the external yield source:
//! - The [`YieldSource`] trait the engine consumes
//! - A request-scoped memoizing adapter enforcing at-most-one capture per
//!   operation
//! - An in-memory source for tests and embedders

pub mod adapter;
pub mod source;

pub use adapter::*;
pub use source::*;
