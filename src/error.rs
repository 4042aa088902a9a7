//! Error types for the liquidation engine.
//!
//! This module defines all error types used throughout the engine,
//! providing clear and actionable error messages.

use thiserror::Error;

use crate::core::ids::{Address, SourceId};

/// Result type alias for liquidation engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the liquidation engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ═══════════════════════════════════════════════════════════════════
    // Configuration Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Caller lacks the required role
    #[error("Not authorized: {caller} requires {required} role")]
    Unauthorized {
        /// Caller that was rejected
        caller: Address,
        /// Role that would have been required
        required: &'static str,
    },

    /// A required address or asset identity was null
    #[error("Null identity for {field}")]
    NullIdentity {
        /// Configuration field that was null
        field: &'static str,
    },

    /// No configuration exists for the source
    #[error("Unknown source: {0}")]
    UnknownSource(SourceId),

    /// Initial reserves must both be strictly positive
    #[error("Zero initial reserve for {side}")]
    ZeroInitialReserve {
        /// Which reserve was zero ("in" or "out")
        side: &'static str,
    },

    /// Configuration rate above 1.0
    #[error("Rate {raw} exceeds scale {scale}")]
    RateOutOfBounds {
        /// Raw rate value provided
        raw: u64,
        /// Fixed-point scale (1.0)
        scale: u64,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Liquidity Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Requested output at or beyond the full refreshed reserve
    #[error("Insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity {
        /// Requested output amount
        requested: u128,
        /// Refreshed output reserve
        available: u128,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Slippage Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Realized output fell below the caller's minimum
    #[error("Slippage: output {amount_out} below minimum {min_out}")]
    SlippageExceededMin {
        /// Realized output amount
        amount_out: u128,
        /// Caller-supplied minimum output
        min_out: u128,
    },

    /// Required input rose above the caller's maximum
    #[error("Slippage: input {amount_in} above maximum {max_in}")]
    SlippageExceededMax {
        /// Required input amount
        amount_in: u128,
        /// Caller-supplied maximum input
        max_in: u128,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Arithmetic Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Overflow in calculation
    #[error("Arithmetic overflow in {operation}")]
    Overflow {
        /// Operation that overflowed
        operation: String,
    },

    /// Underflow in calculation
    #[error("Arithmetic underflow in {operation}")]
    Underflow {
        /// Operation that underflowed
        operation: String,
    },

    /// No reserve pair has been initialized for the source
    #[error("Uninitialized source: {0}")]
    UninitializedSource(SourceId),

    /// A reserve pair contained a zero reserve
    #[error("Uninitialized reserves: in {reserve_in}, out {reserve_out}")]
    UninitializedReserves {
        /// Stored input-side reserve
        reserve_in: u128,
        /// Stored output-side reserve
        reserve_out: u128,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Settlement Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Payer balance too low for the payment leg
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Amount the transfer required
        required: u128,
        /// Balance actually held
        available: u128,
    },

    /// Asset identity did not match the collaborator's asset
    #[error("Asset mismatch: expected {expected}, got {got}")]
    AssetMismatch {
        /// Asset the collaborator holds
        expected: String,
        /// Asset the caller named
        got: String,
    },

    /// Award request beyond the cumulative captured balance
    #[error("Award {requested} exceeds captured balance {captured}")]
    AwardExceedsCaptured {
        /// Requested award amount
        requested: u128,
        /// Cumulative captured balance still unawarded
        captured: u128,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Serialization Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization failed
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl Error {
    /// Returns true if this error is recoverable by retrying with
    /// adjusted parameters
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::InsufficientLiquidity { .. }
                | Error::SlippageExceededMin { .. }
                | Error::SlippageExceededMax { .. }
                | Error::InsufficientFunds { .. }
        )
    }

    /// Returns true if this is a critical error requiring immediate attention
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Error::Overflow { .. }
                | Error::Underflow { .. }
                | Error::UninitializedReserves { .. }
        )
    }

    /// Returns the error code for external systems
    pub fn code(&self) -> u32 {
        match self {
            // Configuration errors: 1xxx
            Error::Unauthorized { .. } => 1001,
            Error::NullIdentity { .. } => 1002,
            Error::UnknownSource(_) => 1003,
            Error::ZeroInitialReserve { .. } => 1004,
            Error::RateOutOfBounds { .. } => 1005,

            // Liquidity errors: 2xxx
            Error::InsufficientLiquidity { .. } => 2001,

            // Slippage errors: 3xxx
            Error::SlippageExceededMin { .. } => 3001,
            Error::SlippageExceededMax { .. } => 3002,

            // Arithmetic errors: 4xxx
            Error::Overflow { .. } => 4001,
            Error::Underflow { .. } => 4002,
            Error::UninitializedSource(_) => 4003,
            Error::UninitializedReserves { .. } => 4004,

            // Settlement errors: 5xxx
            Error::InsufficientFunds { .. } => 5001,
            Error::AssetMismatch { .. } => 5002,
            Error::AwardExceedsCaptured { .. } => 5003,

            // Serialization errors: 7xxx
            Error::Serialization(_) => 7001,
            Error::Deserialization(_) => 7002,
        }
    }
}
