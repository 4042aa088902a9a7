//! Per-source virtual reserve pair.
//!
//! The pair is the AMM's entire pricing state. Once a source is initialized
//! both reserves stay strictly positive: swaps can never drain the output
//! reserve to zero (the exact-output path rejects full drains) and the top-up
//! path only ever shrinks `reserve_in` toward, never to, zero.

use serde::{Deserialize, Serialize};

use crate::core::amounts::{PaymentAmount, PrizeAmount};

/// Persisted per-source reserve pair (the AMM's virtual inventories)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationState {
    /// Virtual inventory of the payment asset
    pub reserve_in: PaymentAmount,
    /// Virtual inventory of the awarded asset
    pub reserve_out: PrizeAmount,
}

impl LiquidationState {
    /// Create a new reserve pair
    pub const fn new(reserve_in: PaymentAmount, reserve_out: PrizeAmount) -> Self {
        Self {
            reserve_in,
            reserve_out,
        }
    }

    /// Whether both reserves are strictly positive
    pub fn is_initialized(&self) -> bool {
        !self.reserve_in.is_zero() && !self.reserve_out.is_zero()
    }

    /// The constant-product value `reserve_in * reserve_out` in 256-bit width,
    /// exposed for invariant checks
    pub fn product(&self) -> ethereum_types::U256 {
        ethereum_types::U256::from(self.reserve_in.raw())
            * ethereum_types::U256::from(self.reserve_out.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialized() {
        let state = LiquidationState::new(PaymentAmount::new(10), PrizeAmount::new(20));
        assert!(state.is_initialized());

        let state = LiquidationState::new(PaymentAmount::ZERO, PrizeAmount::new(20));
        assert!(!state.is_initialized());
    }

    #[test]
    fn test_product_is_wide() {
        let state = LiquidationState::new(
            PaymentAmount::new(u128::MAX),
            PrizeAmount::new(u128::MAX),
        );
        // Would overflow u128; must not panic.
        let k = state.product();
        assert!(k > ethereum_types::U256::from(u128::MAX));
    }
}
