//! Strongly-typed amounts for the two sides of the pool.
//!
//! The input side is denominated in the payment asset's native units, the
//! output side in the awarded asset's native units. Separate newtypes keep the
//! two from being mixed in engine code; the pure pricing math operates on raw
//! `u128` values extracted at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Amount of the payment asset (the asset traders pay in)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct PaymentAmount(u128);

/// Amount of the awarded asset (the asset the pool sells)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct PrizeAmount(u128);

macro_rules! amount_impl {
    ($name:ident) => {
        impl $name {
            /// Zero amount
            pub const ZERO: Self = Self(0);

            /// Create from native units
            pub const fn new(raw: u128) -> Self {
                Self(raw)
            }

            /// Get the raw native-unit value
            pub const fn raw(&self) -> u128 {
                self.0
            }

            /// Check if zero
            pub fn is_zero(&self) -> bool {
                self.0 == 0
            }

            /// Checked addition
            pub fn checked_add(self, other: Self) -> Option<Self> {
                self.0.checked_add(other.0).map(Self)
            }

            /// Checked subtraction
            pub fn checked_sub(self, other: Self) -> Option<Self> {
                self.0.checked_sub(other.0).map(Self)
            }

            /// Saturating addition
            pub fn saturating_add(self, other: Self) -> Self {
                Self(self.0.saturating_add(other.0))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u128> for $name {
            fn from(raw: u128) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u128 {
            fn from(amount: $name) -> Self {
                amount.0
            }
        }
    };
}

amount_impl!(PaymentAmount);
amount_impl!(PrizeAmount);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_ops() {
        let a = PaymentAmount::new(10);
        let b = PaymentAmount::new(3);

        assert_eq!(a.checked_add(b), Some(PaymentAmount::new(13)));
        assert_eq!(a.checked_sub(b), Some(PaymentAmount::new(7)));
        assert_eq!(b.checked_sub(a), None);
        assert_eq!(PaymentAmount::new(u128::MAX).checked_add(a), None);
    }

    #[test]
    fn test_zero() {
        assert!(PrizeAmount::ZERO.is_zero());
        assert!(!PrizeAmount::new(1).is_zero());
    }

    #[test]
    fn test_raw_round_trip() {
        let amount = PrizeAmount::from(481_879u128);
        assert_eq!(u128::from(amount), 481_879);
    }
}
