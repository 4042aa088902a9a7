//! Payment-asset transfer interface.
//!
//! The payment leg of every swap moves the trader's payment asset to the
//! configured recipient. The engine consumes the narrow [`TokenLedger`] trait;
//! [`MemoryLedger`] is the in-memory implementation used by tests and
//! embedders.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::ids::{Address, AssetId};
use crate::error::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// TOKEN LEDGER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Transfer surface for the payment asset
pub trait TokenLedger {
    /// Move `amount` of `asset` from `from` to `to`
    fn transfer(&mut self, asset: AssetId, from: Address, to: Address, amount: u128)
        -> Result<()>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// IN-MEMORY LEDGER
// ═══════════════════════════════════════════════════════════════════════════════

/// Balances keyed by `(asset, holder)`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryLedger {
    balances: HashMap<(AssetId, Address), u128>,
}

impl MemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a balance out of thin air (test setup)
    pub fn mint(&mut self, asset: AssetId, to: Address, amount: u128) {
        *self.balances.entry((asset, to)).or_insert(0) += amount;
    }

    /// Balance of `holder` in `asset`
    pub fn balance_of(&self, asset: AssetId, holder: Address) -> u128 {
        self.balances.get(&(asset, holder)).copied().unwrap_or(0)
    }
}

impl TokenLedger for MemoryLedger {
    fn transfer(
        &mut self,
        asset: AssetId,
        from: Address,
        to: Address,
        amount: u128,
    ) -> Result<()> {
        let available = self.balance_of(asset, from);
        if available < amount {
            return Err(Error::InsufficientFunds {
                required: amount,
                available,
            });
        }
        *self.balances.entry((asset, from)).or_insert(0) -= amount;
        *self.balances.entry((asset, to)).or_insert(0) += amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_moves_balance() {
        let usdc = AssetId::derive(b"usdc");
        let alice = Address::derive(b"alice");
        let bob = Address::derive(b"bob");

        let mut ledger = MemoryLedger::new();
        ledger.mint(usdc, alice, 1_000);

        ledger.transfer(usdc, alice, bob, 400).unwrap();
        assert_eq!(ledger.balance_of(usdc, alice), 600);
        assert_eq!(ledger.balance_of(usdc, bob), 400);
    }

    #[test]
    fn test_transfer_insufficient_funds() {
        let usdc = AssetId::derive(b"usdc");
        let alice = Address::derive(b"alice");
        let bob = Address::derive(b"bob");

        let mut ledger = MemoryLedger::new();
        ledger.mint(usdc, alice, 100);

        let result = ledger.transfer(usdc, alice, bob, 101);
        assert_eq!(
            result,
            Err(Error::InsufficientFunds {
                required: 101,
                available: 100,
            })
        );
        // No partial movement.
        assert_eq!(ledger.balance_of(usdc, alice), 100);
        assert_eq!(ledger.balance_of(usdc, bob), 0);
    }

    #[test]
    fn test_balances_partitioned_by_asset() {
        let usdc = AssetId::derive(b"usdc");
        let dai = AssetId::derive(b"dai");
        let alice = Address::derive(b"alice");

        let mut ledger = MemoryLedger::new();
        ledger.mint(usdc, alice, 100);

        assert_eq!(ledger.balance_of(usdc, alice), 100);
        assert_eq!(ledger.balance_of(dai, alice), 0);
    }
}
