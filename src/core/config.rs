//! Per-source liquidation configuration.
//!
//! One [`LiquidationConfig`] exists per source identifier. It is created or
//! fully replaced by `set_prize_pool`, never merged and never deleted.

use serde::{Deserialize, Serialize};

use crate::core::amounts::{PaymentAmount, PrizeAmount};
use crate::core::ids::{Address, AssetId};
use crate::error::{Error, Result};
use crate::utils::constants::RATE_SCALE;

// ═══════════════════════════════════════════════════════════════════════════════
// RATE
// ═══════════════════════════════════════════════════════════════════════════════

/// Fixed-point rational in [0, 1] at scale 10^9.
///
/// `swap_multiplier` and `liquidation_fraction` use this type. Both are
/// validated and stored but currently take no part in pricing; they are
/// reserved configuration for future rate-limiting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Rate(u64);

impl Rate {
    /// 0.0
    pub const ZERO: Self = Self(0);

    /// 1.0
    pub const ONE: Self = Self(RATE_SCALE);

    /// Create from a raw scaled value, rejecting values above 1.0
    pub fn from_raw(raw: u64) -> Result<Self> {
        if raw > RATE_SCALE {
            return Err(Error::RateOutOfBounds {
                raw,
                scale: RATE_SCALE,
            });
        }
        Ok(Self(raw))
    }

    /// Get the raw scaled value
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LIQUIDATION CONFIG
// ═══════════════════════════════════════════════════════════════════════════════

/// Persisted per-source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationConfig {
    /// Account receiving the payment-asset leg of every swap
    pub recipient: Address,
    /// Asset traders pay in
    pub payment_asset: AssetId,
    /// Reserved rate parameter (inert, see [`Rate`])
    pub swap_multiplier: Rate,
    /// Reserved rate parameter (inert, see [`Rate`])
    pub liquidation_fraction: Rate,
}

impl LiquidationConfig {
    /// Validate the non-null invariants
    pub fn validate(&self) -> Result<()> {
        if self.recipient.is_zero() {
            return Err(Error::NullIdentity { field: "recipient" });
        }
        if self.payment_asset.is_zero() {
            return Err(Error::NullIdentity {
                field: "payment_asset",
            });
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// POOL SETTINGS
// ═══════════════════════════════════════════════════════════════════════════════

/// Full argument set for `set_prize_pool`: the replacement configuration
/// plus the reserve pair the pool (re)starts from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSettings {
    /// Account receiving the payment-asset leg of every swap
    pub recipient: Address,
    /// Asset traders pay in
    pub payment_asset: AssetId,
    /// Reserved rate parameter
    pub swap_multiplier: Rate,
    /// Reserved rate parameter
    pub liquidation_fraction: Rate,
    /// Initial virtual input-side reserve
    pub init_reserve_in: PaymentAmount,
    /// Initial virtual output-side reserve
    pub init_reserve_out: PrizeAmount,
}

impl PoolSettings {
    /// Split into the config to persist, validating all invariants
    pub fn into_config(self) -> Result<LiquidationConfig> {
        if self.init_reserve_in.is_zero() {
            return Err(Error::ZeroInitialReserve { side: "in" });
        }
        if self.init_reserve_out.is_zero() {
            return Err(Error::ZeroInitialReserve { side: "out" });
        }
        let config = LiquidationConfig {
            recipient: self.recipient,
            payment_asset: self.payment_asset,
            swap_multiplier: self.swap_multiplier,
            liquidation_fraction: self.liquidation_fraction,
        };
        config.validate()?;
        Ok(config)
    }
}
