//! # PrizeFlow Liquidation Engine
//!
//! A per-source automated market maker that converts yield accrued on
//! deposited capital from a payment asset into a protocol's awarded asset.
//! Each external yield source gets its own virtual constant-product reserve
//! pair that reprices continuously as newly accrued balance is captured, and
//! exposes exact-input and exact-output swaps with slippage protection and an
//! optional post-trade notification hook.
//!
//! ## Architecture
//!
//! The engine consists of several core modules:
//!
//! - **Core**: identifiers, typed amounts, per-source config and reserve state
//! - **AMM**: pure constant-product pricing math
//! - **Oracle**: once-per-operation accrual capture over the yield source
//! - **Liquidation**: the atomic swap executor with owner/manager gating
//!
//! ## Design Principles
//!
//! - **Robust**: checked wide arithmetic, rounding always in the pool's favor
//! - **Atomic**: each swap commits fully or leaves no engine-visible change
//! - **Modular**: external collaborators sit behind narrow traits
//!
//! ## Example
//!
//! ```rust,ignore
//! use prizeflow::prelude::*;
//!
//! let mut engine = LiquidationEngine::new(owner);
//! engine.set_prize_pool(owner, source_id, settings)?;
//!
//! // Sell 4 units of the payment asset for the accrued awarded asset.
//! let outcome = engine.swap_exact_amount_in(
//!     caller, source_id, &mut source, &mut ledger, amount_in, min_out,
//! )?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    unused_lifetimes,
    unused_qualifications
)]

pub mod amm;
pub mod core;
pub mod error;
pub mod events;
pub mod ledger;
pub mod liquidation;
pub mod oracle;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        amounts::{PaymentAmount, PrizeAmount},
        config::{LiquidationConfig, PoolSettings, Rate},
        ids::{Address, AssetId, SourceId},
        state::LiquidationState,
    };
    pub use crate::error::{Error, Result};
    pub use crate::events::{EngineEvent, SwappedEvent};
    pub use crate::ledger::{MemoryLedger, TokenLedger};
    pub use crate::liquidation::{
        engine::{LiquidationEngine, SwapOutcome},
        listener::SwapListener,
    };
    pub use crate::oracle::{
        adapter::AccrualOracle,
        source::{MemoryYieldSource, YieldSource},
    };
}

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name
pub const ENGINE_NAME: &str = "PrizeFlow";
