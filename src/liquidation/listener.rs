//! Post-swap notification hook.
//!
//! At most one listener is registered at a time. Absence disables
//! notification without otherwise affecting the swap; a registered listener's
//! failure propagates and aborts the whole swap.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::core::amounts::{PaymentAmount, PrizeAmount};
use crate::core::ids::{AssetId, SourceId};
use crate::error::Result;

/// Receiver of post-swap notifications
pub trait SwapListener: std::fmt::Debug {
    /// Called after both legs of a swap have settled, before the engine
    /// commits its state. Returning an error aborts the swap.
    fn after_swap(
        &mut self,
        source_id: SourceId,
        awarded_asset: AssetId,
        amount_out: PrizeAmount,
        payment_asset: AssetId,
        amount_in: PaymentAmount,
    ) -> Result<()>;
}

/// One recorded notification payload, fields in wire order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapNotification {
    /// Source the swap settled against
    pub source_id: SourceId,
    /// Identity of the awarded asset
    pub awarded_asset: AssetId,
    /// Awarded amount
    pub amount_out: PrizeAmount,
    /// Payment asset identity
    pub payment_asset: AssetId,
    /// Paid amount
    pub amount_in: PaymentAmount,
}

/// Listener that records every notification (tests, local indexing).
///
/// Clones share one log, so a handle kept outside the engine observes the
/// notifications delivered to the registered clone.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    log: Arc<Mutex<Vec<SwapNotification>>>,
}

impl RecordingListener {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far
    pub fn notifications(&self) -> Vec<SwapNotification> {
        self.log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl SwapListener for RecordingListener {
    fn after_swap(
        &mut self,
        source_id: SourceId,
        awarded_asset: AssetId,
        amount_out: PrizeAmount,
        payment_asset: AssetId,
        amount_in: PaymentAmount,
    ) -> Result<()> {
        self.log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(SwapNotification {
                source_id,
                awarded_asset,
                amount_out,
                payment_asset,
                amount_in,
            });
        Ok(())
    }
}
