//! Engine events for state change notifications.
//!
//! Events are emitted for every settled swap and every configuration change,
//! enabling clients to track activity and react accordingly. Field order on
//! [`SwappedEvent`] is part of the external contract.

use serde::{Deserialize, Serialize};

use crate::core::amounts::{PaymentAmount, PrizeAmount};
use crate::core::config::Rate;
use crate::core::ids::{Address, AssetId, SourceId};
use crate::error::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT PAYLOADS
// ═══════════════════════════════════════════════════════════════════════════════

/// A swap settled against a source's reserves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwappedEvent {
    /// Source whose reserves were traded against
    pub source_id: SourceId,
    /// Asset the caller paid in
    pub payment_asset: AssetId,
    /// Account that received the payment leg
    pub recipient: Address,
    /// Account that initiated the swap and received the award
    pub caller: Address,
    /// Payment-asset amount paid in
    pub amount_in: PaymentAmount,
    /// Awarded-asset amount paid out
    pub amount_out: PrizeAmount,
}

/// A source's configuration and reserves were created or fully replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizePoolConfiguredEvent {
    /// Source that was (re)configured
    pub source_id: SourceId,
    /// Configured payment recipient
    pub recipient: Address,
    /// Configured payment asset
    pub payment_asset: AssetId,
    /// Reserved rate parameter
    pub swap_multiplier: Rate,
    /// Reserved rate parameter
    pub liquidation_fraction: Rate,
    /// Reserve pair the pool restarts from
    pub reserve_in: PaymentAmount,
    /// Reserve pair the pool restarts from
    pub reserve_out: PrizeAmount,
}

/// The manager role was granted or revoked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerChangedEvent {
    /// Previous manager, if any
    pub previous: Option<Address>,
    /// Current manager, if any
    pub current: Option<Address>,
}

/// The post-swap listener was registered or cleared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerChangedEvent {
    /// Whether a listener is now registered
    pub registered: bool,
}

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT ENUM
// ═══════════════════════════════════════════════════════════════════════════════

/// All engine event types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A swap settled
    Swapped(SwappedEvent),
    /// A prize pool was configured or reconfigured
    PrizePoolConfigured(PrizePoolConfiguredEvent),
    /// The manager role changed
    ManagerChanged(ManagerChangedEvent),
    /// The listener registration changed
    ListenerChanged(ListenerChangedEvent),
}

impl EngineEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Swapped(_) => "Swapped",
            Self::PrizePoolConfigured(_) => "PrizePoolConfigured",
            Self::ManagerChanged(_) => "ManagerChanged",
            Self::ListenerChanged(_) => "ListenerChanged",
        }
    }

    /// Source this event concerns, if it is source-scoped
    pub fn source_id(&self) -> Option<SourceId> {
        match self {
            Self::Swapped(e) => Some(e.source_id),
            Self::PrizePoolConfigured(e) => Some(e.source_id),
            Self::ManagerChanged(_) | Self::ListenerChanged(_) => None,
        }
    }

    /// JSON export for indexers
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}
