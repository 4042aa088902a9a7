//! External yield source interface.
//!
//! The engine never touches the source's accounting directly; it consumes the
//! three-operation surface below. `capture_award_balance` commits the source's
//! pending accrual counter as a side effect, which is why the engine only ever
//! calls it through the once-per-operation adapter in [`crate::oracle::adapter`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::ids::{Address, AssetId};
use crate::error::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// YIELD SOURCE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// External collaborator holding the awarded asset and accruing yield on
/// deposited capital
pub trait YieldSource {
    /// Report and commit the balance newly accrued since the last call.
    ///
    /// Committing resets the source's internal pending counter; a second call
    /// within the same engine operation would observe a smaller,
    /// already-consumed delta.
    fn capture_award_balance(&mut self) -> Result<u128>;

    /// Transfer `amount` of the awarded asset to `recipient`.
    ///
    /// Succeeds whenever `amount` does not exceed the cumulative captured
    /// balance.
    fn award(&mut self, recipient: Address, amount: u128, asset: AssetId) -> Result<()>;

    /// Identity of the awarded asset
    fn ticket(&self) -> AssetId;
}

// ═══════════════════════════════════════════════════════════════════════════════
// IN-MEMORY YIELD SOURCE
// ═══════════════════════════════════════════════════════════════════════════════

/// In-memory [`YieldSource`] for tests and embedders.
///
/// `accrue` queues pending yield; `capture_award_balance` commits it to the
/// awardable pool; `award` draws from that pool into per-address balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryYieldSource {
    ticket: AssetId,
    pending: u128,
    awardable: u128,
    balances: HashMap<Address, u128>,
}

impl MemoryYieldSource {
    /// Create a source awarding the given ticket asset
    pub fn new(ticket: AssetId) -> Self {
        Self {
            ticket,
            pending: 0,
            awardable: 0,
            balances: HashMap::new(),
        }
    }

    /// Queue newly accrued yield, to be recognized by the next capture
    pub fn accrue(&mut self, amount: u128) {
        self.pending = self.pending.saturating_add(amount);
    }

    /// Pending yield not yet captured
    pub fn pending(&self) -> u128 {
        self.pending
    }

    /// Captured balance not yet awarded
    pub fn awardable(&self) -> u128 {
        self.awardable
    }

    /// Awarded-asset balance held by an address
    pub fn balance_of(&self, address: Address) -> u128 {
        self.balances.get(&address).copied().unwrap_or(0)
    }
}

impl YieldSource for MemoryYieldSource {
    fn capture_award_balance(&mut self) -> Result<u128> {
        let captured = self.pending;
        self.awardable = self.awardable.saturating_add(captured);
        self.pending = 0;
        Ok(captured)
    }

    fn award(&mut self, recipient: Address, amount: u128, asset: AssetId) -> Result<()> {
        if asset != self.ticket {
            return Err(Error::AssetMismatch {
                expected: self.ticket.to_string(),
                got: asset.to_string(),
            });
        }
        if amount > self.awardable {
            return Err(Error::AwardExceedsCaptured {
                requested: amount,
                captured: self.awardable,
            });
        }
        self.awardable -= amount;
        *self.balances.entry(recipient).or_insert(0) += amount;
        Ok(())
    }

    fn ticket(&self) -> AssetId {
        self.ticket
    }
}
