//! Once-per-operation accrual capture.
//!
//! `capture_award_balance` commits the source's pending counter, so invoking
//! it twice inside one logical engine operation would observe an
//! already-consumed delta and corrupt pricing. [`AccrualOracle`] is
//! constructed fresh for each operation and memoizes the first reading; every
//! downstream computation in that operation reuses the cached value.

use crate::core::ids::{Address, AssetId};
use crate::error::Result;
use crate::oracle::source::YieldSource;

/// Request-scoped memoized accessor over a [`YieldSource`]
pub struct AccrualOracle<'a> {
    source: &'a mut dyn YieldSource,
    reading: Option<u128>,
}

impl<'a> AccrualOracle<'a> {
    /// Wrap a source for the duration of one engine operation
    pub fn new(source: &'a mut dyn YieldSource) -> Self {
        Self {
            source,
            reading: None,
        }
    }

    /// The captured balance for this operation.
    ///
    /// The underlying capture runs on the first call only; later calls return
    /// the cached reading.
    pub fn read(&mut self) -> Result<u128> {
        match self.reading {
            Some(reading) => Ok(reading),
            None => {
                let reading = self.source.capture_award_balance()?;
                self.reading = Some(reading);
                Ok(reading)
            }
        }
    }

    /// Award `amount` of the ticket asset to `recipient`
    pub fn award(&mut self, recipient: Address, amount: u128, asset: AssetId) -> Result<()> {
        self.source.award(recipient, amount, asset)
    }

    /// Identity of the awarded asset
    pub fn ticket(&self) -> AssetId {
        self.source.ticket()
    }
}
