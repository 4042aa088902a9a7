//! Liquidation engine: per-source stores, access control and the swap
//! executor.
//!
//! The engine owns the config and state maps and runs each swap as one atomic
//! unit: quote, validate, settle both legs, notify, then commit. Engine-owned
//! state (reserves, totals, event log) is staged locally and only written once
//! every external leg including the listener notification has succeeded, so a
//! failure at any step leaves no engine-visible mutation.
//!
//! External collaborators are passed per call as trait objects; the engine
//! holds no I/O handles of its own. Methods take `&mut self`, which serializes
//! operations on one engine instance the way the original hosting environment
//! serializes transactions. State is partitioned by [`SourceId`], so embedders
//! wanting cross-source parallelism can shard engines per source.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::amm::pricing;
use crate::core::amounts::{PaymentAmount, PrizeAmount};
use crate::core::config::{LiquidationConfig, PoolSettings};
use crate::core::ids::{Address, SourceId};
use crate::core::state::LiquidationState;
use crate::error::{Error, Result};
use crate::events::{
    EngineEvent, ListenerChangedEvent, ManagerChangedEvent, PrizePoolConfiguredEvent,
    SwappedEvent,
};
use crate::ledger::TokenLedger;
use crate::liquidation::listener::SwapListener;
use crate::oracle::adapter::AccrualOracle;
use crate::oracle::source::YieldSource;
use crate::utils::constants::MAX_ENGINE_EVENTS;

// ═══════════════════════════════════════════════════════════════════════════════
// SWAP OUTCOME
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of a settled swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    /// Payment-asset amount the caller paid
    pub amount_in: PaymentAmount,
    /// Awarded-asset amount the caller received
    pub amount_out: PrizeAmount,
    /// Reserve pair after settlement
    pub state: LiquidationState,
}

/// Aggregate engine statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Number of swaps settled
    pub total_swaps: u64,
    /// Cumulative payment-asset volume
    pub total_amount_in: PaymentAmount,
    /// Cumulative awarded-asset volume
    pub total_amount_out: PrizeAmount,
    /// Number of configured sources
    pub configured_sources: usize,
}

// ═══════════════════════════════════════════════════════════════════════════════
// LIQUIDATION ENGINE
// ═══════════════════════════════════════════════════════════════════════════════

/// Per-source constant-product liquidation engine
#[derive(Debug, Serialize, Deserialize)]
pub struct LiquidationEngine {
    owner: Address,
    manager: Option<Address>,
    configs: HashMap<SourceId, LiquidationConfig>,
    states: HashMap<SourceId, LiquidationState>,
    #[serde(skip)]
    listener: Option<Box<dyn SwapListener>>,
    events: Vec<EngineEvent>,
    total_swaps: u64,
    total_amount_in: PaymentAmount,
    total_amount_out: PrizeAmount,
}

impl LiquidationEngine {
    /// Create a new engine owned by `owner`
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            manager: None,
            configs: HashMap::new(),
            states: HashMap::new(),
            listener: None,
            events: Vec::new(),
            total_swaps: 0,
            total_amount_in: PaymentAmount::ZERO,
            total_amount_out: PrizeAmount::ZERO,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESS CONTROL
    // ═══════════════════════════════════════════════════════════════════════════

    /// The engine owner
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The manager, if one is set
    pub fn manager(&self) -> Option<Address> {
        self.manager
    }

    fn require_owner(&self, caller: Address) -> Result<()> {
        if caller != self.owner {
            return Err(Error::Unauthorized {
                caller,
                required: "owner",
            });
        }
        Ok(())
    }

    fn require_owner_or_manager(&self, caller: Address) -> Result<()> {
        if caller == self.owner || Some(caller) == self.manager {
            return Ok(());
        }
        Err(Error::Unauthorized {
            caller,
            required: "owner or manager",
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Create or fully replace the configuration and reserves of a source.
    ///
    /// Owner only. The previous tuple is never merged into; both the config
    /// and the reserve pair restart from `settings`.
    pub fn set_prize_pool(
        &mut self,
        caller: Address,
        source_id: SourceId,
        settings: PoolSettings,
    ) -> Result<()> {
        self.require_owner(caller)?;

        let reserve_in = settings.init_reserve_in;
        let reserve_out = settings.init_reserve_out;
        let config = settings.into_config()?;

        let event = PrizePoolConfiguredEvent {
            source_id,
            recipient: config.recipient,
            payment_asset: config.payment_asset,
            swap_multiplier: config.swap_multiplier,
            liquidation_fraction: config.liquidation_fraction,
            reserve_in,
            reserve_out,
        };

        self.configs.insert(source_id, config);
        self.states
            .insert(source_id, LiquidationState::new(reserve_in, reserve_out));
        self.add_event(EngineEvent::PrizePoolConfigured(event));

        tracing::info!(
            source = %source_id.short(),
            %reserve_in,
            %reserve_out,
            "prize pool configured"
        );
        Ok(())
    }

    /// Grant or revoke the manager role. Owner only.
    ///
    /// The manager may register listeners but may not reconfigure pools.
    pub fn set_manager(&mut self, caller: Address, manager: Option<Address>) -> Result<()> {
        self.require_owner(caller)?;
        if manager.map_or(false, |m| m.is_zero()) {
            return Err(Error::NullIdentity { field: "manager" });
        }

        let previous = self.manager;
        self.manager = manager;
        self.add_event(EngineEvent::ManagerChanged(ManagerChangedEvent {
            previous,
            current: manager,
        }));
        Ok(())
    }

    /// Register or clear the post-swap listener. Owner or manager.
    pub fn set_listener(
        &mut self,
        caller: Address,
        listener: Option<Box<dyn SwapListener>>,
    ) -> Result<()> {
        self.require_owner_or_manager(caller)?;

        let registered = listener.is_some();
        self.listener = listener;
        self.add_event(EngineEvent::ListenerChanged(ListenerChangedEvent {
            registered,
        }));
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration of a source, if configured
    pub fn config(&self, source_id: SourceId) -> Option<&LiquidationConfig> {
        self.configs.get(&source_id)
    }

    /// Stored reserve pair of a source, if initialized
    pub fn liquidation_state(&self, source_id: SourceId) -> Option<LiquidationState> {
        self.states.get(&source_id).copied()
    }

    /// Recent events (pruned to the newest [`MAX_ENGINE_EVENTS`])
    pub fn recent_events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Aggregate statistics
    pub fn statistics(&self) -> EngineStats {
        EngineStats {
            total_swaps: self.total_swaps,
            total_amount_in: self.total_amount_in,
            total_amount_out: self.total_amount_out,
            configured_sources: self.configs.len(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PRICING VIEWS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Fold a captured balance into the stored pair without persisting.
    ///
    /// Fails with `UninitializedSource` when no reserve pair exists.
    pub fn next_liquidation_state(
        &self,
        source_id: SourceId,
        captured: PrizeAmount,
    ) -> Result<LiquidationState> {
        let state = self
            .states
            .get(&source_id)
            .ok_or(Error::UninitializedSource(source_id))?;
        let (reserve_in, reserve_out) = pricing::next_reserves(
            state.reserve_in.raw(),
            state.reserve_out.raw(),
            captured.raw(),
        )?;
        Ok(LiquidationState::new(
            PaymentAmount::new(reserve_in),
            PrizeAmount::new(reserve_out),
        ))
    }

    /// Quote the input required for an exact output against the refreshed
    /// reserves. Captures the source's accrual (once) but persists nothing.
    pub fn compute_exact_amount_in(
        &self,
        source_id: SourceId,
        source: &mut dyn YieldSource,
        amount_out: PrizeAmount,
    ) -> Result<PaymentAmount> {
        let mut oracle = AccrualOracle::new(source);
        let refreshed = self.refreshed_state(source_id, &mut oracle)?;
        let amount_in = pricing::exact_amount_in(
            refreshed.reserve_in.raw(),
            refreshed.reserve_out.raw(),
            amount_out.raw(),
        )?;
        Ok(PaymentAmount::new(amount_in))
    }

    /// Quote the output produced by an exact input against the refreshed
    /// reserves. Captures the source's accrual (once) but persists nothing.
    pub fn compute_exact_amount_out(
        &self,
        source_id: SourceId,
        source: &mut dyn YieldSource,
        amount_in: PaymentAmount,
    ) -> Result<PrizeAmount> {
        let mut oracle = AccrualOracle::new(source);
        let refreshed = self.refreshed_state(source_id, &mut oracle)?;
        let amount_out = pricing::exact_amount_out(
            refreshed.reserve_in.raw(),
            refreshed.reserve_out.raw(),
            amount_in.raw(),
        )?;
        Ok(PrizeAmount::new(amount_out))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SWAPS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Swap an exact payment-asset input for at least `amount_out_min` of the
    /// awarded asset.
    pub fn swap_exact_amount_in(
        &mut self,
        caller: Address,
        source_id: SourceId,
        source: &mut dyn YieldSource,
        ledger: &mut dyn TokenLedger,
        amount_in: PaymentAmount,
        amount_out_min: PrizeAmount,
    ) -> Result<SwapOutcome> {
        let config = self
            .configs
            .get(&source_id)
            .cloned()
            .ok_or(Error::UnknownSource(source_id))?;

        let mut oracle = AccrualOracle::new(source);
        let refreshed = self.refreshed_state(source_id, &mut oracle)?;

        let amount_out = pricing::exact_amount_out(
            refreshed.reserve_in.raw(),
            refreshed.reserve_out.raw(),
            amount_in.raw(),
        )?;
        if amount_out < amount_out_min.raw() {
            return Err(Error::SlippageExceededMin {
                amount_out,
                min_out: amount_out_min.raw(),
            });
        }

        self.execute(
            caller,
            source_id,
            &config,
            &mut oracle,
            ledger,
            refreshed,
            amount_in,
            PrizeAmount::new(amount_out),
        )
    }

    /// Swap at most `amount_in_max` of the payment asset for an exact
    /// awarded-asset output.
    pub fn swap_exact_amount_out(
        &mut self,
        caller: Address,
        source_id: SourceId,
        source: &mut dyn YieldSource,
        ledger: &mut dyn TokenLedger,
        amount_out: PrizeAmount,
        amount_in_max: PaymentAmount,
    ) -> Result<SwapOutcome> {
        let config = self
            .configs
            .get(&source_id)
            .cloned()
            .ok_or(Error::UnknownSource(source_id))?;

        let mut oracle = AccrualOracle::new(source);
        let refreshed = self.refreshed_state(source_id, &mut oracle)?;

        let amount_in = pricing::exact_amount_in(
            refreshed.reserve_in.raw(),
            refreshed.reserve_out.raw(),
            amount_out.raw(),
        )?;
        if amount_in > amount_in_max.raw() {
            return Err(Error::SlippageExceededMax {
                amount_in,
                max_in: amount_in_max.raw(),
            });
        }

        self.execute(
            caller,
            source_id,
            &config,
            &mut oracle,
            ledger,
            refreshed,
            PaymentAmount::new(amount_in),
            amount_out,
        )
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL
    // ═══════════════════════════════════════════════════════════════════════════

    /// Stored pair with the operation's captured balance folded in
    fn refreshed_state(
        &self,
        source_id: SourceId,
        oracle: &mut AccrualOracle<'_>,
    ) -> Result<LiquidationState> {
        let state = self
            .states
            .get(&source_id)
            .ok_or(Error::UninitializedSource(source_id))?;
        let captured = oracle.read()?;
        let (reserve_in, reserve_out) =
            pricing::next_reserves(state.reserve_in.raw(), state.reserve_out.raw(), captured)?;
        Ok(LiquidationState::new(
            PaymentAmount::new(reserve_in),
            PrizeAmount::new(reserve_out),
        ))
    }

    /// Settle both legs, notify, then commit engine state.
    #[allow(clippy::too_many_arguments)]
    fn execute(
        &mut self,
        caller: Address,
        source_id: SourceId,
        config: &LiquidationConfig,
        oracle: &mut AccrualOracle<'_>,
        ledger: &mut dyn TokenLedger,
        refreshed: LiquidationState,
        amount_in: PaymentAmount,
        amount_out: PrizeAmount,
    ) -> Result<SwapOutcome> {
        let (reserve_in, reserve_out) = pricing::settle(
            refreshed.reserve_in.raw(),
            refreshed.reserve_out.raw(),
            amount_in.raw(),
            amount_out.raw(),
        )?;
        let settled = LiquidationState::new(
            PaymentAmount::new(reserve_in),
            PrizeAmount::new(reserve_out),
        );

        // External legs. Any failure propagates before the engine commits.
        ledger.transfer(
            config.payment_asset,
            caller,
            config.recipient,
            amount_in.raw(),
        )?;
        let ticket = oracle.ticket();
        oracle.award(caller, amount_out.raw(), ticket)?;

        if let Some(listener) = self.listener.as_mut() {
            listener.after_swap(source_id, ticket, amount_out, config.payment_asset, amount_in)?;
        }

        // Commit.
        self.states.insert(source_id, settled);
        self.total_swaps += 1;
        self.total_amount_in = self.total_amount_in.saturating_add(amount_in);
        self.total_amount_out = self.total_amount_out.saturating_add(amount_out);
        self.add_event(EngineEvent::Swapped(SwappedEvent {
            source_id,
            payment_asset: config.payment_asset,
            recipient: config.recipient,
            caller,
            amount_in,
            amount_out,
        }));

        tracing::info!(
            source = %source_id.short(),
            %amount_in,
            %amount_out,
            "swap settled"
        );

        Ok(SwapOutcome {
            amount_in,
            amount_out,
            state: settled,
        })
    }

    /// Add an event (with pruning)
    fn add_event(&mut self, event: EngineEvent) {
        self.events.push(event);

        if self.events.len() > MAX_ENGINE_EVENTS {
            let excess = self.events.len() - MAX_ENGINE_EVENTS;
            self.events.drain(0..excess);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PERSISTENCE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Serialize to bytes. The listener is not serialized; re-register it
    /// after restoring.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| Error::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Rate;
    use crate::core::ids::AssetId;
    use crate::ledger::MemoryLedger;
    use crate::liquidation::listener::RecordingListener;
    use crate::oracle::source::MemoryYieldSource;

    const RESERVE_IN: u128 = 1_000 * 10u128.pow(18);
    const RESERVE_OUT: u128 = 100 * 10u128.pow(6);
    const CAPTURED: u128 = 10 * 10u128.pow(6);

    fn owner() -> Address {
        Address::derive(b"owner")
    }

    fn alice() -> Address {
        Address::derive(b"alice")
    }

    fn usdc() -> AssetId {
        AssetId::derive(b"usdc")
    }

    fn pool_id() -> SourceId {
        SourceId::derive(b"pool-a")
    }

    fn settings() -> PoolSettings {
        PoolSettings {
            recipient: Address::derive(b"prize-pool"),
            payment_asset: usdc(),
            swap_multiplier: Rate::from_raw(300_000_000).unwrap(),
            liquidation_fraction: Rate::from_raw(500_000_000).unwrap(),
            init_reserve_in: PaymentAmount::new(RESERVE_IN),
            init_reserve_out: PrizeAmount::new(RESERVE_OUT),
        }
    }

    fn configured_engine() -> LiquidationEngine {
        let mut engine = LiquidationEngine::new(owner());
        engine
            .set_prize_pool(owner(), pool_id(), settings())
            .unwrap();
        engine
    }

    fn funded_ledger() -> MemoryLedger {
        let mut ledger = MemoryLedger::new();
        ledger.mint(usdc(), alice(), 10_000 * 10u128.pow(18));
        ledger
    }

    fn accruing_source() -> MemoryYieldSource {
        let mut source = MemoryYieldSource::new(AssetId::derive(b"ticket"));
        source.accrue(CAPTURED);
        source
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESS CONTROL
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_set_prize_pool_owner_only() {
        let mut engine = LiquidationEngine::new(owner());
        let result = engine.set_prize_pool(alice(), pool_id(), settings());
        assert_eq!(
            result,
            Err(Error::Unauthorized {
                caller: alice(),
                required: "owner",
            })
        );
    }

    #[test]
    fn test_manager_cannot_reconfigure_pools() {
        let mut engine = configured_engine();
        let manager = Address::derive(b"manager");
        engine.set_manager(owner(), Some(manager)).unwrap();

        assert!(engine.set_prize_pool(manager, pool_id(), settings()).is_err());
        // But the manager may register a listener.
        assert!(engine
            .set_listener(manager, Some(Box::new(RecordingListener::new())))
            .is_ok());
    }

    #[test]
    fn test_set_manager_owner_only() {
        let mut engine = configured_engine();
        assert!(engine.set_manager(alice(), Some(alice())).is_err());
        assert!(engine.set_manager(owner(), Some(alice())).is_ok());
        assert_eq!(engine.manager(), Some(alice()));

        engine.set_manager(owner(), None).unwrap();
        assert_eq!(engine.manager(), None);
    }

    #[test]
    fn test_stranger_cannot_set_listener() {
        let mut engine = configured_engine();
        let result = engine.set_listener(alice(), Some(Box::new(RecordingListener::new())));
        assert!(matches!(result, Err(Error::Unauthorized { .. })));
    }

    #[test]
    fn test_zero_manager_rejected() {
        let mut engine = configured_engine();
        assert_eq!(
            engine.set_manager(owner(), Some(Address::ZERO)),
            Err(Error::NullIdentity { field: "manager" })
        );
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION SEMANTICS
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_set_prize_pool_full_replace() {
        let mut engine = configured_engine();

        let mut replacement = settings();
        replacement.recipient = Address::derive(b"new-recipient");
        replacement.init_reserve_in = PaymentAmount::new(42);
        replacement.init_reserve_out = PrizeAmount::new(43);
        engine
            .set_prize_pool(owner(), pool_id(), replacement)
            .unwrap();

        let config = engine.config(pool_id()).unwrap();
        assert_eq!(config.recipient, Address::derive(b"new-recipient"));
        let state = engine.liquidation_state(pool_id()).unwrap();
        assert_eq!(state.reserve_in, PaymentAmount::new(42));
        assert_eq!(state.reserve_out, PrizeAmount::new(43));
    }

    #[test]
    fn test_configuration_event_emitted() {
        let engine = configured_engine();
        let events = engine.recent_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "PrizePoolConfigured");
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PRICING VIEWS
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_next_liquidation_state_uninitialized() {
        let engine = LiquidationEngine::new(owner());
        assert_eq!(
            engine.next_liquidation_state(pool_id(), PrizeAmount::new(1)),
            Err(Error::UninitializedSource(pool_id()))
        );
    }

    #[test]
    fn test_next_liquidation_state_zero_is_identity() {
        let engine = configured_engine();
        let state = engine
            .next_liquidation_state(pool_id(), PrizeAmount::ZERO)
            .unwrap();
        assert_eq!(state.reserve_in.raw(), RESERVE_IN);
        assert_eq!(state.reserve_out.raw(), RESERVE_OUT);
    }

    #[test]
    fn test_next_liquidation_state_top_up() {
        let engine = configured_engine();
        let state = engine
            .next_liquidation_state(pool_id(), PrizeAmount::new(CAPTURED))
            .unwrap();
        assert_eq!(state.reserve_in.raw(), 909_090_909_090_909_090_910);
        assert_eq!(state.reserve_out.raw(), 110_000_000);
    }

    #[test]
    fn test_compute_quotes_refresh_through_oracle() {
        let engine = configured_engine();

        let mut source = accruing_source();
        let amount_in = engine
            .compute_exact_amount_in(pool_id(), &mut source, PrizeAmount::new(5 * 10u128.pow(6)))
            .unwrap();
        assert_eq!(amount_in.raw(), 43_290_043_290_043_290_043);

        let mut source = accruing_source();
        let amount_out = engine
            .compute_exact_amount_out(pool_id(), &mut source, PaymentAmount::new(4 * 10u128.pow(18)))
            .unwrap();
        assert_eq!(amount_out.raw(), 481_879);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SWAPS
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_swap_exact_amount_in_settles_both_legs() {
        let mut engine = configured_engine();
        let mut source = accruing_source();
        let mut ledger = funded_ledger();

        let amount_in = PaymentAmount::new(4 * 10u128.pow(18));
        let outcome = engine
            .swap_exact_amount_in(
                alice(),
                pool_id(),
                &mut source,
                &mut ledger,
                amount_in,
                PrizeAmount::new(481_879),
            )
            .unwrap();

        assert_eq!(outcome.amount_out.raw(), 481_879);
        // Payment leg: caller -> recipient.
        assert_eq!(
            ledger.balance_of(usdc(), Address::derive(b"prize-pool")),
            amount_in.raw()
        );
        // Award leg: source -> caller.
        assert_eq!(source.balance_of(alice()), 481_879);
        // Reserves persisted.
        let state = engine.liquidation_state(pool_id()).unwrap();
        assert_eq!(
            state.reserve_in.raw(),
            909_090_909_090_909_090_910 + amount_in.raw()
        );
        assert_eq!(state.reserve_out.raw(), 110_000_000 - 481_879);
        // Event emitted.
        assert_eq!(
            engine.recent_events().last().unwrap().event_type(),
            "Swapped"
        );
        assert_eq!(engine.statistics().total_swaps, 1);
    }

    #[test]
    fn test_swap_exact_amount_in_slippage() {
        let mut engine = configured_engine();
        let mut source = accruing_source();
        let mut ledger = funded_ledger();

        let result = engine.swap_exact_amount_in(
            alice(),
            pool_id(),
            &mut source,
            &mut ledger,
            PaymentAmount::new(4 * 10u128.pow(18)),
            PrizeAmount::new(481_880),
        );
        assert_eq!(
            result,
            Err(Error::SlippageExceededMin {
                amount_out: 481_879,
                min_out: 481_880,
            })
        );
        // Nothing committed.
        let state = engine.liquidation_state(pool_id()).unwrap();
        assert_eq!(state.reserve_in.raw(), RESERVE_IN);
        assert_eq!(engine.statistics().total_swaps, 0);
    }

    #[test]
    fn test_swap_exact_amount_out_slippage_one_unit() {
        // Required input for an exact output of 481,879 from the refreshed
        // reserves is 3,999,993,920,474,751,222; a maximum one unit lower
        // must fail.
        let mut engine = configured_engine();
        let mut source = accruing_source();
        let mut ledger = funded_ledger();

        let result = engine.swap_exact_amount_out(
            alice(),
            pool_id(),
            &mut source,
            &mut ledger,
            PrizeAmount::new(481_879),
            PaymentAmount::new(3_999_993_920_474_751_221),
        );
        assert_eq!(
            result,
            Err(Error::SlippageExceededMax {
                amount_in: 3_999_993_920_474_751_222,
                max_in: 3_999_993_920_474_751_221,
            })
        );
    }

    #[test]
    fn test_swap_exact_amount_out_settles() {
        let mut engine = configured_engine();
        let mut source = accruing_source();
        let mut ledger = funded_ledger();

        let outcome = engine
            .swap_exact_amount_out(
                alice(),
                pool_id(),
                &mut source,
                &mut ledger,
                PrizeAmount::new(481_879),
                PaymentAmount::new(3_999_993_920_474_751_222),
            )
            .unwrap();
        assert_eq!(outcome.amount_in.raw(), 3_999_993_920_474_751_222);
        assert_eq!(source.balance_of(alice()), 481_879);
    }

    #[test]
    fn test_swap_unknown_source() {
        let mut engine = LiquidationEngine::new(owner());
        let mut source = accruing_source();
        let mut ledger = funded_ledger();

        let result = engine.swap_exact_amount_in(
            alice(),
            pool_id(),
            &mut source,
            &mut ledger,
            PaymentAmount::new(1),
            PrizeAmount::ZERO,
        );
        assert_eq!(result, Err(Error::UnknownSource(pool_id())));
    }

    #[test]
    fn test_drain_attempt_fails_with_liquidity_error() {
        let mut engine = configured_engine();
        let mut source = accruing_source();
        let mut ledger = funded_ledger();

        // Requesting the full refreshed reserve must fail cleanly.
        let result = engine.swap_exact_amount_out(
            alice(),
            pool_id(),
            &mut source,
            &mut ledger,
            PrizeAmount::new(110_000_000),
            PaymentAmount::new(u128::MAX),
        );
        assert_eq!(
            result,
            Err(Error::InsufficientLiquidity {
                requested: 110_000_000,
                available: 110_000_000,
            })
        );
    }

    #[test]
    fn test_repeated_swaps_never_underflow_reserves() {
        let mut engine = configured_engine();
        let mut source = accruing_source();
        let mut ledger = funded_ledger();

        // Several award-backed chunks settle cleanly...
        for _ in 0..3 {
            engine
                .swap_exact_amount_out(
                    alice(),
                    pool_id(),
                    &mut source,
                    &mut ledger,
                    PrizeAmount::new(3 * 10u128.pow(6)),
                    PaymentAmount::new(u128::MAX),
                )
                .unwrap();
            let state = engine.liquidation_state(pool_id()).unwrap();
            assert!(state.reserve_out.raw() > 0);
        }

        // ...but a request for the entire remaining reserve fails with a
        // liquidity error instead of underflowing.
        let remaining = engine
            .liquidation_state(pool_id())
            .unwrap()
            .reserve_out
            .raw();
        let result = engine.swap_exact_amount_out(
            alice(),
            pool_id(),
            &mut source,
            &mut ledger,
            PrizeAmount::new(remaining),
            PaymentAmount::new(u128::MAX),
        );
        assert_eq!(
            result,
            Err(Error::InsufficientLiquidity {
                requested: remaining,
                available: remaining,
            })
        );
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // LISTENER
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_listener_receives_payload() {
        let mut engine = configured_engine();
        let recorder = RecordingListener::new();
        engine
            .set_listener(owner(), Some(Box::new(recorder.clone())))
            .unwrap();

        let mut source = accruing_source();
        let mut ledger = funded_ledger();
        engine
            .swap_exact_amount_in(
                alice(),
                pool_id(),
                &mut source,
                &mut ledger,
                PaymentAmount::new(4 * 10u128.pow(18)),
                PrizeAmount::ZERO,
            )
            .unwrap();

        let notifications = recorder.notifications();
        assert_eq!(notifications.len(), 1);
        let n = &notifications[0];
        assert_eq!(n.source_id, pool_id());
        assert_eq!(n.awarded_asset, AssetId::derive(b"ticket"));
        assert_eq!(n.amount_out, PrizeAmount::new(481_879));
        assert_eq!(n.payment_asset, usdc());
        assert_eq!(n.amount_in, PaymentAmount::new(4 * 10u128.pow(18)));
    }

    #[derive(Debug)]
    struct FailingListener;

    impl SwapListener for FailingListener {
        fn after_swap(
            &mut self,
            _source_id: SourceId,
            _awarded_asset: AssetId,
            _amount_out: PrizeAmount,
            _payment_asset: AssetId,
            _amount_in: PaymentAmount,
        ) -> Result<()> {
            Err(Error::Serialization("listener down".into()))
        }
    }

    #[test]
    fn test_listener_failure_aborts_engine_commit() {
        let mut engine = configured_engine();
        engine
            .set_listener(owner(), Some(Box::new(FailingListener)))
            .unwrap();

        let mut source = accruing_source();
        let mut ledger = funded_ledger();
        let result = engine.swap_exact_amount_in(
            alice(),
            pool_id(),
            &mut source,
            &mut ledger,
            PaymentAmount::new(4 * 10u128.pow(18)),
            PrizeAmount::ZERO,
        );
        assert!(result.is_err());

        // Engine state untouched: reserves, totals and event log unchanged.
        let state = engine.liquidation_state(pool_id()).unwrap();
        assert_eq!(state.reserve_in.raw(), RESERVE_IN);
        assert_eq!(state.reserve_out.raw(), RESERVE_OUT);
        assert_eq!(engine.statistics().total_swaps, 0);
        assert!(engine
            .recent_events()
            .iter()
            .all(|e| e.event_type() != "Swapped"));
    }

    #[test]
    fn test_absent_listener_disables_notification_only() {
        let mut engine = configured_engine();
        let mut source = accruing_source();
        let mut ledger = funded_ledger();

        // No listener registered; swap settles normally.
        assert!(engine
            .swap_exact_amount_in(
                alice(),
                pool_id(),
                &mut source,
                &mut ledger,
                PaymentAmount::new(4 * 10u128.pow(18)),
                PrizeAmount::ZERO,
            )
            .is_ok());
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PERSISTENCE
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_snapshot_round_trip() {
        let mut engine = configured_engine();
        let mut source = accruing_source();
        let mut ledger = funded_ledger();
        engine
            .swap_exact_amount_in(
                alice(),
                pool_id(),
                &mut source,
                &mut ledger,
                PaymentAmount::new(4 * 10u128.pow(18)),
                PrizeAmount::ZERO,
            )
            .unwrap();

        let bytes = engine.to_bytes().unwrap();
        let restored = LiquidationEngine::from_bytes(&bytes).unwrap();

        assert_eq!(restored.owner(), engine.owner());
        assert_eq!(
            restored.liquidation_state(pool_id()),
            engine.liquidation_state(pool_id())
        );
        assert_eq!(restored.statistics(), engine.statistics());
        assert_eq!(restored.recent_events(), engine.recent_events());
    }
}
