//! Assembly of the canonical [`TradeRecord`].

use alloy_primitives::{Address, U256};
use tracing::info;

use super::{BalanceProbe, UsdValuator};
use crate::chain::ChainState;
use crate::config::RouterConfig;
use crate::domain::{PoolSnapshot, SwapStep, TradeRecord, TradeType};
use crate::error::Result;
use crate::traits::{PoolState, PriceFeed, TokenLedger};

/// Realized amounts of an executed swap, handed from an engine to the
/// accountant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Account that initiated the trade.
    pub trader: Address,
    /// Which side the caller fixed.
    pub trade_type: TradeType,
    /// First token of the route.
    pub token_sold: Address,
    /// Input actually sold.
    pub amount_sold: U256,
    /// Last token of the route.
    pub token_bought: Address,
    /// Output actually bought.
    pub amount_bought: U256,
    /// Pool addresses in route order.
    pub pools: Vec<Address>,
    /// Per-hop steps in route order.
    pub steps: Vec<SwapStep>,
    /// Trader balances read before execution.
    pub balances: BalanceProbe,
}

/// Reads the current state of the pool at `address`.
///
/// # Errors
///
/// [`RouterError::UnknownPool`](crate::error::RouterError::UnknownPool) if
/// nothing is deployed there, or a metadata failure of either token.
pub fn pool_snapshot(host: &ChainState, address: Address) -> Result<PoolSnapshot> {
    let pool = host.pool(address)?;
    let pair = pool.token_pair();
    Ok(PoolSnapshot {
        token0_info: host.metadata(pair.token0())?,
        token1_info: host.metadata(pair.token1())?,
        pool_address: address,
        fee_tier: pool.fee_tier(),
        tick_spacing: pool.tick_spacing(),
    })
}

/// Turns settlements into trade records and emits them.
#[derive(Debug, Clone)]
pub struct TradeAccountant<F> {
    valuator: UsdValuator<F>,
}

impl<F: PriceFeed> TradeAccountant<F> {
    /// Creates an accountant around a valuator.
    #[must_use]
    pub const fn new(valuator: UsdValuator<F>) -> Self {
        Self { valuator }
    }

    /// Creates an accountant from the router configuration.
    #[must_use]
    pub fn from_config(config: &RouterConfig, price_feed: F) -> Self {
        Self::new(UsdValuator::from_config(config, price_feed))
    }

    /// The valuator used for USD amounts.
    #[must_use]
    pub const fn valuator(&self) -> &UsdValuator<F> {
        &self.valuator
    }

    /// Reads the trader's "before" balances.
    ///
    /// # Errors
    ///
    /// See [`BalanceProbe::capture`].
    pub fn open(
        &self,
        ledger: &dyn TokenLedger,
        trader: Address,
        token_sold: Address,
        token_bought: Address,
    ) -> Result<BalanceProbe> {
        BalanceProbe::capture(
            ledger,
            trader,
            token_sold,
            token_bought,
            self.valuator.wrapped_native(),
        )
    }

    /// Builds the record for `settlement` without emitting it.
    ///
    /// # Errors
    ///
    /// Metadata, pool lookup and price-feed failures propagate.
    pub fn assemble(
        &self,
        host: &ChainState,
        exchange_tag: &str,
        settlement: Settlement,
    ) -> Result<TradeRecord> {
        let usd_value = self.valuator.trade_usd(
            settlement.token_sold,
            settlement.amount_sold,
            settlement.token_bought,
            settlement.amount_bought,
        )?;
        let hop_fees_usd = settlement
            .steps
            .iter()
            .map(|step| self.valuator.fee_usd(step))
            .collect::<Result<Vec<_>>>()?;
        let route = settlement
            .pools
            .iter()
            .map(|pool| pool_snapshot(host, *pool))
            .collect::<Result<Vec<_>>>()?;

        Ok(TradeRecord {
            trader: settlement.trader,
            usd_value,
            exchange_tag: exchange_tag.to_owned(),
            amount_sold: settlement.amount_sold,
            token_sold_info: host.metadata(settlement.token_sold)?,
            amount_bought: settlement.amount_bought,
            token_bought_info: host.metadata(settlement.token_bought)?,
            route,
            balances: settlement
                .balances
                .finish(settlement.amount_sold, settlement.amount_bought),
            trade_type: settlement.trade_type,
            hop_fees: settlement.steps,
            hop_fees_usd,
        })
    }

    /// Builds the record, appends it to the host's event log and returns
    /// it.
    ///
    /// # Errors
    ///
    /// See [`assemble`](Self::assemble); nothing is emitted on error.
    pub fn record(
        &self,
        host: &mut ChainState,
        exchange_tag: &str,
        settlement: Settlement,
    ) -> Result<TradeRecord> {
        let record = self.assemble(host, exchange_tag, settlement)?;
        info!(
            trader = %record.trader,
            exchange = %record.exchange_tag,
            trade_type = %record.trade_type,
            amount_sold = %record.amount_sold,
            amount_bought = %record.amount_bought,
            usd_value = %record.usd_value,
            "trade recorded"
        );
        host.emit(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use alloy_primitives::{B256, I256};

    use super::*;
    use crate::chain::{InMemoryLedger, StaticPriceFeed};
    use crate::config::{PoolConfig, ReserveConfig};
    use crate::domain::{FeeTier, TokenDescriptor};
    use crate::error::RouterError;
    use crate::factory::DefaultPoolFactory;
    use crate::path::PoolLocator;

    const TOKEN_A: Address = Address::repeat_byte(0x11);
    const USDC: Address = Address::repeat_byte(0x55);
    const WETH: Address = Address::repeat_byte(0x44);
    const TRADER: Address = Address::repeat_byte(0xa1);

    fn setup() -> (ChainState, Address) {
        let mut ledger = InMemoryLedger::new();
        ledger.register_token(TokenDescriptor::new("A", "Token A", TOKEN_A, 18));
        ledger.register_token(TokenDescriptor::new("USDC", "USD Coin", USDC, 6));
        ledger.mint(TOKEN_A, TRADER, U256::from(1_000u64));
        let mut host = ChainState::new(ledger);
        let Ok(cfg) = ReserveConfig::new(TOKEN_A, USDC, U256::from(1_000u64), U256::from(1_000u64))
        else {
            panic!("valid config");
        };
        let locator = PoolLocator::new(Address::repeat_byte(0xf2), B256::repeat_byte(0x96));
        let Ok(pool) = DefaultPoolFactory::deploy(&mut host, &locator, &PoolConfig::Reserve(cfg))
        else {
            panic!("deployed");
        };
        (host, pool)
    }

    fn accountant() -> TradeAccountant<StaticPriceFeed> {
        TradeAccountant::new(UsdValuator::new(
            WETH,
            vec![USDC],
            StaticPriceFeed::new(I256::ONE, 8),
        ))
    }

    fn settlement(pool: Address, probe: BalanceProbe) -> Settlement {
        Settlement {
            trader: TRADER,
            trade_type: TradeType::ExactInput,
            token_sold: TOKEN_A,
            amount_sold: U256::from(100u64),
            token_bought: USDC,
            amount_bought: U256::from(90u64),
            pools: vec![pool],
            steps: vec![SwapStep {
                token_in: TOKEN_A,
                token_out: USDC,
                amount_in: U256::from(100u64),
                amount_out: U256::from(90u64),
                fee_in_token_in: U256::from(0u64),
                fee_in_token_out: U256::from(1u64),
            }],
            balances: probe,
        }
    }

    #[test]
    fn snapshot_reads_pool_state() {
        let (host, pool) = setup();
        let Ok(snap) = pool_snapshot(&host, pool) else {
            panic!("expected Ok");
        };
        assert_eq!(snap.token0_info.symbol, "A");
        assert_eq!(snap.token1_info.symbol, "USDC");
        assert_eq!(snap.fee_tier, FeeTier::MEDIUM);
        assert_eq!(snap.tick_spacing, 0);
        assert_eq!(
            pool_snapshot(&host, TRADER).err(),
            Some(RouterError::UnknownPool(TRADER))
        );
    }

    #[test]
    fn record_emits_once() {
        let (mut host, pool) = setup();
        let accountant = accountant();
        let Ok(probe) = accountant.open(&host, TRADER, TOKEN_A, USDC) else {
            panic!("expected Ok");
        };
        let Ok(record) = accountant.record(&mut host, "reserve-v2", settlement(pool, probe)) else {
            panic!("expected Ok");
        };
        assert_eq!(record.usd_value, U256::from(90u64));
        assert_eq!(record.hop_fees_usd, vec![U256::from(1u64)]);
        assert_eq!(record.balances.sold_before, U256::from(1_000u64));
        assert_eq!(record.balances.sold_after, U256::from(900u64));
        assert_eq!(record.balances.bought_after, U256::from(90u64));
        assert_eq!(record.route.len(), 1);
        assert_eq!(host.events(), &[record]);
    }

    #[test]
    fn metadata_failure_emits_nothing() {
        let (mut host, pool) = setup();
        let accountant = accountant();
        let Ok(probe) = accountant.open(&host, TRADER, TOKEN_A, USDC) else {
            panic!("expected Ok");
        };
        let mut bad = settlement(pool, probe);
        bad.token_bought = WETH;
        assert_eq!(
            accountant.record(&mut host, "reserve-v2", bad),
            Err(RouterError::UnknownToken(WETH))
        );
        assert!(host.events().is_empty());
    }
}
