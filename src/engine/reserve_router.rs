//! Multi-hop execution over reserve-based pools.
//!
//! # Protocol
//!
//! Reserve pools are settled by pre-funding: the input is moved into the
//! first pool before it is asked to swap, and every hop sends its output
//! straight into the next hop's pool.  Only the final hop pays the
//! recipient.
//!
//! Each hop's input is measured as the pool's balance above its stored
//! reserve, so transfer-fee tokens are priced by what actually arrived.
//! The realized output of a whole swap is the recipient's balance delta.

use alloy_primitives::{Address, U256};
use tracing::{debug, instrument};

use super::payment::pay;
use crate::accountant::{Settlement, TradeAccountant};
use crate::chain::ChainState;
use crate::config::RouterConfig;
use crate::domain::{AmountIn, SwapStep, TokenPair, TradeRecord, TradeType};
use crate::error::{Result, RouterError};
use crate::math::{get_amount_in, get_amount_out};
use crate::path::PoolLocator;
use crate::traits::{PoolState, PriceFeed, ReservePool, TokenLedger};

/// Swap engine for the reserve-based protocol.
///
/// Stateless between calls: every top-level swap runs inside
/// [`ChainState::atomically`], so a failure anywhere along the route
/// leaves no token movement behind and emits no trade record.
#[derive(Debug, Clone)]
pub struct ReserveRouter<F> {
    config: RouterConfig,
    locator: PoolLocator,
    accountant: TradeAccountant<F>,
}

impl<F: PriceFeed> ReserveRouter<F> {
    /// Creates the engine.
    ///
    /// # Errors
    ///
    /// The errors of [`RouterConfig::validate`].
    pub fn new(config: RouterConfig, price_feed: F) -> Result<Self> {
        config.validate()?;
        let locator = config.reserve_protocol.locator();
        let accountant = TradeAccountant::from_config(&config, price_feed);
        Ok(Self {
            config,
            locator,
            accountant,
        })
    }

    /// The engine's configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Derived address of the pool trading `token_a` against `token_b`.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPath`] for identical or zero tokens.
    pub fn pool_for(&self, token_a: Address, token_b: Address) -> Result<Address> {
        self.locator.reserve_pool_address(token_a, token_b)
    }

    fn check_route(route: &[Address]) -> Result<()> {
        if route.len() < 2 {
            return Err(RouterError::InvalidPath("route needs at least two tokens"));
        }
        Ok(())
    }

    fn reserves_for(host: &ChainState, pool: Address, input: Address, output: Address) -> Result<(U256, U256)> {
        let view = host.pool(pool)?.as_reserve(pool)?;
        let (reserve0, reserve1) = view.reserves();
        let pair = TokenPair::new(input, output)?;
        Ok(pair.order(input, reserve0, reserve1))
    }

    /// Outputs of every hop for selling `amount_in` along `route`, without
    /// executing.  Element `0` is `amount_in`.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPath`], [`RouterError::UnknownPool`] and the
    /// quoting errors of [`get_amount_out`].
    pub fn get_amounts_out(
        &self,
        host: &ChainState,
        amount_in: U256,
        route: &[Address],
    ) -> Result<Vec<U256>> {
        Self::check_route(route)?;
        let mut amounts = Vec::with_capacity(route.len());
        amounts.push(amount_in);
        for (i, pair) in route.windows(2).enumerate() {
            let pool = self.pool_for(pair[0], pair[1])?;
            let (reserve_in, reserve_out) = Self::reserves_for(host, pool, pair[0], pair[1])?;
            amounts.push(get_amount_out(amounts[i], reserve_in, reserve_out)?);
        }
        Ok(amounts)
    }

    /// Inputs every hop needs for buying `amount_out` at the end of
    /// `route`, without executing.  The last element is `amount_out`.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPath`], [`RouterError::UnknownPool`] and the
    /// quoting errors of [`get_amount_in`].
    pub fn get_amounts_in(
        &self,
        host: &ChainState,
        amount_out: U256,
        route: &[Address],
    ) -> Result<Vec<U256>> {
        Self::check_route(route)?;
        let mut amounts = vec![U256::ZERO; route.len()];
        let last = route.len() - 1;
        amounts[last] = amount_out;
        for i in (1..route.len()).rev() {
            let pool = self.pool_for(route[i - 1], route[i])?;
            let (reserve_in, reserve_out) = Self::reserves_for(host, pool, route[i - 1], route[i])?;
            amounts[i - 1] = get_amount_in(amounts[i], reserve_in, reserve_out)?;
        }
        Ok(amounts)
    }

    /// Sells an input along `route` and sends the output to `recipient`.
    ///
    /// - [`AmountIn::Exact`] pulls the amount from `payer`.
    /// - [`AmountIn::AlreadyFunded`] trades whatever the first pool holds
    ///   above its reserve.
    /// - [`AmountIn::FullBalance`] sends the engine's whole balance of the
    ///   input token.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPath`] for a route shorter than two tokens,
    /// [`RouterError::InvalidAmount`] for a zero input,
    /// [`RouterError::TooLittleReceived`] if the recipient gained less than
    /// `amount_out_minimum`, and any ledger, pool or accounting failure.
    /// Every error rolls the host back.
    #[instrument(skip(self, host), fields(hops = route.len().saturating_sub(1)))]
    pub fn swap_exact_input(
        &self,
        host: &mut ChainState,
        route: &[Address],
        recipient: Address,
        amount_in: AmountIn,
        amount_out_minimum: U256,
        payer: Address,
    ) -> Result<TradeRecord> {
        Self::check_route(route)?;
        host.atomically(|host| {
            let (token_in, token_out) = (route[0], route[route.len() - 1]);
            let balances = self.accountant.open(host, payer, token_in, token_out)?;
            let first_pool = self.pool_for(route[0], route[1])?;
            let engine = self.config.engine_address;

            let paid = match amount_in {
                AmountIn::Exact(amount) => {
                    if amount.is_zero() {
                        return Err(RouterError::InvalidAmount("zero input"));
                    }
                    pay(host, engine, token_in, payer, first_pool, amount)?;
                    Some(amount)
                }
                AmountIn::AlreadyFunded => None,
                AmountIn::FullBalance => {
                    let amount = host.balance_of(token_in, engine)?;
                    if amount.is_zero() {
                        return Err(RouterError::InvalidAmount("engine holds no input"));
                    }
                    pay(host, engine, token_in, engine, first_pool, amount)?;
                    Some(amount)
                }
            };

            let before = host.balance_of(token_out, recipient)?;
            let steps = self.execute(host, route, recipient)?;
            let amount_out = host.balance_of(token_out, recipient)?.saturating_sub(before);
            if amount_out < amount_out_minimum {
                return Err(RouterError::TooLittleReceived {
                    amount_out,
                    minimum: amount_out_minimum,
                });
            }

            let amount_sold = match paid {
                Some(amount) => amount,
                None => steps.first().map(|s| s.amount_in).unwrap_or_default(),
            };
            let settlement = Settlement {
                trader: payer,
                trade_type: TradeType::ExactInput,
                token_sold: token_in,
                amount_sold,
                token_bought: token_out,
                amount_bought: amount_out,
                pools: self.pools(route)?,
                steps,
                balances,
            };
            self.accountant
                .record(host, &self.config.reserve_protocol.exchange_tag, settlement)
        })
    }

    /// Buys exactly `amount_out` of the last token of `route` for at most
    /// `amount_in_maximum` of the first.
    ///
    /// The required input is quoted backwards along the route and pulled
    /// from `payer` into the first pool.  The route then executes forward
    /// exactly like an exact-input swap, so every hop's output is quoted
    /// from its measured input and the recipient receives at least
    /// `amount_out`.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPath`], [`RouterError::InvalidAmount`] for a
    /// zero output, [`RouterError::TooMuchRequested`] if the quoted input
    /// exceeds `amount_in_maximum`, and any ledger, pool or accounting
    /// failure.  Every error rolls the host back.
    #[instrument(skip(self, host), fields(hops = route.len().saturating_sub(1)))]
    pub fn swap_exact_output(
        &self,
        host: &mut ChainState,
        route: &[Address],
        recipient: Address,
        amount_out: U256,
        amount_in_maximum: U256,
        payer: Address,
    ) -> Result<TradeRecord> {
        Self::check_route(route)?;
        if amount_out.is_zero() {
            return Err(RouterError::InvalidAmount("zero output"));
        }
        host.atomically(|host| {
            let (token_in, token_out) = (route[0], route[route.len() - 1]);
            let balances = self.accountant.open(host, payer, token_in, token_out)?;
            let amounts = self.get_amounts_in(host, amount_out, route)?;
            let amount_in = amounts[0];
            if amount_in > amount_in_maximum {
                return Err(RouterError::TooMuchRequested {
                    amount_in,
                    maximum: amount_in_maximum,
                });
            }

            let first_pool = self.pool_for(route[0], route[1])?;
            pay(host, self.config.engine_address, token_in, payer, first_pool, amount_in)?;
            let before = host.balance_of(token_out, recipient)?;
            let steps = self.execute(host, route, recipient)?;
            let amount_bought = host.balance_of(token_out, recipient)?.saturating_sub(before);

            let settlement = Settlement {
                trader: payer,
                trade_type: TradeType::ExactOutput,
                token_sold: token_in,
                amount_sold: amount_in,
                token_bought: token_out,
                amount_bought,
                pools: self.pools(route)?,
                steps,
                balances,
            };
            self.accountant
                .record(host, &self.config.reserve_protocol.exchange_tag, settlement)
        })
    }

    fn pools(&self, route: &[Address]) -> Result<Vec<Address>> {
        route
            .windows(2)
            .map(|pair| self.pool_for(pair[0], pair[1]))
            .collect()
    }

    /// Runs every hop of a funded route, quoting each output from the
    /// input measured at the pool.
    fn execute(
        &self,
        host: &mut ChainState,
        route: &[Address],
        recipient: Address,
    ) -> Result<Vec<SwapStep>> {
        let hops = route.len() - 1;
        let mut steps = Vec::with_capacity(hops);
        for i in 0..hops {
            let (input, output) = (route[i], route[i + 1]);
            let pool_address = self.pool_for(input, output)?;
            let to = if i + 1 < hops {
                self.pool_for(output, route[i + 2])?
            } else {
                recipient
            };

            let step = host.lend_pool(pool_address, |pool, host| {
                let pool = pool.as_reserve_mut(pool_address)?;
                let pair = pool.token_pair();
                let zero_for_one = pair.zero_for_one(input)?;
                let (reserve0, reserve1) = pool.reserves();
                let (reserve_in, reserve_out) = if zero_for_one {
                    (reserve0, reserve1)
                } else {
                    (reserve1, reserve0)
                };

                let amount_in = host
                    .balance_of(input, pool_address)?
                    .checked_sub(reserve_in)
                    .ok_or(RouterError::InsufficientInputAmount)?;
                let amount_out = get_amount_out(amount_in, reserve_in, reserve_out)?;
                let (amount0_out, amount1_out) = if zero_for_one {
                    (U256::ZERO, amount_out)
                } else {
                    (amount_out, U256::ZERO)
                };
                pool.swap(pool_address, host, amount0_out, amount1_out, to)?;
                SwapStep::with_reserves(input, output, amount_in, amount_out, reserve_in, reserve_out)
            })?;

            debug!(
                hop = i,
                pool = %pool_address,
                amount_in = %step.amount_in,
                amount_out = %step.amount_out,
                "reserve hop executed"
            );
            steps.push(step);
        }
        Ok(steps)
    }
}
