//! Multi-hop execution over tick-based pools settled by callback.
//!
//! # Protocol
//!
//! A tick pool computes its deltas, sends its output, and then calls
//! [`SwapCallback::on_swap_settled`] on the engine before returning.  The
//! engine settles inside that callback:
//!
//! - **Exact input**: the engine walks the path itself.  Each hop is a
//!   separate request whose callback pays the pool at once, and each hop's
//!   output funds the next.
//! - **Exact output**: the engine requests the *last* hop of the path.
//!   Its callback requests the hop before it with the calling pool as
//!   recipient, and so on, until the first hop's callback pays the trader's
//!   input.  The whole chain is one nested call stack.
//!
//! The continuation (remaining path and payer) travels through the pool
//! as opaque [`SwapCallbackData`].  Every callback re-derives the pool
//! address of the hop it settles and rejects any other caller.

use alloy_primitives::{Address, I256, U256};
use tracing::{debug, instrument};

use super::payment::pay;
use super::transient::TransientSlot;
use crate::accountant::{Settlement, TradeAccountant};
use crate::chain::ChainState;
use crate::config::RouterConfig;
use crate::domain::{AmountIn, FeeTier, Hop, SwapStep, TradeRecord, TradeType};
use crate::error::{Result, RouterError};
use crate::math::default_price_limit;
use crate::path::{Path, PoolLocator, SwapCallbackData};
use crate::traits::{PriceFeed, SwapCallback, TickPool, TokenLedger};

fn signed(amount: U256) -> Result<I256> {
    I256::try_from(amount).map_err(|_| RouterError::Overflow("amount exceeds int256"))
}

fn hop_fee(hop: &Hop) -> Result<FeeTier> {
    hop.fee
        .ok_or(RouterError::MalformedPath("tick hop without fee tier"))
}

/// State of the exact-output call in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ExactOutputState {
    amount_in_maximum: U256,
    amount_in_paid: Option<U256>,
    pools: Vec<Address>,
    steps: Vec<SwapStep>,
}

impl ExactOutputState {
    fn new(amount_in_maximum: U256) -> Self {
        Self {
            amount_in_maximum,
            ..Self::default()
        }
    }
}

fn exact_output_slot<F>(router: &mut CallbackRouter<F>) -> &mut TransientSlot<ExactOutputState> {
    &mut router.exact_output
}

/// Swap engine for the tick-based protocol.
///
/// Holds one piece of call-scoped state: the exact-output slot, filled
/// with the input bound right before an exact-output swap starts and
/// emptied on every exit path.  Hops record themselves into the slot as
/// the nested swaps unwind.
#[derive(Debug, Clone)]
pub struct CallbackRouter<F> {
    config: RouterConfig,
    locator: PoolLocator,
    accountant: TradeAccountant<F>,
    exact_output: TransientSlot<ExactOutputState>,
}

impl<F: PriceFeed> CallbackRouter<F> {
    /// Creates the engine.
    ///
    /// # Errors
    ///
    /// The errors of [`RouterConfig::validate`].
    pub fn new(config: RouterConfig, price_feed: F) -> Result<Self> {
        config.validate()?;
        let locator = config.tick_protocol.locator();
        let accountant = TradeAccountant::from_config(&config, price_feed);
        Ok(Self {
            config,
            locator,
            accountant,
            exact_output: TransientSlot::new(),
        })
    }

    /// The engine's configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Whether an exact-output swap is in progress.
    #[must_use]
    pub const fn exact_output_in_progress(&self) -> bool {
        self.exact_output.is_set()
    }

    /// Derived address of the pool for a token pair and fee tier.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPath`] for identical or zero tokens.
    pub fn pool_for(&self, token_a: Address, token_b: Address, fee: FeeTier) -> Result<Address> {
        self.locator.tick_pool_address(token_a, token_b, fee)
    }

    fn endpoints(path: &Path) -> Result<(Address, Address)> {
        match (path.first_token(), path.last_token()) {
            (Some(first), Some(last)) if path.num_pools() > 0 => Ok((first, last)),
            _ => Err(RouterError::InvalidPath("path has no pool")),
        }
    }

    /// Sells an input along `path` and sends the output to `recipient`.
    ///
    /// [`AmountIn::Exact`] is paid by `payer`, [`AmountIn::FullBalance`]
    /// out of the engine's custody.  Intermediate outputs are held by the
    /// engine and pay the next hop.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidAmount`] for a zero input or
    /// [`AmountIn::AlreadyFunded`], which callback settlement cannot
    /// honour; [`RouterError::TooLittleReceived`] if the final hop
    /// delivered less than `amount_out_minimum`; any pool, ledger or
    /// accounting failure.  Every error rolls the host back.
    #[instrument(skip(self, host, path), fields(hops = path.num_pools()))]
    pub fn swap_exact_input(
        &mut self,
        host: &mut ChainState,
        path: &Path,
        recipient: Address,
        amount_in: AmountIn,
        amount_out_minimum: U256,
        payer: Address,
    ) -> Result<TradeRecord> {
        let (token_in, token_out) = Self::endpoints(path)?;
        host.atomically(|host| {
            let balances = self.accountant.open(host, payer, token_in, token_out)?;
            let engine = self.config.engine_address;
            let (mut amount, mut leg_payer) = match amount_in {
                AmountIn::Exact(amount) => (amount, payer),
                AmountIn::FullBalance => (host.balance_of(token_in, engine)?, engine),
                AmountIn::AlreadyFunded => {
                    return Err(RouterError::InvalidAmount(
                        "callback settlement cannot trade a pre-funded input",
                    ));
                }
            };
            if amount.is_zero() {
                return Err(RouterError::InvalidAmount("zero input"));
            }

            let mut remaining = path.clone();
            let mut pools = Vec::with_capacity(path.num_pools());
            let mut steps = Vec::with_capacity(path.num_pools());
            loop {
                let has_more = remaining.has_multiple_pools();
                let to = if has_more { engine } else { recipient };
                let data = SwapCallbackData::new(remaining.first_pool(), leg_payer);
                let (pool, step) = self.request(host, signed(amount)?, to, &data)?;
                amount = step.amount_out;
                pools.push(pool);
                steps.push(step);
                if !has_more {
                    break;
                }
                leg_payer = engine;
                remaining = remaining.skip_token();
            }

            if amount < amount_out_minimum {
                return Err(RouterError::TooLittleReceived {
                    amount_out: amount,
                    minimum: amount_out_minimum,
                });
            }
            let amount_sold = steps.first().map(|s| s.amount_in).unwrap_or_default();
            let settlement = Settlement {
                trader: payer,
                trade_type: TradeType::ExactInput,
                token_sold: token_in,
                amount_sold,
                token_bought: token_out,
                amount_bought: amount,
                pools,
                steps,
                balances,
            };
            self.accountant
                .record(host, &self.config.tick_protocol.exchange_tag, settlement)
        })
    }

    /// Buys exactly `amount_out` of the last token of `path` for at most
    /// `amount_in_maximum` of the first, paid by `payer`.
    ///
    /// `path` is given in trade order; the engine reverses it and starts
    /// from the pool that delivers to `recipient`.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidAmount`] for a zero output,
    /// [`RouterError::TooMuchRequested`] if the first hop needs more than
    /// `amount_in_maximum`, [`RouterError::InvalidAmountOut`] if a pool
    /// delivered a different amount than requested, and any pool, ledger
    /// or accounting failure.  Every error rolls the host back; the
    /// exact-output slot is empty afterwards either way.
    #[instrument(skip(self, host, path), fields(hops = path.num_pools()))]
    pub fn swap_exact_output(
        &mut self,
        host: &mut ChainState,
        path: &Path,
        recipient: Address,
        amount_out: U256,
        amount_in_maximum: U256,
        payer: Address,
    ) -> Result<TradeRecord> {
        let (token_in, token_out) = Self::endpoints(path)?;
        if amount_out.is_zero() {
            return Err(RouterError::InvalidAmount("zero output"));
        }
        host.atomically(|host| {
            let balances = self.accountant.open(host, payer, token_in, token_out)?;
            let data = SwapCallbackData::new(path.reversed(), payer);
            let (result, state) = TransientSlot::scoped(
                self,
                exact_output_slot,
                ExactOutputState::new(amount_in_maximum),
                |router| router.exact_output_internal(host, amount_out, recipient, &data),
            );
            let amount_bought = result?;
            let state = state.ok_or(RouterError::InvalidSwap)?;
            let amount_in = state.amount_in_paid.ok_or(RouterError::InvalidSwap)?;
            if amount_in > amount_in_maximum {
                return Err(RouterError::TooMuchRequested {
                    amount_in,
                    maximum: amount_in_maximum,
                });
            }

            let settlement = Settlement {
                trader: payer,
                trade_type: TradeType::ExactOutput,
                token_sold: token_in,
                amount_sold: amount_in,
                token_bought: token_out,
                amount_bought,
                pools: state.pools,
                steps: state.steps,
                balances,
            };
            self.accountant
                .record(host, &self.config.tick_protocol.exchange_tag, settlement)
        })
    }

    /// Requests `amount_out` from the pool of the first hop of
    /// `data.path`, which is read output-first.
    fn exact_output_internal(
        &mut self,
        host: &mut ChainState,
        amount_out: U256,
        recipient: Address,
        data: &SwapCallbackData,
    ) -> Result<U256> {
        let (pool, step) = self.request(host, -signed(amount_out)?, recipient, data)?;
        if step.amount_out != amount_out {
            return Err(RouterError::InvalidAmountOut {
                received: step.amount_out,
                expected: amount_out,
            });
        }
        if let Some(state) = self.exact_output.get_mut() {
            state.pools.push(pool);
            state.steps.push(step);
        }
        Ok(step.amount_out)
    }

    /// Issues one swap request.  A positive `amount_specified` sells that
    /// much of the first hop's input; a negative one buys that much of the
    /// first hop's token, whose path is then read output-first.
    fn request(
        &mut self,
        host: &mut ChainState,
        amount_specified: I256,
        recipient: Address,
        data: &SwapCallbackData,
    ) -> Result<(Address, SwapStep)> {
        let hop = data.path.first_hop()?;
        let fee = hop_fee(&hop)?;
        let (token_in, token_out) = if amount_specified.is_positive() {
            (hop.token_in, hop.token_out)
        } else {
            (hop.token_out, hop.token_in)
        };
        let zero_for_one = token_in < token_out;
        let pool_address = self.pool_for(token_in, token_out, fee)?;
        let context = data.encode();
        let limit = default_price_limit(zero_for_one);

        let callback: &mut dyn SwapCallback = self;
        let (amount0, amount1) = host.lend_pool(pool_address, |pool, host| {
            pool.as_tick_mut(pool_address)?.swap(
                pool_address,
                host,
                callback,
                recipient,
                zero_for_one,
                amount_specified,
                limit,
                &context,
            )
        })?;

        let (delta_in, delta_out) = if zero_for_one {
            (amount0, amount1)
        } else {
            (amount1, amount0)
        };
        let amount_in = if delta_in.is_positive() {
            delta_in.into_raw()
        } else {
            U256::ZERO
        };
        let amount_out = if delta_out.is_negative() {
            delta_out.unsigned_abs()
        } else {
            U256::ZERO
        };
        debug!(
            pool = %pool_address,
            %token_in,
            %token_out,
            %amount_in,
            %amount_out,
            "tick hop executed"
        );
        let step = SwapStep::with_pool_fee(token_in, token_out, amount_in, amount_out, fee)?;
        Ok((pool_address, step))
    }
}

impl<F: PriceFeed> SwapCallback for CallbackRouter<F> {
    fn on_swap_settled(
        &mut self,
        host: &mut ChainState,
        caller: Address,
        amount0_delta: I256,
        amount1_delta: I256,
        data: &[u8],
    ) -> Result<()> {
        if !amount0_delta.is_positive() && !amount1_delta.is_positive() {
            return Err(RouterError::InvalidSwap);
        }
        let context = SwapCallbackData::decode(data)?;
        let hop = context.path.first_hop()?;
        let expected = self.pool_for(hop.token_in, hop.token_out, hop_fee(&hop)?)?;
        if caller != expected {
            return Err(RouterError::InvalidCaller { caller, expected });
        }

        let (is_exact_input, amount_to_pay) = if amount0_delta.is_positive() {
            (hop.token_in < hop.token_out, amount0_delta.into_raw())
        } else {
            (hop.token_out < hop.token_in, amount1_delta.into_raw())
        };
        let engine = self.config.engine_address;

        if is_exact_input {
            pay(host, engine, hop.token_in, context.payer, caller, amount_to_pay)?;
        } else if context.path.has_multiple_pools() {
            let next = SwapCallbackData::new(context.path.skip_token(), context.payer);
            self.exact_output_internal(host, amount_to_pay, caller, &next)?;
        } else {
            let state = self.exact_output.get_mut().ok_or(RouterError::InvalidSwap)?;
            if amount_to_pay > state.amount_in_maximum {
                return Err(RouterError::TooMuchRequested {
                    amount_in: amount_to_pay,
                    maximum: state.amount_in_maximum,
                });
            }
            state.amount_in_paid = Some(amount_to_pay);
            pay(host, engine, hop.token_out, context.payer, caller, amount_to_pay)?;
        }
        Ok(())
    }
}
