//! Concentrated-liquidity pool (tick protocol) with one active range.
//!
//! # Swap Algorithm
//!
//! 1. Validate the price limit against the current price.
//! 2. Run one [`compute_swap_step`] from the current price toward the
//!    limit with the pool's liquidity and fee.
//! 3. Move the price and send the output to the recipient.
//! 4. Call back into the caller with the signed deltas.
//! 5. Require that the input-token balance grew by at least the amount
//!    owed.
//!
//! Positive deltas are owed to the pool, negative deltas were paid out.

use alloy_primitives::{Address, I256, U256};
use tracing::debug;

use crate::chain::ChainState;
use crate::config::TickConfig;
use crate::domain::{FeeTier, PoolKind, Rounding, TokenPair};
use crate::error::{Result, RouterError};
use crate::math::{check_price_limit, compute_swap_step, mul_div, Q96};
use crate::traits::{FromConfig, PoolState, SwapCallback, TickPool, TokenLedger};

fn signed(amount: U256) -> Result<I256> {
    I256::try_from(amount).map_err(|_| RouterError::Overflow("delta exceeds int256"))
}

/// A tick-based pool quoting one liquidity range across the whole price
/// curve.
///
/// # State
///
/// - `sqrt_price_x96`: current price as `sqrt(token1/token0) · 2^96`
/// - `liquidity`: active liquidity `L`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcentratedPool {
    token_pair: TokenPair,
    fee: FeeTier,
    tick_spacing: u32,
    sqrt_price_x96: U256,
    liquidity: u128,
}

impl ConcentratedPool {
    /// Token amounts the active liquidity represents at the current price:
    /// `x = L·2^96/√P` and `y = L·√P/2^96`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`] if an amount does not fit.
    pub fn virtual_reserves(&self) -> Result<(U256, U256)> {
        let l = U256::from(self.liquidity);
        let amount0 = mul_div(l, Q96, self.sqrt_price_x96, Rounding::Down)?;
        let amount1 = mul_div(l, self.sqrt_price_x96, Q96, Rounding::Down)?;
        Ok((amount0, amount1))
    }
}

impl FromConfig<TickConfig> for ConcentratedPool {
    fn from_config(config: &TickConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            token_pair: config.token_pair()?,
            fee: config.fee(),
            tick_spacing: config.tick_spacing(),
            sqrt_price_x96: config.sqrt_price_x96(),
            liquidity: config.liquidity(),
        })
    }
}

impl PoolState for ConcentratedPool {
    fn token_pair(&self) -> TokenPair {
        self.token_pair
    }

    fn fee_tier(&self) -> FeeTier {
        self.fee
    }

    fn tick_spacing(&self) -> u32 {
        self.tick_spacing
    }

    fn kind(&self) -> PoolKind {
        PoolKind::Tick
    }
}

impl TickPool for ConcentratedPool {
    fn sqrt_price_x96(&self) -> U256 {
        self.sqrt_price_x96
    }

    fn liquidity(&self) -> u128 {
        self.liquidity
    }

    fn swap(
        &mut self,
        self_address: Address,
        host: &mut ChainState,
        callback: &mut dyn SwapCallback,
        recipient: Address,
        zero_for_one: bool,
        amount_specified: I256,
        sqrt_price_limit_x96: U256,
        data: &[u8],
    ) -> Result<(I256, I256)> {
        if amount_specified.is_zero() {
            return Err(RouterError::InvalidAmount("amount specified is zero"));
        }
        check_price_limit(self.sqrt_price_x96, sqrt_price_limit_x96, zero_for_one)?;

        let step = compute_swap_step(
            self.sqrt_price_x96,
            sqrt_price_limit_x96,
            self.liquidity,
            amount_specified,
            self.fee,
        )?;
        let owed = step
            .amount_in
            .checked_add(step.fee_amount)
            .ok_or(RouterError::Overflow("amount owed"))?;
        let owed_signed = signed(owed)?;
        let paid_out = -signed(step.amount_out)?;
        let (amount0, amount1) = if zero_for_one {
            (owed_signed, paid_out)
        } else {
            (paid_out, owed_signed)
        };
        self.sqrt_price_x96 = step.sqrt_price_next;

        let (token_in, token_out) = if zero_for_one {
            (self.token_pair.token0(), self.token_pair.token1())
        } else {
            (self.token_pair.token1(), self.token_pair.token0())
        };
        if !step.amount_out.is_zero() {
            host.transfer(token_out, self_address, recipient, step.amount_out)?;
        }

        let balance_before = host.balance_of(token_in, self_address)?;
        callback.on_swap_settled(host, self_address, amount0, amount1, data)?;
        let balance_after = host.balance_of(token_in, self_address)?;
        let required = balance_before
            .checked_add(owed)
            .ok_or(RouterError::Overflow("required balance"))?;
        if balance_after < required {
            return Err(RouterError::InsufficientInputAmount);
        }

        debug!(
            pool = %self_address,
            %amount0,
            %amount1,
            sqrt_price_x96 = %self.sqrt_price_x96,
            "tick pool swap"
        );
        Ok((amount0, amount1))
    }
}
