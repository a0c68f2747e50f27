//! Pool-side abstractions the engines drive.
//!
//! Two pool protocols are supported:
//!
//! 1. **Reserve-based** ([`ReservePool`]): the pool is funded first, then
//!    told how much to send out.  It derives its input from the balance
//!    increase over its stored reserves and enforces its invariant.
//! 2. **Tick-based** ([`TickPool`]): the pool computes signed deltas,
//!    sends its output, then calls back into the caller through
//!    [`SwapCallback`] and checks that it was paid before returning.
//!
//! Both expose their static parameters through [`PoolState`].

use alloy_primitives::{Address, I256, U256};

use super::TokenLedger;
use crate::chain::ChainState;
use crate::domain::{FeeTier, PoolKind, TokenPair};
use crate::error::Result;

/// Static description shared by all pools.
pub trait PoolState {
    /// The sorted token pair.
    fn token_pair(&self) -> TokenPair;

    /// Fee tier in pips.
    fn fee_tier(&self) -> FeeTier;

    /// Tick spacing; `0` for pools without ticks.
    fn tick_spacing(&self) -> u32;

    /// Protocol the pool speaks.
    fn kind(&self) -> PoolKind;
}

/// A constant-product pool settled by pre-funding.
pub trait ReservePool: PoolState {
    /// Stored reserves of token0 and token1.
    fn reserves(&self) -> (U256, U256);

    /// Sends `amount0_out`/`amount1_out` to `to`, infers the input from the
    /// pool's balances and enforces the invariant.
    ///
    /// # Errors
    ///
    /// [`RouterError::InsufficientOutputAmount`],
    /// [`RouterError::InsufficientLiquidity`],
    /// [`RouterError::InsufficientInputAmount`] or
    /// [`RouterError::KInvariant`].
    ///
    /// [`RouterError::InsufficientOutputAmount`]: crate::error::RouterError::InsufficientOutputAmount
    /// [`RouterError::InsufficientLiquidity`]: crate::error::RouterError::InsufficientLiquidity
    /// [`RouterError::InsufficientInputAmount`]: crate::error::RouterError::InsufficientInputAmount
    /// [`RouterError::KInvariant`]: crate::error::RouterError::KInvariant
    fn swap(
        &mut self,
        self_address: Address,
        ledger: &mut dyn TokenLedger,
        amount0_out: U256,
        amount1_out: U256,
        to: Address,
    ) -> Result<()>;
}

/// Receiver of a tick-based pool's settlement callback.
pub trait SwapCallback {
    /// Called by the pool at `caller` after it sent its output.  Positive
    /// deltas are owed to the pool; `data` is the context the swap was
    /// issued with.
    ///
    /// # Errors
    ///
    /// Any error aborts the pool's swap.
    fn on_swap_settled(
        &mut self,
        host: &mut ChainState,
        caller: Address,
        amount0_delta: I256,
        amount1_delta: I256,
        data: &[u8],
    ) -> Result<()>;
}

/// A tick-based pool settled through a callback.
pub trait TickPool: PoolState {
    /// Current Q64.96 square-root price.
    fn sqrt_price_x96(&self) -> U256;

    /// Active liquidity.
    fn liquidity(&self) -> u128;

    /// Swaps against the pool.
    ///
    /// A positive `amount_specified` is an exact input, a negative one an
    /// exact output.  Returns the signed token0/token1 deltas from the
    /// pool's perspective.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPriceLimit`], errors raised by the callback,
    /// and [`RouterError::InsufficientInputAmount`] when the callback did
    /// not pay.
    ///
    /// [`RouterError::InvalidPriceLimit`]: crate::error::RouterError::InvalidPriceLimit
    /// [`RouterError::InsufficientInputAmount`]: crate::error::RouterError::InsufficientInputAmount
    #[allow(clippy::too_many_arguments)]
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
    ) -> Result<(I256, I256)>;
}
