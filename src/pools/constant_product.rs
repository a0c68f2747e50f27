//! Constant-product pair (reserve protocol).
//!
//! The pair is funded before it is asked to swap.  On `swap` it:
//!
//! 1. transfers the requested output optimistically,
//! 2. derives each input as `balance − (reserve − amount_out)`,
//! 3. enforces `(b0·1000 − in0·3)·(b1·1000 − in1·3) ≥ r0·r1·1000²`,
//! 4. syncs its reserves to its balances.
//!
//! Inputs are never passed in, so tokens that charge a transfer fee are
//! priced by what actually arrived.

use alloy_primitives::{Address, U256};
use tracing::debug;

use crate::config::ReserveConfig;
use crate::domain::{FeePolicy, FeeTier, PoolKind, TokenPair};
use crate::error::{Result, RouterError};
use crate::traits::{FromConfig, PoolState, ReservePool, TokenLedger};

/// A reserve-based pool over one token pair.
///
/// Created from a [`ReserveConfig`] via [`FromConfig`].  The stored
/// reserves must match the pool's ledger balances at deployment; the
/// factory takes care of that.
///
/// # Example
///
/// ```rust
/// use alloy_primitives::{Address, U256};
/// use hydra_router::config::ReserveConfig;
/// use hydra_router::pools::ConstantProductPair;
/// use hydra_router::traits::{FromConfig, ReservePool};
///
/// let a = Address::repeat_byte(0x11);
/// let b = Address::repeat_byte(0x22);
/// let cfg = ReserveConfig::new(a, b, U256::from(1000), U256::from(2000)).expect("valid config");
/// let pair = ConstantProductPair::from_config(&cfg).expect("pool created");
/// assert_eq!(pair.reserves(), (U256::from(1000), U256::from(2000)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantProductPair {
    token_pair: TokenPair,
    reserve0: U256,
    reserve1: U256,
}

impl ConstantProductPair {
    fn fee_factors() -> (U256, U256) {
        let (keep, scale) = FeePolicy::RESERVE.retained_share();
        (U256::from(scale - keep), U256::from(scale))
    }

    fn adjusted_balance(balance: U256, amount_in: U256) -> Result<U256> {
        let (fee, scale) = Self::fee_factors();
        let scaled = balance
            .checked_mul(scale)
            .ok_or(RouterError::Overflow("scaled balance"))?;
        let charged = amount_in
            .checked_mul(fee)
            .ok_or(RouterError::Overflow("input fee"))?;
        scaled
            .checked_sub(charged)
            .ok_or(RouterError::Overflow("adjusted balance underflow"))
    }

    fn input_amount(balance: U256, reserve: U256, amount_out: U256) -> U256 {
        let remaining = reserve - amount_out;
        balance.saturating_sub(remaining)
    }
}

impl FromConfig<ReserveConfig> for ConstantProductPair {
    fn from_config(config: &ReserveConfig) -> Result<Self> {
        config.validate()?;
        let token_pair = config.token_pair()?;
        let (reserve0, reserve1) = config.sorted_reserves()?;
        Ok(Self {
            token_pair,
            reserve0,
            reserve1,
        })
    }
}

impl PoolState for ConstantProductPair {
    fn token_pair(&self) -> TokenPair {
        self.token_pair
    }

    fn fee_tier(&self) -> FeeTier {
        FeePolicy::RESERVE.fee_tier()
    }

    fn tick_spacing(&self) -> u32 {
        0
    }

    fn kind(&self) -> PoolKind {
        PoolKind::Reserve
    }
}

impl ReservePool for ConstantProductPair {
    fn reserves(&self) -> (U256, U256) {
        (self.reserve0, self.reserve1)
    }

    fn swap(
        &mut self,
        self_address: Address,
        ledger: &mut dyn TokenLedger,
        amount0_out: U256,
        amount1_out: U256,
        to: Address,
    ) -> Result<()> {
        if amount0_out.is_zero() && amount1_out.is_zero() {
            return Err(RouterError::InsufficientOutputAmount);
        }
        if amount0_out >= self.reserve0 || amount1_out >= self.reserve1 {
            return Err(RouterError::InsufficientLiquidity);
        }
        let token0 = self.token_pair.token0();
        let token1 = self.token_pair.token1();
        if to == token0 || to == token1 {
            return Err(RouterError::InvalidPath("recipient is a pool token"));
        }

        if !amount0_out.is_zero() {
            ledger.transfer(token0, self_address, to, amount0_out)?;
        }
        if !amount1_out.is_zero() {
            ledger.transfer(token1, self_address, to, amount1_out)?;
        }
        let balance0 = ledger.balance_of(token0, self_address)?;
        let balance1 = ledger.balance_of(token1, self_address)?;

        let amount0_in = Self::input_amount(balance0, self.reserve0, amount0_out);
        let amount1_in = Self::input_amount(balance1, self.reserve1, amount1_out);
        if amount0_in.is_zero() && amount1_in.is_zero() {
            return Err(RouterError::InsufficientInputAmount);
        }

        let adjusted0 = Self::adjusted_balance(balance0, amount0_in)?;
        let adjusted1 = Self::adjusted_balance(balance1, amount1_in)?;
        let (_, scale) = Self::fee_factors();
        let k_after = adjusted0
            .checked_mul(adjusted1)
            .ok_or(RouterError::Overflow("k after swap"))?;
        let k_before = self
            .reserve0
            .checked_mul(self.reserve1)
            .and_then(|k| k.checked_mul(scale * scale))
            .ok_or(RouterError::Overflow("k before swap"))?;
        if k_after < k_before {
            return Err(RouterError::KInvariant);
        }

        self.reserve0 = balance0;
        self.reserve1 = balance1;
        debug!(
            pool = %self_address,
            %amount0_in,
            %amount1_in,
            %amount0_out,
            %amount1_out,
            "reserve pool swap"
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::chain::InMemoryLedger;
    use crate::domain::TokenDescriptor;
    use crate::math::get_amount_out;

    const A: Address = Address::repeat_byte(0x11);
    const B: Address = Address::repeat_byte(0x22);
    const POOL: Address = Address::repeat_byte(0xee);
    const TRADER: Address = Address::repeat_byte(0xa1);

    fn setup() -> (ConstantProductPair, InMemoryLedger) {
        let mut ledger = InMemoryLedger::new();
        ledger.register_token(TokenDescriptor::new("A", "Token A", A, 18));
        ledger.register_token(TokenDescriptor::new("B", "Token B", B, 18));
        ledger.mint(A, POOL, U256::from(1_000u64));
        ledger.mint(B, POOL, U256::from(1_000u64));
        ledger.mint(A, TRADER, U256::from(1_000u64));
        let Ok(cfg) = ReserveConfig::new(A, B, U256::from(1_000u64), U256::from(1_000u64)) else {
            panic!("valid config");
        };
        let Ok(pair) = ConstantProductPair::from_config(&cfg) else {
            panic!("valid pair");
        };
        (pair, ledger)
    }

    #[test]
    fn quoted_output_passes_invariant() {
        let (mut pair, mut ledger) = setup();
        let Ok(_) = ledger.transfer(A, TRADER, POOL, U256::from(100u64)) else {
            panic!("funded");
        };
        let Ok(out) = get_amount_out(U256::from(100u64), U256::from(1_000u64), U256::from(1_000u64))
        else {
            panic!("quoted");
        };
        assert!(pair.swap(POOL, &mut ledger, U256::ZERO, out, TRADER).is_ok());
        assert_eq!(pair.reserves(), (U256::from(1_100u64), U256::from(910u64)));
        assert_eq!(ledger.balance_of(B, TRADER), Ok(U256::from(90u64)));
    }

    #[test]
    fn excess_output_violates_invariant() {
        let (mut pair, mut ledger) = setup();
        let Ok(_) = ledger.transfer(A, TRADER, POOL, U256::from(100u64)) else {
            panic!("funded");
        };
        assert_eq!(
            pair.swap(POOL, &mut ledger, U256::ZERO, U256::from(91u64), TRADER),
            Err(RouterError::KInvariant)
        );
    }

    #[test]
    fn unfunded_swap_rejected() {
        let (mut pair, mut ledger) = setup();
        assert_eq!(
            pair.swap(POOL, &mut ledger, U256::ZERO, U256::from(10u64), TRADER),
            Err(RouterError::InsufficientInputAmount)
        );
    }

    #[test]
    fn zero_output_rejected() {
        let (mut pair, mut ledger) = setup();
        assert_eq!(
            pair.swap(POOL, &mut ledger, U256::ZERO, U256::ZERO, TRADER),
            Err(RouterError::InsufficientOutputAmount)
        );
    }

    #[test]
    fn draining_reserve_rejected() {
        let (mut pair, mut ledger) = setup();
        assert_eq!(
            pair.swap(POOL, &mut ledger, U256::from(1_000u64), U256::ZERO, TRADER),
            Err(RouterError::InsufficientLiquidity)
        );
    }

    #[test]
    fn reports_static_state() {
        let (pair, _) = setup();
        assert_eq!(pair.fee_tier(), FeeTier::MEDIUM);
        assert_eq!(pair.tick_spacing(), 0);
        assert_eq!(pair.kind(), PoolKind::Reserve);
        assert_eq!(pair.token_pair().token0(), A);
    }
}
