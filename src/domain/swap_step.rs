//! Per-hop outcome of an executed swap.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::{FeePolicy, FeeTier, PIPS_DENOMINATOR};
use crate::error::{Result, RouterError};
use crate::math::fee_free_amount_out;

/// What one hop consumed, produced and charged.
///
/// Created once per hop while the route executes and never mutated
/// afterwards.  Steps are collected in route order, so step *i*'s
/// `amount_out` is step *i + 1*'s `amount_in` whenever the intermediate
/// token moves without a transfer fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapStep {
    /// Token sold into the pool.
    pub token_in: Address,
    /// Token bought from the pool.
    pub token_out: Address,
    /// Input the pool received.
    pub amount_in: U256,
    /// Output the pool released.
    pub amount_out: U256,
    /// Fee charged, denominated in `token_in`.
    pub fee_in_token_in: U256,
    /// Fee charged, denominated in `token_out`.
    pub fee_in_token_out: U256,
}

impl SwapStep {
    /// Builds a step for a reserve-based hop charging the fixed 0.3% fee.
    ///
    /// `fee_in_token_out` is the gap between the fee-free constant-product
    /// output `amount_in·reserve_out / (reserve_in + amount_in)` and the
    /// charged output, computed from the reserves seen before the swap.
    ///
    /// # Errors
    ///
    /// [`RouterError::Overflow`] if the fee-free output is below
    /// `amount_out`, and the quoting errors of
    /// [`fee_free_amount_out`].
    pub fn with_reserves(
        token_in: Address,
        token_out: Address,
        amount_in: U256,
        amount_out: U256,
        reserve_in: U256,
        reserve_out: U256,
    ) -> Result<Self> {
        let fee_in_token_in = FeePolicy::RESERVE.fee_in_token_in(amount_in)?;
        let fee_in_token_out = fee_free_amount_out(amount_in, reserve_in, reserve_out)?
            .checked_sub(amount_out)
            .ok_or(RouterError::Overflow("fee-free output below charged output"))?;
        Ok(Self {
            token_in,
            token_out,
            amount_in,
            amount_out,
            fee_in_token_in,
            fee_in_token_out,
        })
    }

    /// Builds a step for a hop whose fee comes from the pool's tier.
    ///
    /// `fee_in_token_out` is back-solved from the output the pool would have
    /// produced without a fee: `amount_out × 10⁶ / (10⁶ − fee) − amount_out`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`] if an intermediate product
    /// overflows.
    pub fn with_pool_fee(
        token_in: Address,
        token_out: Address,
        amount_in: U256,
        amount_out: U256,
        fee: FeeTier,
    ) -> Result<Self> {
        let fee_in_token_in = FeePolicy::PoolReported(fee).fee_in_token_in(amount_in)?;
        let no_fee_out = amount_out
            .checked_mul(U256::from(PIPS_DENOMINATOR))
            .ok_or(RouterError::Overflow("no-fee output overflow"))?
            / U256::from(fee.complement());
        let fee_in_token_out = no_fee_out
            .checked_sub(amount_out)
            .ok_or(RouterError::Overflow("fee back-solve underflow"))?;
        Ok(Self {
            token_in,
            token_out,
            amount_in,
            amount_out,
            fee_in_token_in,
            fee_in_token_out,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tokens() -> (Address, Address) {
        (Address::repeat_byte(1), Address::repeat_byte(2))
    }

    #[test]
    fn pool_fee_decomposition() {
        let (a, b) = tokens();
        let Ok(step) = SwapStep::with_pool_fee(
            a,
            b,
            U256::from(1_000_000u64),
            U256::from(997_000u64),
            FeeTier::MEDIUM,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(step.fee_in_token_in, U256::from(3_000u64));
        // 997_000 * 1e6 / 997_000 = 1_000_000
        assert_eq!(step.fee_in_token_out, U256::from(3_000u64));
    }

    #[test]
    fn reserve_fee_decomposition() {
        let (a, b) = tokens();
        let reserve = U256::from(10_000u64);
        let Ok(step) = SwapStep::with_reserves(
            a,
            b,
            U256::from(1_000u64),
            U256::from(906u64),
            reserve,
            reserve,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(step.fee_in_token_in, U256::from(3u64));
        // fee-free output: 1_000 * 10_000 / 11_000 = 909
        assert_eq!(step.fee_in_token_out, U256::from(3u64));
    }

    #[test]
    fn zero_fee_tier_charges_nothing() {
        let (a, b) = tokens();
        let Ok(zero) = FeeTier::new(0) else {
            panic!("valid tier");
        };
        let Ok(step) = SwapStep::with_pool_fee(a, b, U256::from(50u64), U256::from(49u64), zero)
        else {
            panic!("expected Ok");
        };
        assert_eq!(step.fee_in_token_in, U256::ZERO);
        assert_eq!(step.fee_in_token_out, U256::ZERO);
    }

    #[test]
    fn overflow_reported() {
        let (a, b) = tokens();
        let result = SwapStep::with_pool_fee(a, b, U256::from(1u64), U256::MAX, FeeTier::MEDIUM);
        assert!(matches!(result, Err(RouterError::Overflow(_))));
    }
}
