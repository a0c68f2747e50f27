//! A single constant-liquidity swap step of a tick-based pool.

use alloy_primitives::{I256, U256};

use super::{
    get_amount0_delta, get_amount1_delta, mul_div, next_sqrt_price_from_input,
    next_sqrt_price_from_output,
};
use crate::domain::{FeeTier, Rounding, PIPS_DENOMINATOR};
use crate::error::{Result, RouterError};

/// Outcome of [`compute_swap_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapStepOutcome {
    /// Price after the step.
    pub sqrt_price_next: U256,
    /// Input consumed, excluding the fee.
    pub amount_in: U256,
    /// Output released.
    pub amount_out: U256,
    /// Fee taken on top of `amount_in`.
    pub fee_amount: U256,
}

/// Swaps within one liquidity range from `sqrt_current` toward
/// `sqrt_target`.
///
/// A non-negative `amount_remaining` is an exact input (fee included); a
/// negative one is an exact output.  The step stops at the target price if
/// the amount is large enough to reach it.
///
/// # Errors
///
/// Propagates the math errors of the price helpers.
pub fn compute_swap_step(
    sqrt_current: U256,
    sqrt_target: U256,
    liquidity: u128,
    amount_remaining: I256,
    fee: FeeTier,
) -> Result<SwapStepOutcome> {
    let zero_for_one = sqrt_current >= sqrt_target;
    let exact_in = !amount_remaining.is_negative();
    let remaining = amount_remaining.unsigned_abs();
    let fee_pips = U256::from(fee.pips());
    let pips = U256::from(PIPS_DENOMINATOR);

    let delta_in = |from: U256, to: U256| -> Result<U256> {
        if zero_for_one {
            get_amount0_delta(to, from, liquidity, Rounding::Up)
        } else {
            get_amount1_delta(from, to, liquidity, Rounding::Up)
        }
    };
    let delta_out = |from: U256, to: U256| -> Result<U256> {
        if zero_for_one {
            get_amount1_delta(to, from, liquidity, Rounding::Down)
        } else {
            get_amount0_delta(from, to, liquidity, Rounding::Down)
        }
    };

    let mut amount_in = U256::ZERO;
    let mut amount_out = U256::ZERO;
    let sqrt_price_next = if exact_in {
        let remaining_less_fee =
            mul_div(remaining, U256::from(fee.complement()), pips, Rounding::Down)?;
        amount_in = delta_in(sqrt_current, sqrt_target)?;
        if remaining_less_fee >= amount_in {
            sqrt_target
        } else {
            next_sqrt_price_from_input(sqrt_current, liquidity, remaining_less_fee, zero_for_one)?
        }
    } else {
        amount_out = delta_out(sqrt_current, sqrt_target)?;
        if remaining >= amount_out {
            sqrt_target
        } else {
            next_sqrt_price_from_output(sqrt_current, liquidity, remaining, zero_for_one)?
        }
    };

    let reached_target = sqrt_price_next == sqrt_target;
    if !(reached_target && exact_in) {
        amount_in = delta_in(sqrt_current, sqrt_price_next)?;
    }
    if !(reached_target && !exact_in) {
        amount_out = delta_out(sqrt_current, sqrt_price_next)?;
    }
    if !exact_in && amount_out > remaining {
        amount_out = remaining;
    }

    let fee_amount = if exact_in && !reached_target {
        remaining
            .checked_sub(amount_in)
            .ok_or(RouterError::Overflow("fee remainder underflow"))?
    } else {
        mul_div(amount_in, fee_pips, U256::from(fee.complement()), Rounding::Up)?
    };

    Ok(SwapStepOutcome {
        sqrt_price_next,
        amount_in,
        amount_out,
        fee_amount,
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::math::{default_price_limit, Q96};

    fn step(liquidity: u128, amount: i64, zero_for_one: bool) -> SwapStepOutcome {
        let Ok(outcome) = compute_swap_step(
            Q96,
            default_price_limit(zero_for_one),
            liquidity,
            I256::try_from(amount).unwrap_or_default(),
            FeeTier::MEDIUM,
        ) else {
            panic!("expected Ok");
        };
        outcome
    }

    #[test]
    fn exact_input_consumes_everything() {
        let outcome = step(1_000, 100, true);
        assert_eq!(outcome.amount_in + outcome.fee_amount, U256::from(100u64));
        assert_eq!(outcome.amount_out, U256::from(90u64));
        assert!(outcome.sqrt_price_next < Q96);
    }

    #[test]
    fn exact_input_one_for_zero() {
        let outcome = step(2_000, 100, false);
        assert_eq!(outcome.amount_in + outcome.fee_amount, U256::from(100u64));
        assert_eq!(outcome.amount_out, U256::from(94u64));
        assert!(outcome.sqrt_price_next > Q96);
    }

    #[test]
    fn exact_output_costs_more_than_output() {
        let outcome = step(1_000, -50, true);
        assert_eq!(outcome.amount_out, U256::from(50u64));
        assert_eq!(outcome.amount_in + outcome.fee_amount, U256::from(54u64));
    }

    #[test]
    fn zero_liquidity_jumps_to_target() {
        let outcome = step(0, 100, true);
        assert_eq!(outcome.sqrt_price_next, default_price_limit(true));
        assert_eq!(outcome.amount_in, U256::ZERO);
        assert_eq!(outcome.amount_out, U256::ZERO);
        assert_eq!(outcome.fee_amount, U256::ZERO);
    }
}
