//! Constant-product (`x · y = k`) quoting with a fixed 0.3% input fee.
//!
//! These are the formulas reserve-based pools use to price a swap and the
//! formulas the reserve engine uses to pre-compute exact-output routes.

use alloy_primitives::U256;

use crate::domain::{FeePolicy, Rounding};
use crate::error::{Result, RouterError};

use super::mul_div;

fn retained() -> (U256, U256) {
    let (keep, denominator) = FeePolicy::RESERVE.retained_share();
    (U256::from(keep), U256::from(denominator))
}

fn checked_mul(a: U256, b: U256, context: &'static str) -> Result<U256> {
    a.checked_mul(b).ok_or(RouterError::Overflow(context))
}

/// Output a pool releases for `amount_in` given its reserves, after the fee:
/// `amount_in·997·reserve_out / (reserve_in·1000 + amount_in·997)`.
///
/// # Errors
///
/// - [`RouterError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`RouterError::InsufficientLiquidity`] if either reserve is zero.
/// - [`RouterError::Overflow`] on arithmetic overflow.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use hydra_router::math::get_amount_out;
///
/// let out = get_amount_out(U256::from(100), U256::from(1000), U256::from(1000));
/// assert_eq!(out, Ok(U256::from(90)));
/// ```
pub fn get_amount_out(amount_in: U256, reserve_in: U256, reserve_out: U256) -> Result<U256> {
    if amount_in.is_zero() {
        return Err(RouterError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(RouterError::InsufficientLiquidity);
    }
    let (keep, denominator) = retained();
    let amount_in_with_fee = checked_mul(amount_in, keep, "amount in with fee")?;
    let numerator = checked_mul(amount_in_with_fee, reserve_out, "amount out numerator")?;
    let denominator = checked_mul(reserve_in, denominator, "amount out denominator")?
        .checked_add(amount_in_with_fee)
        .ok_or(RouterError::Overflow("amount out denominator"))?;
    Ok(numerator / denominator)
}

/// Input required for a pool to release `amount_out`, rounded up:
/// `reserve_in·amount_out·1000 / ((reserve_out − amount_out)·997) + 1`.
///
/// # Errors
///
/// - [`RouterError::InsufficientOutputAmount`] if `amount_out` is zero.
/// - [`RouterError::InsufficientLiquidity`] if a reserve is zero or
///   `amount_out` drains the whole output reserve.
/// - [`RouterError::Overflow`] on arithmetic overflow.
pub fn get_amount_in(amount_out: U256, reserve_in: U256, reserve_out: U256) -> Result<U256> {
    if amount_out.is_zero() {
        return Err(RouterError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(RouterError::InsufficientLiquidity);
    }
    let (keep, denominator) = retained();
    let numerator = checked_mul(
        checked_mul(reserve_in, amount_out, "amount in numerator")?,
        denominator,
        "amount in numerator",
    )?;
    let divisor = checked_mul(reserve_out - amount_out, keep, "amount in denominator")?;
    (numerator / divisor)
        .checked_add(U256::from(1u64))
        .ok_or(RouterError::Overflow("amount in rounding"))
}

/// Output the same pool would release for `amount_in` with no fee at all:
/// `amount_in·reserve_out / (reserve_in + amount_in)`.
///
/// Used to express a reserve hop's fee in the output token.
///
/// # Errors
///
/// Returns [`RouterError::InsufficientLiquidity`] if both the reserve and
/// the input are zero, or [`RouterError::Overflow`] on overflow.
pub fn fee_free_amount_out(amount_in: U256, reserve_in: U256, reserve_out: U256) -> Result<U256> {
    let denominator = reserve_in
        .checked_add(amount_in)
        .ok_or(RouterError::Overflow("fee-free denominator"))?;
    if denominator.is_zero() {
        return Err(RouterError::InsufficientLiquidity);
    }
    mul_div(amount_in, reserve_out, denominator, Rounding::Down)
}
