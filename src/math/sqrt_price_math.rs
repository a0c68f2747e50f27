//! Token deltas between square-root prices and the price reached after
//! adding or removing a token amount at constant liquidity.
//!
//! Rounding always favours the pool: amounts the pool receives round up,
//! amounts it releases round down, and next prices round toward the side
//! that releases less.

use alloy_primitives::U256;

use super::{div_rounding_up, mul_div, Q96};
use crate::domain::Rounding;
use crate::error::{Result, RouterError};

fn sorted(a: U256, b: U256) -> (U256, U256) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

fn liquidity_x96(liquidity: u128) -> U256 {
    U256::from(liquidity) << 96usize
}

/// Amount of token0 between two prices: `L·2^96·(√b − √a) / (√a·√b)`.
///
/// # Errors
///
/// Returns [`RouterError::DivisionByZero`] if the lower price is zero, or
/// [`RouterError::Overflow`] if the delta does not fit in 256 bits.
pub fn get_amount0_delta(
    sqrt_a: U256,
    sqrt_b: U256,
    liquidity: u128,
    rounding: Rounding,
) -> Result<U256> {
    let (lower, upper) = sorted(sqrt_a, sqrt_b);
    if lower.is_zero() {
        return Err(RouterError::DivisionByZero);
    }
    let numerator1 = liquidity_x96(liquidity);
    let numerator2 = upper - lower;
    match rounding {
        Rounding::Up => div_rounding_up(mul_div(numerator1, numerator2, upper, Rounding::Up)?, lower),
        Rounding::Down => Ok(mul_div(numerator1, numerator2, upper, Rounding::Down)? / lower),
    }
}

/// Amount of token1 between two prices: `L·(√b − √a) / 2^96`.
///
/// # Errors
///
/// Returns [`RouterError::Overflow`] if the delta does not fit.
pub fn get_amount1_delta(
    sqrt_a: U256,
    sqrt_b: U256,
    liquidity: u128,
    rounding: Rounding,
) -> Result<U256> {
    let (lower, upper) = sorted(sqrt_a, sqrt_b);
    mul_div(U256::from(liquidity), upper - lower, Q96, rounding)
}

/// Price after adding (or removing) `amount` of token0.  Rounds up so the
/// price never moves further than the amount allows.
///
/// # Errors
///
/// Returns [`RouterError::InsufficientLiquidity`] when removing more
/// token0 than the liquidity holds, or [`RouterError::Overflow`].
pub fn next_sqrt_price_from_amount0_rounding_up(
    sqrt_price: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256> {
    if amount.is_zero() {
        return Ok(sqrt_price);
    }
    let numerator1 = liquidity_x96(liquidity);
    let product = amount.checked_mul(sqrt_price);
    if add {
        if let Some(product) = product {
            if let Some(denominator) = numerator1.checked_add(product) {
                return mul_div(numerator1, sqrt_price, denominator, Rounding::Up);
            }
        }
        // L·2^96 / (L·2^96/√P + amount)
        let shifted = (numerator1 / sqrt_price)
            .checked_add(amount)
            .ok_or(RouterError::Overflow("amount0 price denominator"))?;
        div_rounding_up(numerator1, shifted)
    } else {
        let product = product.ok_or(RouterError::InsufficientLiquidity)?;
        if numerator1 <= product {
            return Err(RouterError::InsufficientLiquidity);
        }
        mul_div(numerator1, sqrt_price, numerator1 - product, Rounding::Up)
    }
}

/// Price after adding (or removing) `amount` of token1.  Rounds down.
///
/// # Errors
///
/// Returns [`RouterError::DivisionByZero`] on zero liquidity,
/// [`RouterError::InsufficientLiquidity`] when removing more token1 than
/// the price allows, or [`RouterError::Overflow`].
pub fn next_sqrt_price_from_amount1_rounding_down(
    sqrt_price: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256> {
    let l = U256::from(liquidity);
    if add {
        let quotient = mul_div(amount, Q96, l, Rounding::Down)?;
        sqrt_price
            .checked_add(quotient)
            .ok_or(RouterError::Overflow("amount1 price"))
    } else {
        let quotient = mul_div(amount, Q96, l, Rounding::Up)?;
        if sqrt_price <= quotient {
            return Err(RouterError::InsufficientLiquidity);
        }
        Ok(sqrt_price - quotient)
    }
}

/// Price after swapping `amount_in` into the pool.
///
/// # Errors
///
/// Returns [`RouterError::InsufficientLiquidity`] on zero price or
/// liquidity, plus the errors of the directional helpers.
pub fn next_sqrt_price_from_input(
    sqrt_price: U256,
    liquidity: u128,
    amount_in: U256,
    zero_for_one: bool,
) -> Result<U256> {
    if sqrt_price.is_zero() || liquidity == 0 {
        return Err(RouterError::InsufficientLiquidity);
    }
    if zero_for_one {
        next_sqrt_price_from_amount0_rounding_up(sqrt_price, liquidity, amount_in, true)
    } else {
        next_sqrt_price_from_amount1_rounding_down(sqrt_price, liquidity, amount_in, true)
    }
}

/// Price after taking `amount_out` out of the pool.
///
/// # Errors
///
/// Returns [`RouterError::InsufficientLiquidity`] on zero price or
/// liquidity, plus the errors of the directional helpers.
pub fn next_sqrt_price_from_output(
    sqrt_price: U256,
    liquidity: u128,
    amount_out: U256,
    zero_for_one: bool,
) -> Result<U256> {
    if sqrt_price.is_zero() || liquidity == 0 {
        return Err(RouterError::InsufficientLiquidity);
    }
    if zero_for_one {
        next_sqrt_price_from_amount1_rounding_down(sqrt_price, liquidity, amount_out, false)
    } else {
        next_sqrt_price_from_amount0_rounding_up(sqrt_price, liquidity, amount_out, false)
    }
}
