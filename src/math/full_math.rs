//! 512-bit intermediate multiply-divide for 256-bit operands.
//!
//! `a × b` can exceed 256 bits even when `a × b / d` fits, so the product
//! is widened to [`U512`] before dividing and the quotient is narrowed
//! back, failing only when the final result does not fit.

use alloy_primitives::aliases::U512;
use alloy_primitives::U256;

use crate::domain::Rounding;
use crate::error::{Result, RouterError};

fn widen(value: U256) -> U512 {
    let l = value.as_limbs();
    U512::from_limbs([l[0], l[1], l[2], l[3], 0, 0, 0, 0])
}

fn narrow(value: U512) -> Result<U256> {
    let l = value.as_limbs();
    if l[4..].iter().any(|limb| *limb != 0) {
        return Err(RouterError::Overflow("mul_div result exceeds 256 bits"));
    }
    Ok(U256::from_limbs([l[0], l[1], l[2], l[3]]))
}

/// Computes `a × b / denominator` with full 512-bit precision.
///
/// # Errors
///
/// - [`RouterError::DivisionByZero`] if `denominator` is zero.
/// - [`RouterError::Overflow`] if the result does not fit in 256 bits.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use hydra_router::domain::Rounding;
/// use hydra_router::math::mul_div;
///
/// let r = mul_div(U256::MAX, U256::from(2), U256::from(4), Rounding::Down);
/// assert_eq!(r, Ok(U256::MAX >> 1));
/// ```
pub fn mul_div(a: U256, b: U256, denominator: U256, rounding: Rounding) -> Result<U256> {
    if denominator.is_zero() {
        return Err(RouterError::DivisionByZero);
    }
    let product = widen(a) * widen(b);
    let d = widen(denominator);
    let quotient = product / d;
    let remainder = product % d;
    let result = narrow(quotient)?;
    if rounding.is_up() && !remainder.is_zero() {
        return result
            .checked_add(U256::from(1u64))
            .ok_or(RouterError::Overflow("mul_div rounding up"));
    }
    Ok(result)
}

/// `ceil(a / b)`.
///
/// # Errors
///
/// Returns [`RouterError::DivisionByZero`] if `b` is zero.
pub fn div_rounding_up(a: U256, b: U256) -> Result<U256> {
    if b.is_zero() {
        return Err(RouterError::DivisionByZero);
    }
    let q = a / b;
    if (a % b).is_zero() {
        Ok(q)
    } else {
        // q < MAX whenever b > 1, and b == 1 never leaves a remainder.
        Ok(q + U256::from(1u64))
    }
}
