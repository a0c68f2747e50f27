//! Bounds of the Q64.96 square-root price of tick-based pools.
//!
//! The price of a tick-based pool is stored as `sqrt(price) · 2^96`.  Valid
//! prices lie in `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`, the values at ticks
//! `-887272` and `887272`.

use alloy_primitives::U256;

use crate::error::{Result, RouterError};

/// `2^96`, the fixed-point scale of square-root prices.
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);

/// Square-root price at the minimum tick.
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4_295_128_739, 0, 0, 0]);

/// Square-root price at the maximum tick.
pub const MAX_SQRT_RATIO: U256 = U256::from_limbs([
    6_743_328_256_752_651_558,
    17_280_870_778_742_802_505,
    4_294_805_859,
    0,
]);

/// Loosest price limit a zero-for-one swap may pass: `MIN_SQRT_RATIO + 1`.
pub const MIN_SQRT_RATIO_PLUS_ONE: U256 = U256::from_limbs([4_295_128_740, 0, 0, 0]);

/// Loosest price limit a one-for-zero swap may pass: `MAX_SQRT_RATIO - 1`.
pub const MAX_SQRT_RATIO_MINUS_ONE: U256 = U256::from_limbs([
    6_743_328_256_752_651_557,
    17_280_870_778_742_802_505,
    4_294_805_859,
    0,
]);

/// The price limit the engines pass when the caller sets none: the
/// loosest bound in the swap's direction.
#[must_use]
pub const fn default_price_limit(zero_for_one: bool) -> U256 {
    if zero_for_one {
        MIN_SQRT_RATIO_PLUS_ONE
    } else {
        MAX_SQRT_RATIO_MINUS_ONE
    }
}

/// Checks that `sqrt_price_x96` is a representable pool price.
///
/// # Errors
///
/// Returns [`RouterError::InvalidConfiguration`] if the price is outside
/// `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`.
pub fn check_sqrt_price(sqrt_price_x96: U256) -> Result<()> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(RouterError::InvalidConfiguration(
            "sqrt price outside the tick range",
        ));
    }
    Ok(())
}

/// Checks a swap's price limit against the current price.
///
/// A zero-for-one swap moves the price down, so its limit must sit strictly
/// below the current price and strictly above `MIN_SQRT_RATIO`; the reverse
/// holds for one-for-zero swaps.
///
/// # Errors
///
/// Returns [`RouterError::InvalidPriceLimit`] if the limit is on the wrong
/// side of the current price or outside the valid range.
pub fn check_price_limit(current: U256, limit: U256, zero_for_one: bool) -> Result<()> {
    let valid = if zero_for_one {
        limit < current && limit > MIN_SQRT_RATIO
    } else {
        limit > current && limit < MAX_SQRT_RATIO
    };
    if valid {
        Ok(())
    } else {
        Err(RouterError::InvalidPriceLimit)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn q96_is_two_pow_96() {
        assert_eq!(Q96, U256::from(1u64) << 96usize);
    }

    #[test]
    fn max_ratio_matches_decimal() {
        let Ok(expected) =
            "1461446703485210103287273052203988822378723970342".parse::<U256>()
        else {
            panic!("literal parses");
        };
        assert_eq!(MAX_SQRT_RATIO, expected);
        assert_eq!(MAX_SQRT_RATIO_MINUS_ONE + U256::from(1u64), MAX_SQRT_RATIO);
        assert_eq!(MIN_SQRT_RATIO_PLUS_ONE - U256::from(1u64), MIN_SQRT_RATIO);
    }

    #[test]
    fn default_limits_pass_validation() {
        assert!(check_price_limit(Q96, default_price_limit(true), true).is_ok());
        assert!(check_price_limit(Q96, default_price_limit(false), false).is_ok());
    }

    #[test]
    fn limit_on_wrong_side_rejected() {
        assert_eq!(
            check_price_limit(Q96, Q96 + U256::from(1u64), true),
            Err(RouterError::InvalidPriceLimit)
        );
        assert_eq!(
            check_price_limit(Q96, MIN_SQRT_RATIO, true),
            Err(RouterError::InvalidPriceLimit)
        );
        assert_eq!(
            check_price_limit(Q96, MAX_SQRT_RATIO, false),
            Err(RouterError::InvalidPriceLimit)
        );
    }

    #[test]
    fn sqrt_price_range() {
        assert!(check_sqrt_price(Q96).is_ok());
        assert!(check_sqrt_price(MIN_SQRT_RATIO).is_ok());
        assert!(check_sqrt_price(MAX_SQRT_RATIO).is_err());
        assert!(check_sqrt_price(U256::ZERO).is_err());
    }
}
