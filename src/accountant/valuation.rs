//! USD valuation of trade amounts and hop fees.
//!
//! Values are expressed with 6 decimals.  Allowlisted tokens count one
//! raw unit as one micro-dollar; the wrapped-native token is converted
//! through the price feed as
//! `amount · price / 10^(18 + price_decimals − 6)`.  Anything else is
//! unpriced.

use alloy_primitives::{Address, U256};

use crate::config::RouterConfig;
use crate::domain::{Rounding, SwapStep};
use crate::error::{Result, RouterError};
use crate::math::mul_div;
use crate::traits::PriceFeed;

const WRAPPED_NATIVE_DECIMALS: u32 = 18;
const USD_DECIMALS: u32 = 6;

/// Prices amounts in USD from an allowlist and a reference feed.
///
/// # Examples
///
/// ```
/// use alloy_primitives::{Address, I256, U256};
/// use hydra_router::accountant::UsdValuator;
/// use hydra_router::chain::StaticPriceFeed;
///
/// let weth = Address::repeat_byte(0x44);
/// let usdc = Address::repeat_byte(0x55);
/// let feed = StaticPriceFeed::new(I256::try_from(200_000_000_000i64).expect("fits"), 8);
/// let valuator = UsdValuator::new(weth, vec![usdc], feed);
///
/// let one_eth = U256::from(10u64).pow(U256::from(18));
/// assert_eq!(valuator.token_usd(weth, one_eth).ok().flatten(), Some(U256::from(2_000_000_000u64)));
/// ```
#[derive(Debug, Clone)]
pub struct UsdValuator<F> {
    wrapped_native: Address,
    usd_tokens: Vec<Address>,
    price_feed: F,
}

impl<F: PriceFeed> UsdValuator<F> {
    /// Creates a valuator.
    #[must_use]
    pub fn new(wrapped_native: Address, usd_tokens: Vec<Address>, price_feed: F) -> Self {
        Self {
            wrapped_native,
            usd_tokens,
            price_feed,
        }
    }

    /// Creates a valuator from the router configuration.
    #[must_use]
    pub fn from_config(config: &RouterConfig, price_feed: F) -> Self {
        Self::new(config.wrapped_native, config.usd_tokens.clone(), price_feed)
    }

    /// The wrapped-native token address.
    #[must_use]
    pub const fn wrapped_native(&self) -> Address {
        self.wrapped_native
    }

    /// USD value of `amount` of `token`, or `None` if the token is
    /// unpriced.
    ///
    /// # Errors
    ///
    /// Propagates price-feed failures for the wrapped-native token.
    pub fn token_usd(&self, token: Address, amount: U256) -> Result<Option<U256>> {
        if self.usd_tokens.contains(&token) {
            return Ok(Some(amount));
        }
        if token == self.wrapped_native {
            return self.wrapped_native_usd(amount).map(Some);
        }
        Ok(None)
    }

    /// Converts a wrapped-native amount at the feed's latest price.
    ///
    /// # Errors
    ///
    /// [`RouterError::PriceFeed`] for a missing or non-positive round and
    /// [`RouterError::Overflow`] if the scale does not fit.
    pub fn wrapped_native_usd(&self, amount: U256) -> Result<U256> {
        let round = self.price_feed.latest_price()?;
        let price = round.positive_answer()?;
        let exponent = WRAPPED_NATIVE_DECIMALS + u32::from(round.decimals) - USD_DECIMALS;
        let scale = U256::from(10u64)
            .checked_pow(U256::from(exponent))
            .ok_or(RouterError::Overflow("price scale"))?;
        mul_div(amount, price, scale, Rounding::Down)
    }

    /// Value of a whole trade: the sold side when it is priced, otherwise
    /// the bought side, otherwise zero.
    ///
    /// # Errors
    ///
    /// See [`token_usd`](Self::token_usd).
    pub fn trade_usd(
        &self,
        token_sold: Address,
        amount_sold: U256,
        token_bought: Address,
        amount_bought: U256,
    ) -> Result<U256> {
        if let Some(value) = self.token_usd(token_sold, amount_sold)? {
            return Ok(value);
        }
        Ok(self.token_usd(token_bought, amount_bought)?.unwrap_or_default())
    }

    /// Value of one hop's fee: the input-side fee when the input token is
    /// priced, otherwise the output-side fee, otherwise zero.
    ///
    /// # Errors
    ///
    /// See [`token_usd`](Self::token_usd).
    pub fn fee_usd(&self, step: &SwapStep) -> Result<U256> {
        self.trade_usd(
            step.token_in,
            step.fee_in_token_in,
            step.token_out,
            step.fee_in_token_out,
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use alloy_primitives::I256;

    use super::*;
    use crate::chain::StaticPriceFeed;

    const TOKEN_A: Address = Address::repeat_byte(0x11);
    const WETH: Address = Address::repeat_byte(0x44);
    const USDC: Address = Address::repeat_byte(0x55);

    fn eth(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18))
    }

    fn valuator(feed: StaticPriceFeed) -> UsdValuator<StaticPriceFeed> {
        UsdValuator::new(WETH, vec![USDC], feed)
    }

    fn feed_2000() -> StaticPriceFeed {
        StaticPriceFeed::new(I256::try_from(200_000_000_000i64).unwrap_or_default(), 8)
    }

    #[test]
    fn allowlisted_token_passes_through() {
        let v = valuator(StaticPriceFeed::unavailable());
        assert_eq!(v.token_usd(USDC, U256::from(1_234u64)), Ok(Some(U256::from(1_234u64))));
        assert_eq!(v.token_usd(TOKEN_A, U256::from(1_234u64)), Ok(None));
    }

    #[test]
    fn wrapped_native_uses_feed() {
        let v = valuator(feed_2000());
        assert_eq!(v.wrapped_native_usd(eth(1)), Ok(U256::from(2_000_000_000u64)));
    }

    #[test]
    fn sold_side_wins_then_bought_side() {
        let v = valuator(feed_2000());
        assert_eq!(
            v.trade_usd(USDC, U256::from(500u64), WETH, eth(1)),
            Ok(U256::from(500u64))
        );
        assert_eq!(
            v.trade_usd(TOKEN_A, U256::from(7u64), WETH, eth(2)),
            Ok(U256::from(4_000_000_000u64))
        );
        assert_eq!(
            v.trade_usd(TOKEN_A, U256::from(7u64), Address::repeat_byte(0x22), U256::from(9u64)),
            Ok(U256::ZERO)
        );
    }

    #[test]
    fn unpriced_trade_never_touches_feed() {
        let v = valuator(StaticPriceFeed::unavailable());
        assert_eq!(
            v.trade_usd(TOKEN_A, U256::from(1u64), Address::repeat_byte(0x22), U256::from(1u64)),
            Ok(U256::ZERO)
        );
    }

    #[test]
    fn feed_failure_propagates() {
        let v = valuator(StaticPriceFeed::unavailable());
        assert!(matches!(
            v.wrapped_native_usd(eth(1)),
            Err(RouterError::PriceFeed(_))
        ));
        let negative = valuator(StaticPriceFeed::new(I256::MINUS_ONE, 8));
        assert!(matches!(
            negative.token_usd(WETH, eth(1)),
            Err(RouterError::PriceFeed(_))
        ));
    }

    #[test]
    fn fee_falls_back_to_output_side() {
        let v = valuator(feed_2000());
        let step = SwapStep {
            token_in: TOKEN_A,
            token_out: USDC,
            amount_in: U256::from(100u64),
            amount_out: U256::from(90u64),
            fee_in_token_in: U256::from(3u64),
            fee_in_token_out: U256::from(2u64),
        };
        assert_eq!(v.fee_usd(&step), Ok(U256::from(2u64)));
        let priced_in = SwapStep {
            token_in: USDC,
            token_out: TOKEN_A,
            ..step
        };
        assert_eq!(v.fee_usd(&priced_in), Ok(U256::from(3u64)));
    }
}
