//! Wrapped-native/USD price oracle.

use alloy_primitives::{I256, U256};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouterError};

/// Latest round of a price feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceData {
    /// Signed answer scaled by `10^decimals`.
    pub answer: I256,
    /// Decimals of `answer`.
    pub decimals: u8,
}

impl PriceData {
    /// The answer as an unsigned price.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PriceFeed`] if the answer is zero or negative.
    pub fn positive_answer(&self) -> Result<U256> {
        if !self.answer.is_positive() {
            return Err(RouterError::PriceFeed(format!(
                "non-positive answer {}",
                self.answer
            )));
        }
        Ok(self.answer.into_raw())
    }
}

/// Source of the wrapped-native price in USD.
pub trait PriceFeed {
    /// Latest price round.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PriceFeed`] if no round is available.
    fn latest_price(&self) -> Result<PriceData>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_answer_rejected() {
        let data = PriceData {
            answer: I256::MINUS_ONE,
            decimals: 8,
        };
        assert!(matches!(
            data.positive_answer(),
            Err(RouterError::PriceFeed(_))
        ));
        let zero = PriceData {
            answer: I256::ZERO,
            decimals: 8,
        };
        assert!(zero.positive_answer().is_err());
    }

    #[test]
    fn positive_answer_passes_through() {
        let data = PriceData {
            answer: I256::from_raw(U256::from(200_000_000_000u64)),
            decimals: 8,
        };
        assert_eq!(data.positive_answer(), Ok(U256::from(200_000_000_000u64)));
    }
}
