//! Fixed-answer price feed.

use alloy_primitives::I256;

use crate::error::{Result, RouterError};
use crate::traits::{PriceData, PriceFeed};

/// A price feed that always reports the same round, or none at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticPriceFeed {
    round: Option<PriceData>,
}

impl StaticPriceFeed {
    /// A feed answering `answer` with `decimals` decimals.
    #[must_use]
    pub const fn new(answer: I256, decimals: u8) -> Self {
        Self {
            round: Some(PriceData { answer, decimals }),
        }
    }

    /// A feed with no round available.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { round: None }
    }
}

impl PriceFeed for StaticPriceFeed {
    fn latest_price(&self) -> Result<PriceData> {
        self.round
            .ok_or_else(|| RouterError::PriceFeed("no round available".to_owned()))
    }
}
