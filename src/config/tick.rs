//! Configuration for tick-based (concentrated liquidity) pools.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::domain::{FeeTier, TokenPair};
use crate::error::{Result, RouterError};
use crate::math::check_sqrt_price;

/// Configuration for a tick-based pool with a single active range.
///
/// The pool starts at `sqrt_price_x96` with `liquidity` active; the
/// factory funds it with the token amounts that liquidity implies at that
/// price.
///
/// # Validation
///
/// - The two tokens must be distinct and non-zero.
/// - `tick_spacing` must be positive.
/// - `sqrt_price_x96` must lie in `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickConfig {
    token_a: Address,
    token_b: Address,
    fee: FeeTier,
    tick_spacing: u32,
    sqrt_price_x96: U256,
    liquidity: u128,
}

impl TickConfig {
    /// Creates a new `TickConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPath`] for an invalid token pair or
    /// [`RouterError::InvalidConfiguration`] for a zero tick spacing or an
    /// out-of-range price.
    pub fn new(
        token_a: Address,
        token_b: Address,
        fee: FeeTier,
        tick_spacing: u32,
        sqrt_price_x96: U256,
        liquidity: u128,
    ) -> Result<Self> {
        let config = Self {
            token_a,
            token_b,
            fee,
            tick_spacing,
            sqrt_price_x96,
            liquidity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn validate(&self) -> Result<()> {
        TokenPair::new(self.token_a, self.token_b)?;
        FeeTier::new(self.fee.pips())?;
        if self.tick_spacing == 0 {
            return Err(RouterError::InvalidConfiguration(
                "tick spacing must be positive",
            ));
        }
        check_sqrt_price(self.sqrt_price_x96)
    }

    /// Returns the sorted token pair.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPath`] for an invalid pair.
    pub fn token_pair(&self) -> Result<TokenPair> {
        TokenPair::new(self.token_a, self.token_b)
    }

    /// Returns the fee tier.
    #[must_use]
    pub const fn fee(&self) -> FeeTier {
        self.fee
    }

    /// Returns the tick spacing.
    #[must_use]
    pub const fn tick_spacing(&self) -> u32 {
        self.tick_spacing
    }

    /// Returns the initial square-root price.
    #[must_use]
    pub const fn sqrt_price_x96(&self) -> U256 {
        self.sqrt_price_x96
    }

    /// Returns the active liquidity.
    #[must_use]
    pub const fn liquidity(&self) -> u128 {
        self.liquidity
    }
}
