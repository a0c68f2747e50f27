//! Configuration for reserve-based (constant-product) pools.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::domain::TokenPair;
use crate::error::{Result, RouterError};

/// Configuration for a constant-product pair (`x · y = k`, 0.3% fee).
///
/// Reserves are given per token in the caller's order and are funded by
/// the factory when the pool is deployed.
///
/// # Validation
///
/// - The two tokens must be distinct and non-zero.
/// - Both reserves must be non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveConfig {
    token_a: Address,
    token_b: Address,
    reserve_a: U256,
    reserve_b: U256,
}

impl ReserveConfig {
    /// Creates a new `ReserveConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPath`] for an invalid token pair or
    /// [`RouterError::InvalidConfiguration`] if a reserve is zero.
    pub fn new(token_a: Address, token_b: Address, reserve_a: U256, reserve_b: U256) -> Result<Self> {
        let config = Self {
            token_a,
            token_b,
            reserve_a,
            reserve_b,
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
        if self.reserve_a.is_zero() || self.reserve_b.is_zero() {
            return Err(RouterError::InvalidConfiguration(
                "reserves must be non-zero",
            ));
        }
        Ok(())
    }

    /// Returns the sorted token pair.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPath`] for an invalid pair.
    pub fn token_pair(&self) -> Result<TokenPair> {
        TokenPair::new(self.token_a, self.token_b)
    }

    /// Initial reserves ordered as (token0, token1).
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPath`] for an invalid pair.
    pub fn sorted_reserves(&self) -> Result<(U256, U256)> {
        Ok(self
            .token_pair()?
            .order(self.token_a, self.reserve_a, self.reserve_b))
    }

    /// Returns the first token as given.
    #[must_use]
    pub const fn token_a(&self) -> Address {
        self.token_a
    }

    /// Returns the second token as given.
    #[must_use]
    pub const fn token_b(&self) -> Address {
        self.token_b
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const A: Address = Address::repeat_byte(0x11);
    const B: Address = Address::repeat_byte(0x22);

    #[test]
    fn valid_config() {
        assert!(ReserveConfig::new(A, B, U256::from(1u64), U256::from(2u64)).is_ok());
    }

    #[test]
    fn zero_reserve_rejected() {
        assert!(ReserveConfig::new(A, B, U256::ZERO, U256::from(2u64)).is_err());
        assert!(ReserveConfig::new(A, B, U256::from(1u64), U256::ZERO).is_err());
    }

    #[test]
    fn identical_tokens_rejected() {
        assert!(ReserveConfig::new(A, A, U256::from(1u64), U256::from(1u64)).is_err());
    }

    #[test]
    fn reserves_follow_token_order() {
        let Ok(cfg) = ReserveConfig::new(B, A, U256::from(7u64), U256::from(3u64)) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.sorted_reserves(), Ok((U256::from(3u64), U256::from(7u64))));
    }
}
