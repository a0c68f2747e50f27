//! Top-level pool configuration enum.
//!
//! [`PoolConfig`] is the declarative blueprint for deploying a pool.  The
//! factory matches on it to dispatch construction:
//!
//! ```text
//! match config {
//!     PoolConfig::Reserve(cfg) => ConstantProductPair::from_config(&cfg),
//!     PoolConfig::Tick(cfg)    => ConcentratedPool::from_config(&cfg),
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::{ReserveConfig, TickConfig};
use crate::domain::{FeeTier, PoolKind, TokenPair};
use crate::error::Result;

/// Configuration of any supported pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoolConfig {
    /// Reserve-based constant-product pair.
    Reserve(ReserveConfig),
    /// Tick-based concentrated-liquidity pool.
    Tick(TickConfig),
}

impl PoolConfig {
    /// Validates the inner configuration.
    ///
    /// # Errors
    ///
    /// Returns the error of the inner config's `validate()`.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Reserve(cfg) => cfg.validate(),
            Self::Tick(cfg) => cfg.validate(),
        }
    }

    /// Protocol of the configured pool.
    #[must_use]
    pub const fn kind(&self) -> PoolKind {
        match self {
            Self::Reserve(_) => PoolKind::Reserve,
            Self::Tick(_) => PoolKind::Tick,
        }
    }

    /// Fee tier used in the pool's address salt; `None` for reserve pools.
    #[must_use]
    pub const fn fee(&self) -> Option<FeeTier> {
        match self {
            Self::Reserve(_) => None,
            Self::Tick(cfg) => Some(cfg.fee()),
        }
    }

    /// The sorted token pair.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPath`](crate::error::RouterError::InvalidPath)
    /// for an invalid pair.
    pub fn token_pair(&self) -> Result<TokenPair> {
        match self {
            Self::Reserve(cfg) => cfg.token_pair(),
            Self::Tick(cfg) => cfg.token_pair(),
        }
    }
}

impl From<ReserveConfig> for PoolConfig {
    fn from(cfg: ReserveConfig) -> Self {
        Self::Reserve(cfg)
    }
}

impl From<TickConfig> for PoolConfig {
    fn from(cfg: TickConfig) -> Self {
        Self::Tick(cfg)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use alloy_primitives::{Address, U256};

    use super::*;
    use crate::math::Q96;

    #[test]
    fn kind_and_fee() {
        let a = Address::repeat_byte(1);
        let b = Address::repeat_byte(2);
        let Ok(reserve) = ReserveConfig::new(a, b, U256::from(1u64), U256::from(1u64)) else {
            panic!("expected Ok");
        };
        let Ok(tick) = TickConfig::new(a, b, FeeTier::HIGH, 200, Q96, 1) else {
            panic!("expected Ok");
        };
        let reserve = PoolConfig::from(reserve);
        let tick = PoolConfig::from(tick);
        assert_eq!(reserve.kind(), PoolKind::Reserve);
        assert_eq!(reserve.fee(), None);
        assert_eq!(tick.kind(), PoolKind::Tick);
        assert_eq!(tick.fee(), Some(FeeTier::HIGH));
        assert!(reserve.validate().is_ok());
        assert!(tick.validate().is_ok());
    }

    #[test]
    fn tagged_json() {
        let json = r#"{
            "kind": "reserve",
            "token_a": "0x1111111111111111111111111111111111111111",
            "token_b": "0x2222222222222222222222222222222222222222",
            "reserve_a": "0x3e8",
            "reserve_b": "0x3e8"
        }"#;
        let Ok(cfg) = serde_json::from_str::<PoolConfig>(json) else {
            panic!("expected valid json");
        };
        assert_eq!(cfg.kind(), PoolKind::Reserve);
        assert!(cfg.validate().is_ok());
    }
}
