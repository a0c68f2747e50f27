//! Enum dispatch wrapper for all pool types.
//!
//! [`PoolBox`] wraps every concrete pool implementation behind a single
//! enum so the host can store heterogeneous pools in one registry and the
//! engines can ask for the protocol they expect.

use alloy_primitives::Address;

use super::{ConcentratedPool, ConstantProductPair};
use crate::domain::{FeeTier, PoolKind, TokenPair};
use crate::error::{Result, RouterError};
use crate::traits::{PoolState, ReservePool, TickPool};

/// Zero-cost dispatch enum wrapping all concrete pool implementations.
///
/// The enum implements [`PoolState`] by delegating to the inner pool.
/// Protocol-specific operations are reached through
/// [`as_reserve_mut`](Self::as_reserve_mut) and
/// [`as_tick_mut`](Self::as_tick_mut), which fail with
/// [`RouterError::PoolKindMismatch`] when the pool speaks the other
/// protocol.
///
/// # Example
///
/// ```text
/// let pool_box = PoolBox::Reserve(Box::new(pair));
/// let pair = pool_box.token_pair();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolBox {
    /// Constant-product pair (reserve protocol).
    Reserve(Box<ConstantProductPair>),

    /// Concentrated-liquidity pool (tick protocol).
    Tick(Box<ConcentratedPool>),
}

/// Helper macro to delegate a method call to every PoolBox variant.
macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            PoolBox::Reserve(p) => p.$method($($arg),*),
            PoolBox::Tick(p) => p.$method($($arg),*),
        }
    };
}

impl PoolBox {
    /// The reserve-protocol view of the pool at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PoolKindMismatch`] for a tick pool.
    pub fn as_reserve(&self, address: Address) -> Result<&dyn ReservePool> {
        match self {
            Self::Reserve(p) => Ok(&**p),
            Self::Tick(_) => Err(RouterError::PoolKindMismatch(address)),
        }
    }

    /// Mutable reserve-protocol view of the pool at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PoolKindMismatch`] for a tick pool.
    pub fn as_reserve_mut(&mut self, address: Address) -> Result<&mut dyn ReservePool> {
        match self {
            Self::Reserve(p) => Ok(&mut **p),
            Self::Tick(_) => Err(RouterError::PoolKindMismatch(address)),
        }
    }

    /// The tick-protocol view of the pool at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PoolKindMismatch`] for a reserve pool.
    pub fn as_tick(&self, address: Address) -> Result<&dyn TickPool> {
        match self {
            Self::Tick(p) => Ok(&**p),
            Self::Reserve(_) => Err(RouterError::PoolKindMismatch(address)),
        }
    }

    /// Mutable tick-protocol view of the pool at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PoolKindMismatch`] for a reserve pool.
    pub fn as_tick_mut(&mut self, address: Address) -> Result<&mut dyn TickPool> {
        match self {
            Self::Tick(p) => Ok(&mut **p),
            Self::Reserve(_) => Err(RouterError::PoolKindMismatch(address)),
        }
    }
}

impl PoolState for PoolBox {
    fn token_pair(&self) -> TokenPair {
        delegate!(self, token_pair())
    }

    fn fee_tier(&self) -> FeeTier {
        delegate!(self, fee_tier())
    }

    fn tick_spacing(&self) -> u32 {
        delegate!(self, tick_spacing())
    }

    fn kind(&self) -> PoolKind {
        delegate!(self, kind())
    }
}

impl From<ConstantProductPair> for PoolBox {
    fn from(pool: ConstantProductPair) -> Self {
        Self::Reserve(Box::new(pool))
    }
}

impl From<ConcentratedPool> for PoolBox {
    fn from(pool: ConcentratedPool) -> Self {
        Self::Tick(Box::new(pool))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use alloy_primitives::U256;

    use super::*;
    use crate::config::{ReserveConfig, TickConfig};
    use crate::math::Q96;
    use crate::traits::FromConfig;

    const A: Address = Address::repeat_byte(0x11);
    const B: Address = Address::repeat_byte(0x22);
    const AT: Address = Address::repeat_byte(0xee);

    fn reserve() -> PoolBox {
        let Ok(cfg) = ReserveConfig::new(A, B, U256::from(10u64), U256::from(20u64)) else {
            panic!("valid config");
        };
        let Ok(pool) = ConstantProductPair::from_config(&cfg) else {
            panic!("valid pool");
        };
        PoolBox::from(pool)
    }

    fn tick() -> PoolBox {
        let Ok(cfg) = TickConfig::new(A, B, FeeTier::LOW, 10, Q96, 1_000) else {
            panic!("valid config");
        };
        let Ok(pool) = ConcentratedPool::from_config(&cfg) else {
            panic!("valid pool");
        };
        PoolBox::from(pool)
    }

    #[test]
    fn delegates_state() {
        let r = reserve();
        let t = tick();
        assert_eq!(r.kind(), PoolKind::Reserve);
        assert_eq!(r.fee_tier(), FeeTier::MEDIUM);
        assert_eq!(t.kind(), PoolKind::Tick);
        assert_eq!(t.fee_tier(), FeeTier::LOW);
        assert_eq!(t.tick_spacing(), 10);
        assert_eq!(r.token_pair(), t.token_pair());
    }

    #[test]
    fn protocol_views() {
        let mut r = reserve();
        let mut t = tick();
        let Ok(view) = r.as_reserve(AT) else {
            panic!("reserve view");
        };
        assert_eq!(view.reserves(), (U256::from(10u64), U256::from(20u64)));
        assert!(t.as_tick(AT).is_ok());
        assert_eq!(
            r.as_tick_mut(AT).err(),
            Some(RouterError::PoolKindMismatch(AT))
        );
        assert_eq!(
            t.as_reserve_mut(AT).err(),
            Some(RouterError::PoolKindMismatch(AT))
        );
    }
}
