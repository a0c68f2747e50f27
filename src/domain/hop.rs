//! One pool traversal within a route.

use core::fmt;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::{FeePolicy, FeeTier};

/// Protocol generation of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    /// Constant-product pool funded before each swap.
    Reserve,
    /// Concentrated-liquidity pool settled through a callback.
    Tick,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reserve => write!(f, "reserve"),
            Self::Tick => write!(f, "tick"),
        }
    }
}

/// A decoded hop: sell `token_in` for `token_out` in one pool.
///
/// Reserve hops carry no fee tier (the protocol fee is fixed); tick hops
/// carry the tier that, together with the tokens, identifies the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hop {
    /// Token sold into the pool.
    pub token_in: Address,
    /// Token bought from the pool.
    pub token_out: Address,
    /// Fee tier for tick hops, `None` for reserve hops.
    pub fee: Option<FeeTier>,
}

impl Hop {
    /// A reserve-protocol hop.
    #[must_use]
    pub const fn reserve(token_in: Address, token_out: Address) -> Self {
        Self {
            token_in,
            token_out,
            fee: None,
        }
    }

    /// A tick-protocol hop with its fee tier.
    #[must_use]
    pub const fn tick(token_in: Address, fee: FeeTier, token_out: Address) -> Self {
        Self {
            token_in,
            token_out,
            fee: Some(fee),
        }
    }

    /// Protocol the hop is routed through.
    #[must_use]
    pub const fn kind(&self) -> PoolKind {
        match self.fee {
            Some(_) => PoolKind::Tick,
            None => PoolKind::Reserve,
        }
    }

    /// Fee capability of the hop.
    #[must_use]
    pub const fn fee_policy(&self) -> FeePolicy {
        match self.fee {
            Some(tier) => FeePolicy::PoolReported(tier),
            None => FeePolicy::RESERVE,
        }
    }

    /// `true` when `token_in` sorts below `token_out`.
    #[must_use]
    pub fn zero_for_one(&self) -> bool {
        self.token_in < self.token_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_fee() {
        let a = Address::repeat_byte(1);
        let b = Address::repeat_byte(2);
        assert_eq!(Hop::reserve(a, b).kind(), PoolKind::Reserve);
        assert_eq!(Hop::tick(a, FeeTier::LOW, b).kind(), PoolKind::Tick);
        assert_eq!(Hop::reserve(a, b).fee_policy(), FeePolicy::RESERVE);
        assert!(Hop::reserve(a, b).zero_for_one());
        assert!(!Hop::reserve(b, a).zero_for_one());
    }
}
