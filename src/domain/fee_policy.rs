//! Per-hop fee capability shared by both pool generations.

use alloy_primitives::U256;

use super::{FeeTier, PIPS_DENOMINATOR};
use crate::error::{Result, RouterError};

/// How a hop charges its swap fee.
///
/// Reserve-based pools charge a protocol-wide constant fraction; tick-based
/// pools report their own tier.  Both feed the same [`SwapStep`](super::SwapStep)
/// decomposition, so engine code never branches on the protocol to price a
/// fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeePolicy {
    /// Constant `numerator / denominator` of the input.
    Fixed {
        /// Fee share numerator.
        numerator: u32,
        /// Fee share denominator.
        denominator: u32,
    },
    /// Fee tier reported by the pool, in pips.
    PoolReported(FeeTier),
}

impl FeePolicy {
    /// The 0.3% fee every reserve-based pool charges (`3 / 1000`).
    pub const RESERVE: Self = Self::Fixed {
        numerator: 3,
        denominator: 1_000,
    };

    /// Fee taken from `amount_in`, in the input token, rounded down.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`] if the product overflows.
    pub fn fee_in_token_in(&self, amount_in: U256) -> Result<U256> {
        match *self {
            Self::Fixed {
                numerator,
                denominator,
            } => {
                if denominator == 0 {
                    return Err(RouterError::DivisionByZero);
                }
                amount_in
                    .checked_mul(U256::from(numerator))
                    .map(|v| v / U256::from(denominator))
                    .ok_or(RouterError::Overflow("fixed fee overflow"))
            }
            Self::PoolReported(tier) => tier.apply(amount_in),
        }
    }

    /// `(denominator − numerator, denominator)`: the multiplier applied to
    /// input before it reaches the curve.
    #[must_use]
    pub const fn retained_share(&self) -> (u32, u32) {
        match *self {
            Self::Fixed {
                numerator,
                denominator,
            } => (denominator.saturating_sub(numerator), denominator),
            Self::PoolReported(tier) => (tier.complement(), PIPS_DENOMINATOR),
        }
    }

    /// The policy expressed as a [`FeeTier`], for reporting.
    #[must_use]
    pub fn fee_tier(&self) -> FeeTier {
        match *self {
            Self::Fixed {
                numerator,
                denominator,
            } => {
                let pips = u64::from(numerator) * u64::from(PIPS_DENOMINATOR)
                    / u64::from(denominator.max(1));
                // A fixed share of 100% or more cannot be listed as a tier.
                u32::try_from(pips)
                    .ok()
                    .and_then(|p| FeeTier::new(p).ok())
                    .unwrap_or(FeeTier::HIGH)
            }
            Self::PoolReported(tier) => tier,
        }
    }
}
