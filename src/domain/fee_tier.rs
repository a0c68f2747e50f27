//! Pool fee tiers expressed in hundredths of a basis point.

use core::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouterError};

/// Denominator of a fee expressed in pips (1 000 000 = 100%).
pub const PIPS_DENOMINATOR: u32 = 1_000_000;

/// A pool fee in hundredths of a basis point ("pips").
///
/// `3000` is 0.30%, `500` is 0.05%.  Tick-based pools report their own
/// tier; reserve-based pools always charge [`FeeTier::MEDIUM`].
///
/// # Examples
///
/// ```
/// use hydra_router::domain::FeeTier;
///
/// let tier = FeeTier::new(3000).expect("valid tier");
/// assert_eq!(tier, FeeTier::MEDIUM);
/// assert_eq!(tier.to_be_bytes(), [0x00, 0x0b, 0xb8]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(u32);

impl FeeTier {
    /// 0.01%.
    pub const LOWEST: Self = Self(100);
    /// 0.05%.
    pub const LOW: Self = Self(500);
    /// 0.30%.
    pub const MEDIUM: Self = Self(3_000);
    /// 1.00%.
    pub const HIGH: Self = Self(10_000);

    /// Creates a fee tier from a pip count.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfiguration`] if the fee is 100% or
    /// more, since no input would remain to trade.
    pub fn new(pips: u32) -> Result<Self> {
        if pips >= PIPS_DENOMINATOR {
            return Err(RouterError::InvalidConfiguration(
                "fee tier must be below 100%",
            ));
        }
        Ok(Self(pips))
    }

    /// Returns the fee in pips.
    #[must_use]
    pub const fn pips(&self) -> u32 {
        self.0
    }

    /// Encodes the tier as the 3-byte big-endian field used in packed paths.
    #[must_use]
    pub const fn to_be_bytes(&self) -> [u8; 3] {
        let b = self.0.to_be_bytes();
        [b[1], b[2], b[3]]
    }

    /// Decodes a 3-byte big-endian fee field.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::MalformedPath`] if the encoded fee is 100% or
    /// more.
    pub fn from_be_bytes(bytes: [u8; 3]) -> Result<Self> {
        let pips = u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]);
        if pips >= PIPS_DENOMINATOR {
            return Err(RouterError::MalformedPath("fee field out of range"));
        }
        Ok(Self(pips))
    }

    /// `amount × pips / 1 000 000`, rounded down.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Overflow`] if the product overflows.
    pub fn apply(&self, amount: U256) -> Result<U256> {
        amount
            .checked_mul(U256::from(self.0))
            .map(|v| v / U256::from(PIPS_DENOMINATOR))
            .ok_or(RouterError::Overflow("fee product overflow"))
    }

    /// `1 000 000 − pips`, the share of input that reaches the curve.
    #[must_use]
    pub const fn complement(&self) -> u32 {
        PIPS_DENOMINATOR - self.0
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pips", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert_eq!(FeeTier::LOWEST.pips(), 100);
        assert_eq!(FeeTier::LOW.pips(), 500);
        assert_eq!(FeeTier::MEDIUM.pips(), 3_000);
        assert_eq!(FeeTier::HIGH.pips(), 10_000);
    }

    #[test]
    fn rejects_full_fee() {
        assert!(FeeTier::new(PIPS_DENOMINATOR).is_err());
        assert!(FeeTier::new(PIPS_DENOMINATOR - 1).is_ok());
    }

    #[test]
    fn byte_codec() {
        let Ok(tier) = FeeTier::from_be_bytes([0x00, 0x01, 0xf4]) else {
            panic!("valid bytes");
        };
        assert_eq!(tier, FeeTier::LOW);
        assert_eq!(FeeTier::HIGH.to_be_bytes(), [0x00, 0x27, 0x10]);
    }

    #[test]
    fn byte_codec_rejects_oversized_fee() {
        assert!(FeeTier::from_be_bytes([0xff, 0xff, 0xff]).is_err());
    }

    #[test]
    fn apply_rounds_down() {
        let Ok(fee) = FeeTier::MEDIUM.apply(U256::from(1_000_000u64)) else {
            panic!("expected Ok");
        };
        assert_eq!(fee, U256::from(3_000u64));

        let Ok(dust) = FeeTier::MEDIUM.apply(U256::from(100u64)) else {
            panic!("expected Ok");
        };
        assert_eq!(dust, U256::ZERO);
    }

    #[test]
    fn apply_overflow() {
        assert!(FeeTier::HIGH.apply(U256::MAX).is_err());
    }

    #[test]
    fn complement_of_medium() {
        assert_eq!(FeeTier::MEDIUM.complement(), 997_000);
    }
}
