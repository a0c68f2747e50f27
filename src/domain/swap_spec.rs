//! Swap direction and input-amount specification.

use core::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Which side of the trade the caller fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeType {
    /// The input amount is fixed; output is computed.
    ExactInput,
    /// The output amount is fixed; input is computed.
    ExactOutput,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactInput => write!(f, "exact_input"),
            Self::ExactOutput => write!(f, "exact_output"),
        }
    }
}

/// Input amount of an exact-input swap.
///
/// Besides a plain amount, callers may signal that the first pool already
/// holds the input, or that the router should sell its entire balance of
/// the input token.  [`AmountIn::from_raw`] decodes the on-wire sentinel
/// values into these variants.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use hydra_router::domain::AmountIn;
///
/// assert_eq!(AmountIn::from_raw(U256::ZERO), AmountIn::AlreadyFunded);
/// assert_eq!(AmountIn::from_raw(AmountIn::FULL_BALANCE_SENTINEL), AmountIn::FullBalance);
/// assert_eq!(AmountIn::from_raw(U256::from(7)), AmountIn::Exact(U256::from(7)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmountIn {
    /// Transfer exactly this amount from the payer.
    Exact(U256),
    /// The first pool was funded before the call; no transfer is made and
    /// the input is measured from the pool's balance.
    AlreadyFunded,
    /// Sell the router's whole balance of the input token.
    FullBalance,
}

impl AmountIn {
    /// Raw value meaning "already funded".
    pub const ALREADY_FUNDED_SENTINEL: U256 = U256::ZERO;

    /// Raw value meaning "use the router's full balance" (`2^255`).
    pub const FULL_BALANCE_SENTINEL: U256 = U256::from_limbs([0, 0, 0, 1 << 63]);

    /// Decodes a raw amount, mapping the two sentinels to their variants.
    pub fn from_raw(raw: U256) -> Self {
        if raw == Self::ALREADY_FUNDED_SENTINEL {
            Self::AlreadyFunded
        } else if raw == Self::FULL_BALANCE_SENTINEL {
            Self::FullBalance
        } else {
            Self::Exact(raw)
        }
    }
}

impl fmt::Display for AmountIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(amount) => write!(f, "{amount}"),
            Self::AlreadyFunded => write!(f, "already-funded"),
            Self::FullBalance => write!(f, "full-balance"),
        }
    }
}
