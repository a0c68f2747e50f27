//! Unified error types for the Hydra router.
//!
//! All fallible operations across the crate return [`RouterError`] as their
//! error type, ensuring a consistent error handling experience for
//! consumers.  Router-level failures (path, caller authenticity, slippage)
//! sit next to the failures raised by the collaborators the engines drive
//! (ledger, pools, price feed), which propagate unchanged.

use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, RouterError>;

/// Every error the router, its pools and its host can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// Route is too short or structurally unusable.
    #[error("invalid path: {0}")]
    InvalidPath(&'static str),

    /// Encoded path bytes do not match the hop-record stride.
    #[error("malformed path: {0}")]
    MalformedPath(&'static str),

    /// A swap callback arrived from an address that is not the pool derived
    /// for the hop being settled.
    #[error("callback from {caller} but expected pool {expected}")]
    InvalidCaller {
        /// Address that invoked the callback.
        caller: Address,
        /// Pool address derived from the hop.
        expected: Address,
    },

    /// Exact-input swap produced less than the caller's minimum.
    #[error("too little received: {amount_out} < minimum {minimum}")]
    TooLittleReceived {
        /// Realized output.
        amount_out: U256,
        /// Caller-supplied minimum.
        minimum: U256,
    },

    /// Exact-output swap needs more input than the caller's maximum.
    #[error("too much requested: {amount_in} > maximum {maximum}")]
    TooMuchRequested {
        /// Required input.
        amount_in: U256,
        /// Caller-supplied maximum.
        maximum: U256,
    },

    /// The pool did not deliver the exact output that was requested.
    #[error("pool delivered {received}, expected exactly {expected}")]
    InvalidAmountOut {
        /// Output the pool actually delivered.
        received: U256,
        /// Output that was requested.
        expected: U256,
    },

    /// Swap callback carried no positive delta (zero-liquidity swap), or
    /// arrived with no swap in progress.
    #[error("invalid swap: no amount owed")]
    InvalidSwap,

    /// Caller-supplied amount is unusable (zero, or unsupported sentinel).
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// Holder does not own enough of a token.
    #[error("insufficient balance of {token} held by {holder}")]
    InsufficientBalance {
        /// Token being moved.
        token: Address,
        /// Account being debited.
        holder: Address,
    },

    /// Spender's allowance over the owner's tokens is too small.
    #[error("insufficient allowance: {spender} may not move {token} of {owner}")]
    InsufficientAllowance {
        /// Token being moved.
        token: Address,
        /// Owner of the tokens.
        owner: Address,
        /// Account attempting the delegated transfer.
        spender: Address,
    },

    /// Token is not registered with the ledger.
    #[error("unknown token {0}")]
    UnknownToken(Address),

    /// No pool is deployed at the derived address.
    #[error("no pool deployed at {0}")]
    UnknownPool(Address),

    /// A pool is already deployed at the address.
    #[error("pool already deployed at {0}")]
    PoolExists(Address),

    /// Pool at the address belongs to the other protocol generation.
    #[error("pool at {0} has the wrong protocol kind")]
    PoolKindMismatch(Address),

    /// Pool was re-entered while one of its own swaps was in flight.
    #[error("pool {0} is locked")]
    PoolLocked(Address),

    /// Pool received less input than the swap required.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// Swap request asked for no output.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// Reserves cannot satisfy the swap.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// Post-swap balances violate the fee-adjusted constant product.
    #[error("constant-product invariant violated")]
    KInvariant,

    /// Price limit lies on the wrong side of the current price or outside
    /// the representable range.
    #[error("price limit out of range")]
    InvalidPriceLimit,

    /// Reference price feed failed or returned an unusable answer.
    #[error("price feed failure: {0}")]
    PriceFeed(String),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Configuration could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(String),

    /// Arithmetic overflow or underflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

impl RouterError {
    /// Returns `true` for slippage-bound violations, which the caller can
    /// resolve by resubmitting with adjusted bounds.
    #[must_use]
    pub const fn is_slippage(&self) -> bool {
        matches!(
            self,
            Self::TooLittleReceived { .. } | Self::TooMuchRequested { .. }
        )
    }
}

impl From<serde_json::Error> for RouterError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slippage_classification() {
        let low = RouterError::TooLittleReceived {
            amount_out: U256::from(1),
            minimum: U256::from(2),
        };
        let high = RouterError::TooMuchRequested {
            amount_in: U256::from(3),
            maximum: U256::from(2),
        };
        assert!(low.is_slippage());
        assert!(high.is_slippage());
        assert!(!RouterError::InvalidSwap.is_slippage());
    }

    #[test]
    fn display_includes_amounts() {
        let err = RouterError::TooLittleReceived {
            amount_out: U256::from(85),
            minimum: U256::from(86),
        };
        let msg = err.to_string();
        assert!(msg.contains("85"));
        assert!(msg.contains("86"));
    }

    #[test]
    fn json_errors_convert() {
        let Err(parse) = serde_json::from_str::<u32>("not json") else {
            return;
        };
        let err = RouterError::from(parse);
        assert!(matches!(err, RouterError::ConfigParse(_)));
    }
}
