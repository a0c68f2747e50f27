//! Canonically ordered pair of distinct token addresses.

use alloy_primitives::Address;

use crate::error::{Result, RouterError};

/// Two distinct tokens sorted so that `token0 < token1`.
///
/// Every pool identifies its tokens through this ordering, and pool
/// addresses are derived from it, so `(A, B)` and `(B, A)` always resolve
/// to the same pool.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_router::domain::TokenPair;
///
/// let a = Address::repeat_byte(0x11);
/// let b = Address::repeat_byte(0x22);
/// let pair = TokenPair::new(b, a).expect("distinct tokens");
/// assert_eq!(pair.token0(), a);
/// assert_eq!(pair.token1(), b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenPair {
    token0: Address,
    token1: Address,
}

impl TokenPair {
    /// Sorts two tokens into canonical order.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidPath`] if both addresses are equal.
    /// - [`RouterError::InvalidPath`] if the lower address is zero.
    pub fn new(token_a: Address, token_b: Address) -> Result<Self> {
        if token_a == token_b {
            return Err(RouterError::InvalidPath("identical token addresses"));
        }
        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        if token0 == Address::ZERO {
            return Err(RouterError::InvalidPath("zero token address"));
        }
        Ok(Self { token0, token1 })
    }

    /// Lower address.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.token0
    }

    /// Higher address.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.token1
    }

    /// Returns `true` if `token` is one of the pair.
    #[must_use]
    pub fn contains(&self, token: Address) -> bool {
        self.token0 == token || self.token1 == token
    }

    /// Returns `true` when selling `token_in` moves the pool from token0 to
    /// token1.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPath`] if `token_in` is not in the pair.
    pub fn zero_for_one(&self, token_in: Address) -> Result<bool> {
        if token_in == self.token0 {
            Ok(true)
        } else if token_in == self.token1 {
            Ok(false)
        } else {
            Err(RouterError::InvalidPath("token is not part of the pair"))
        }
    }

    /// Orders a `(value_for_a, value_for_b)` tuple given for
    /// `(token_a, token_b)` into `(value_for_token0, value_for_token1)`.
    pub fn order<T>(&self, token_a: Address, for_a: T, for_b: T) -> (T, T) {
        if token_a == self.token0 {
            (for_a, for_b)
        } else {
            (for_b, for_a)
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::repeat_byte(b)
    }

    #[test]
    fn sorts_tokens() {
        let Ok(pair) = TokenPair::new(addr(0x22), addr(0x11)) else {
            panic!("expected valid pair");
        };
        assert_eq!(pair.token0(), addr(0x11));
        assert_eq!(pair.token1(), addr(0x22));
    }

    #[test]
    fn order_independent() {
        assert_eq!(
            TokenPair::new(addr(1), addr(2)),
            TokenPair::new(addr(2), addr(1))
        );
    }

    #[test]
    fn identical_rejected() {
        assert!(TokenPair::new(addr(1), addr(1)).is_err());
    }

    #[test]
    fn zero_address_rejected() {
        assert!(TokenPair::new(Address::ZERO, addr(1)).is_err());
    }

    #[test]
    fn direction() {
        let Ok(pair) = TokenPair::new(addr(1), addr(2)) else {
            panic!("expected valid pair");
        };
        assert_eq!(pair.zero_for_one(addr(1)), Ok(true));
        assert_eq!(pair.zero_for_one(addr(2)), Ok(false));
        assert!(pair.zero_for_one(addr(3)).is_err());
    }

    #[test]
    fn order_values() {
        let Ok(pair) = TokenPair::new(addr(1), addr(2)) else {
            panic!("expected valid pair");
        };
        assert_eq!(pair.order(addr(2), "b", "a"), ("a", "b"));
        assert_eq!(pair.order(addr(1), "a", "b"), ("a", "b"));
    }
}
