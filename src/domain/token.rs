//! Token metadata as reported by the ledger.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Symbol, name, address and decimals of a token.
///
/// Descriptors are fetched from the ledger every time a trade record is
/// assembled; nothing in the router caches them.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_router::domain::TokenDescriptor;
///
/// let usdc = TokenDescriptor::new("USDC", "USD Coin", Address::repeat_byte(0x55), 6);
/// assert_eq!(usdc.decimals, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDescriptor {
    /// Ticker symbol.
    pub symbol: String,
    /// Human-readable name.
    pub name: String,
    /// Contract address.
    pub address: Address,
    /// Number of decimals of the raw unit.
    pub decimals: u8,
}

impl TokenDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        address: Address,
        decimals: u8,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            address,
            decimals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_address_as_hex() {
        let weth = TokenDescriptor::new("WETH", "Wrapped Ether", Address::repeat_byte(0x44), 18);
        let json = serde_json::to_string(&weth).unwrap_or_default();
        assert!(json.contains("\"symbol\":\"WETH\""));
        assert!(json.contains("0x4444444444444444444444444444444444444444"));
    }
}
