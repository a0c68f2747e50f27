//! Deterministic pool addresses via the CREATE2 scheme.
//!
//! A pool's address is a pure function of its factory, the factory's
//! init-code hash and a salt built from the sorted token pair (plus the fee
//! tier for tick-based pools).  Nothing is looked up.

use alloy_primitives::{keccak256, Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::domain::{FeeTier, TokenPair};
use crate::error::Result;

/// Factory address and init-code hash of one pool protocol.
///
/// # Examples
///
/// ```
/// use alloy_primitives::{address, b256};
/// use hydra_router::path::PoolLocator;
///
/// let locator = PoolLocator::new(
///     address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"),
///     b256!("96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f"),
/// );
/// let pair = locator.reserve_pool_address(
///     address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
///     address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
/// );
/// assert_eq!(pair, Ok(address!("B4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolLocator {
    /// Deployer of every pool of the protocol.
    pub factory: Address,
    /// `keccak256` of the pool creation code.
    pub init_code_hash: B256,
}

impl PoolLocator {
    /// Creates a locator.
    #[must_use]
    pub const fn new(factory: Address, init_code_hash: B256) -> Self {
        Self {
            factory,
            init_code_hash,
        }
    }

    /// Salt of a reserve-based pool: `keccak256(token0 ‖ token1)`.
    #[must_use]
    pub fn reserve_salt(pair: &TokenPair) -> B256 {
        let mut packed = [0u8; 40];
        packed[..20].copy_from_slice(pair.token0().as_slice());
        packed[20..].copy_from_slice(pair.token1().as_slice());
        keccak256(packed)
    }

    /// Salt of a tick-based pool: `keccak256(abi.encode(token0, token1, fee))`.
    #[must_use]
    pub fn tick_salt(pair: &TokenPair, fee: FeeTier) -> B256 {
        let mut encoded = [0u8; 96];
        encoded[12..32].copy_from_slice(pair.token0().as_slice());
        encoded[44..64].copy_from_slice(pair.token1().as_slice());
        encoded[64..].copy_from_slice(&U256::from(fee.pips()).to_be_bytes::<32>());
        keccak256(encoded)
    }

    /// Last 20 bytes of `keccak256(0xff ‖ factory ‖ salt ‖ init_code_hash)`.
    #[must_use]
    pub fn create2_address(&self, salt: B256) -> Address {
        let mut preimage = [0u8; 85];
        preimage[0] = 0xff;
        preimage[1..21].copy_from_slice(self.factory.as_slice());
        preimage[21..53].copy_from_slice(salt.as_slice());
        preimage[53..].copy_from_slice(self.init_code_hash.as_slice());
        Address::from_slice(&keccak256(preimage)[12..])
    }

    /// Address of the reserve-based pool for a token pair, in either order.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPath`](crate::error::RouterError::InvalidPath)
    /// for identical or zero token addresses.
    pub fn reserve_pool_address(&self, token_a: Address, token_b: Address) -> Result<Address> {
        let pair = TokenPair::new(token_a, token_b)?;
        Ok(self.create2_address(Self::reserve_salt(&pair)))
    }

    /// Address of the tick-based pool for a token pair and fee tier.
    ///
    /// # Errors
    ///
    /// Same as [`reserve_pool_address`](Self::reserve_pool_address).
    pub fn tick_pool_address(
        &self,
        token_a: Address,
        token_b: Address,
        fee: FeeTier,
    ) -> Result<Address> {
        let pair = TokenPair::new(token_a, token_b)?;
        Ok(self.create2_address(Self::tick_salt(&pair, fee)))
    }

    /// Address of the pool for a hop: tick-based when a fee tier is given,
    /// reserve-based otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`reserve_pool_address`](Self::reserve_pool_address).
    pub fn pool_address(
        &self,
        token_a: Address,
        token_b: Address,
        fee: Option<FeeTier>,
    ) -> Result<Address> {
        match fee {
            Some(fee) => self.tick_pool_address(token_a, token_b, fee),
            None => self.reserve_pool_address(token_a, token_b),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use alloy_primitives::{address, b256};

    use super::*;

    const USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
    const WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");

    fn reserve_locator() -> PoolLocator {
        PoolLocator::new(
            address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"),
            b256!("96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f"),
        )
    }

    fn tick_locator() -> PoolLocator {
        PoolLocator::new(
            address!("1F98431c8aD98523631AE4a59f267346ea31F984"),
            b256!("e34f199b19b2b4f47f68442619d555527d244f78a3297ea89325f843f87b8b54"),
        )
    }

    #[test]
    fn reserve_pool_mainnet_vector() {
        assert_eq!(
            reserve_locator().reserve_pool_address(USDC, WETH),
            Ok(address!("B4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc"))
        );
    }

    #[test]
    fn tick_pool_mainnet_vectors() {
        let locator = tick_locator();
        assert_eq!(
            locator.tick_pool_address(USDC, WETH, FeeTier::LOW),
            Ok(address!("88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640"))
        );
        assert_eq!(
            locator.tick_pool_address(WETH, USDC, FeeTier::MEDIUM),
            Ok(address!("8ad599c3A0ff1De082011EFDDc58f1908eb6e6D8"))
        );
    }

    #[test]
    fn matches_alloy_create2() {
        let locator = tick_locator();
        let Ok(pair) = TokenPair::new(USDC, WETH) else {
            panic!("expected valid pair");
        };
        let salt = PoolLocator::tick_salt(&pair, FeeTier::HIGH);
        assert_eq!(
            locator.create2_address(salt),
            locator.factory.create2(salt.0, locator.init_code_hash.0)
        );
    }

    #[test]
    fn order_independent() {
        let locator = reserve_locator();
        assert_eq!(
            locator.pool_address(USDC, WETH, None),
            locator.pool_address(WETH, USDC, None)
        );
    }

    #[test]
    fn fee_selects_protocol_salt() {
        let locator = reserve_locator();
        assert_ne!(
            locator.pool_address(USDC, WETH, None),
            locator.pool_address(USDC, WETH, Some(FeeTier::MEDIUM))
        );
    }

    #[test]
    fn identical_tokens_rejected() {
        assert!(reserve_locator().reserve_pool_address(USDC, USDC).is_err());
    }
}
