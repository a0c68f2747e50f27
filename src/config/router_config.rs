//! Router-wide configuration.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouterError};
use crate::path::PoolLocator;

/// Factory, init-code hash and report tag of one pool protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Factory that deploys the protocol's pools.
    pub factory: Address,
    /// `keccak256` of the pool creation code.
    pub init_code_hash: B256,
    /// Tag written to trade records executed on this protocol.
    pub exchange_tag: String,
}

impl ProtocolConfig {
    /// Creates a protocol configuration.
    #[must_use]
    pub fn new(factory: Address, init_code_hash: B256, exchange_tag: impl Into<String>) -> Self {
        Self {
            factory,
            init_code_hash,
            exchange_tag: exchange_tag.into(),
        }
    }

    /// Validates the protocol parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfiguration`] for a zero factory, a
    /// zero init-code hash or an empty exchange tag.
    pub fn validate(&self) -> Result<()> {
        if self.factory == Address::ZERO {
            return Err(RouterError::InvalidConfiguration("zero factory address"));
        }
        if self.init_code_hash == B256::ZERO {
            return Err(RouterError::InvalidConfiguration("zero init code hash"));
        }
        if self.exchange_tag.trim().is_empty() {
            return Err(RouterError::InvalidConfiguration("empty exchange tag"));
        }
        Ok(())
    }

    /// Address derivation for this protocol.
    #[must_use]
    pub const fn locator(&self) -> PoolLocator {
        PoolLocator::new(self.factory, self.init_code_hash)
    }
}

/// Everything the two engines and the accountant need to run.
///
/// # Examples
///
/// ```
/// use hydra_router::config::RouterConfig;
///
/// let json = r#"{
///     "engine_address": "0x00000000000000000000000000000000000000e0",
///     "wrapped_native": "0x4444444444444444444444444444444444444444",
///     "usd_tokens": ["0x5555555555555555555555555555555555555555"],
///     "reserve_protocol": {
///         "factory": "0x00000000000000000000000000000000000000f2",
///         "init_code_hash": "0x96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f",
///         "exchange_tag": "reserve-v2"
///     },
///     "tick_protocol": {
///         "factory": "0x00000000000000000000000000000000000000f3",
///         "init_code_hash": "0xe34f199b19b2b4f47f68442619d555527d244f78a3297ea89325f843f87b8b54",
///         "exchange_tag": "tick-v3"
///     }
/// }"#;
/// let config = RouterConfig::from_json(json);
/// assert!(config.is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// The router's own address: custody of intermediate amounts, payer of
    /// engine-held legs and spender of user allowances.
    pub engine_address: Address,
    /// Wrapped-native token, valued through the price feed.
    pub wrapped_native: Address,
    /// Tokens valued one-to-one in USD.
    pub usd_tokens: Vec<Address>,
    /// Reserve-based protocol.
    pub reserve_protocol: ProtocolConfig,
    /// Tick-based protocol.
    pub tick_protocol: ProtocolConfig,
}

impl RouterConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`RouterError::ConfigParse`] for malformed JSON, otherwise the
    /// errors of [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfiguration`] for a zero engine or
    /// wrapped-native address, an invalid protocol, or two protocols
    /// sharing a factory.
    pub fn validate(&self) -> Result<()> {
        if self.engine_address == Address::ZERO {
            return Err(RouterError::InvalidConfiguration("zero engine address"));
        }
        if self.wrapped_native == Address::ZERO {
            return Err(RouterError::InvalidConfiguration(
                "zero wrapped native address",
            ));
        }
        self.reserve_protocol.validate()?;
        self.tick_protocol.validate()?;
        if self.reserve_protocol.factory == self.tick_protocol.factory {
            return Err(RouterError::InvalidConfiguration(
                "protocols must use distinct factories",
            ));
        }
        Ok(())
    }

    /// Whether `token` is valued one-to-one in USD.
    #[must_use]
    pub fn is_usd_token(&self, token: Address) -> bool {
        self.usd_tokens.contains(&token)
    }
}
