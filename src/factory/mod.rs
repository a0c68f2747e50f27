//! Pool instantiation and deployment via the factory pattern.
//!
//! The [`DefaultPoolFactory`] builds pool instances from [`PoolConfig`]
//! values and deploys them into a [`ChainState`] at the address the
//! protocol's [`PoolLocator`] derives, funding the pool's balances so they
//! match its state.  Engines never look pools up by anything but that
//! derived address.
//!
//! # Usage
//!
//! ```rust
//! use alloy_primitives::{Address, B256, U256};
//! use hydra_router::chain::{ChainState, InMemoryLedger};
//! use hydra_router::config::{PoolConfig, ReserveConfig};
//! use hydra_router::factory::DefaultPoolFactory;
//! use hydra_router::path::PoolLocator;
//!
//! let a = Address::repeat_byte(0x11);
//! let b = Address::repeat_byte(0x22);
//! let locator = PoolLocator::new(Address::repeat_byte(0xf2), B256::repeat_byte(0x96));
//! let cfg = ReserveConfig::new(a, b, U256::from(1_000), U256::from(1_000)).expect("valid");
//!
//! let mut host = ChainState::new(InMemoryLedger::new());
//! let pool = DefaultPoolFactory::deploy(&mut host, &locator, &PoolConfig::Reserve(cfg))
//!     .expect("deployed");
//! assert_eq!(locator.pool_address(b, a, None).ok(), Some(pool));
//! ```
//!
//! [`PoolConfig`]: crate::config::PoolConfig
//! [`ChainState`]: crate::chain::ChainState
//! [`PoolLocator`]: crate::path::PoolLocator

mod default_factory;

pub use default_factory::DefaultPoolFactory;
