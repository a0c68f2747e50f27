//! Router and pool configuration.
//!
//! This module contains [`RouterConfig`], the router-wide settings parsed
//! from JSON, and [`PoolConfig`], the declarative blueprint the factory
//! uses to deploy each pool type.

mod pool_config;
mod reserve;
mod router_config;
mod tick;

pub use pool_config::PoolConfig;
pub use reserve::ReserveConfig;
pub use router_config::{ProtocolConfig, RouterConfig};
pub use tick::TickConfig;
