//! Generic construction trait for pool instantiation from configuration.
//!
//! [`FromConfig`] provides a uniform interface for creating pool instances
//! from their respective configuration structs.  Each pool type implements
//! `FromConfig<C>` for its own config variant, enabling the factory to
//! dispatch construction without `dyn` trait objects:
//!
//! ```text
//! PoolConfig::Reserve(cfg) => ConstantProductPair::from_config(&cfg)
//! PoolConfig::Tick(cfg)    => ConcentratedPool::from_config(&cfg)
//! ```
//!
//! Implementations validate every configuration invariant, so a
//! successfully constructed pool is in a valid initial state.

use crate::error::Result;

/// Builds a pool from its configuration.
///
/// # Errors
///
/// Returns [`RouterError::InvalidConfiguration`] (or a more specific
/// variant) if the configuration is invalid.
///
/// [`RouterError::InvalidConfiguration`]: crate::error::RouterError::InvalidConfiguration
pub trait FromConfig<C> {
    /// Creates a new pool instance from the given configuration.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    fn from_config(config: &C) -> Result<Self>
    where
        Self: Sized;
}
