//! Default pool factory implementation.

use alloy_primitives::{Address, U256};
use tracing::info;

use crate::chain::ChainState;
use crate::config::PoolConfig;
use crate::error::Result;
use crate::path::PoolLocator;
use crate::pools::{ConcentratedPool, ConstantProductPair, PoolBox};
use crate::traits::{FromConfig, PoolState, ReservePool};

/// Stateless factory for creating and deploying pools from configuration.
///
/// [`create`](Self::create) matches on the [`PoolConfig`] variant,
/// delegates to the pool's [`FromConfig`] implementation and wraps the
/// result in a [`PoolBox`].  [`deploy`](Self::deploy) additionally places
/// the pool into a host at its derived address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefaultPoolFactory;

impl DefaultPoolFactory {
    /// Creates a new pool instance from the given configuration.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidConfiguration`] or
    ///   [`RouterError::InvalidPath`] if the configuration is invalid.
    /// - Any error propagated from the pool's `from_config` method.
    ///
    /// [`RouterError::InvalidConfiguration`]: crate::error::RouterError::InvalidConfiguration
    /// [`RouterError::InvalidPath`]: crate::error::RouterError::InvalidPath
    pub fn create(config: &PoolConfig) -> Result<PoolBox> {
        config.validate()?;

        match config {
            PoolConfig::Reserve(cfg) => {
                let pool = ConstantProductPair::from_config(cfg)?;
                Ok(PoolBox::Reserve(Box::new(pool)))
            }
            PoolConfig::Tick(cfg) => {
                let pool = ConcentratedPool::from_config(cfg)?;
                Ok(PoolBox::Tick(Box::new(pool)))
            }
        }
    }

    /// Creates the pool, installs it at the address `locator` derives for
    /// it, and mints the balances backing its state to that address.
    ///
    /// Reserve pools receive their configured reserves; tick pools receive
    /// the virtual reserves of their liquidity at the initial price.
    ///
    /// # Errors
    ///
    /// The errors of [`create`](Self::create), and
    /// [`RouterError::PoolExists`] if the derived address is taken.
    ///
    /// [`RouterError::PoolExists`]: crate::error::RouterError::PoolExists
    pub fn deploy(
        host: &mut ChainState,
        locator: &PoolLocator,
        config: &PoolConfig,
    ) -> Result<Address> {
        let pool = Self::create(config)?;
        let pair = pool.token_pair();
        let address = locator.pool_address(pair.token0(), pair.token1(), config.fee())?;
        let (amount0, amount1) = Self::backing_balances(&pool)?;

        host.deploy_pool(address, pool)?;
        let ledger = host.ledger_mut();
        ledger.mint(pair.token0(), address, amount0);
        ledger.mint(pair.token1(), address, amount1);
        info!(%address, kind = %config.kind(), "pool deployed via factory");
        Ok(address)
    }

    fn backing_balances(pool: &PoolBox) -> Result<(U256, U256)> {
        match pool {
            PoolBox::Reserve(p) => Ok(p.reserves()),
            PoolBox::Tick(p) => p.virtual_reserves(),
        }
    }
}
