//! Host state: the ledger, the deployed pools and the event log.

use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::{Address, U256};
use tracing::{debug, warn};

use super::InMemoryLedger;
use crate::domain::{TokenDescriptor, TradeRecord};
use crate::error::{Result, RouterError};
use crate::pools::PoolBox;
use crate::traits::{PoolState, TokenLedger};

/// Everything a top-level swap can touch.
///
/// Pools are stored by address.  While a pool executes it is *lent out*:
/// removed from the registry and handed to the caller together with the
/// rest of the state, so pool code and engine callbacks can both mutate
/// the ledger.  A lent pool cannot be entered again until it is returned.
///
/// [`ChainState::atomically`] gives all-or-nothing semantics: on error
/// every balance, pool and event change made by the body is discarded.
#[derive(Debug, Clone, Default)]
pub struct ChainState {
    ledger: InMemoryLedger,
    pools: BTreeMap<Address, PoolBox>,
    lent: BTreeSet<Address>,
    events: Vec<TradeRecord>,
}

impl ChainState {
    /// Creates a host around an existing ledger.
    #[must_use]
    pub fn new(ledger: InMemoryLedger) -> Self {
        Self {
            ledger,
            ..Self::default()
        }
    }

    /// The token ledger.
    #[must_use]
    pub const fn ledger(&self) -> &InMemoryLedger {
        &self.ledger
    }

    /// Mutable access to the token ledger.
    pub fn ledger_mut(&mut self) -> &mut InMemoryLedger {
        &mut self.ledger
    }

    /// Installs `pool` at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PoolExists`] if the address is taken.
    pub fn deploy_pool(&mut self, address: Address, pool: PoolBox) -> Result<()> {
        if self.pools.contains_key(&address) || self.lent.contains(&address) {
            return Err(RouterError::PoolExists(address));
        }
        debug!(%address, kind = %pool.kind(), "pool deployed");
        self.pools.insert(address, pool);
        Ok(())
    }

    /// The pool at `address`.
    ///
    /// # Errors
    ///
    /// [`RouterError::PoolLocked`] while the pool is executing, otherwise
    /// [`RouterError::UnknownPool`] if nothing is deployed there.
    pub fn pool(&self, address: Address) -> Result<&PoolBox> {
        if self.lent.contains(&address) {
            return Err(RouterError::PoolLocked(address));
        }
        self.pools
            .get(&address)
            .ok_or(RouterError::UnknownPool(address))
    }

    /// Addresses of every deployed pool.
    pub fn pool_addresses(&self) -> impl Iterator<Item = &Address> {
        self.pools.keys()
    }

    /// Runs `f` with the pool at `address` taken out of the registry.
    ///
    /// The pool is returned to the registry whatever `f` returns.
    ///
    /// # Errors
    ///
    /// [`RouterError::PoolLocked`] if the pool is already executing,
    /// [`RouterError::UnknownPool`] if nothing is deployed there, and any
    /// error returned by `f`.
    pub fn lend_pool<T>(
        &mut self,
        address: Address,
        f: impl FnOnce(&mut PoolBox, &mut Self) -> Result<T>,
    ) -> Result<T> {
        if self.lent.contains(&address) {
            return Err(RouterError::PoolLocked(address));
        }
        let mut pool = self
            .pools
            .remove(&address)
            .ok_or(RouterError::UnknownPool(address))?;
        self.lent.insert(address);
        let result = f(&mut pool, self);
        self.lent.remove(&address);
        self.pools.insert(address, pool);
        result
    }

    /// Runs `body` against a checkpoint and restores the checkpoint if it
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns the error of `body` after rolling back.
    pub fn atomically<T>(&mut self, body: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let ledger = self.ledger.clone();
        let pools = self.pools.clone();
        let events = self.events.len();
        let result = body(self);
        if let Err(err) = &result {
            warn!(error = %err, "swap aborted, rolling back");
            self.ledger = ledger;
            self.pools = pools;
            self.lent.clear();
            self.events.truncate(events);
        }
        result
    }

    /// Appends a trade record to the event log.
    pub fn emit(&mut self, record: TradeRecord) {
        self.events.push(record);
    }

    /// Every trade record emitted so far.
    #[must_use]
    pub fn events(&self) -> &[TradeRecord] {
        &self.events
    }
}

impl TokenLedger for ChainState {
    fn balance_of(&self, token: Address, holder: Address) -> Result<U256> {
        self.ledger.balance_of(token, holder)
    }

    fn native_balance(&self, holder: Address) -> U256 {
        self.ledger.native_balance(holder)
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<U256> {
        self.ledger.transfer(token, from, to, amount)
    }

    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<U256> {
        self.ledger.transfer_from(token, spender, from, to, amount)
    }

    fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: U256) {
        self.ledger.approve(token, owner, spender, amount);
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.ledger.allowance(token, owner, spender)
    }

    fn metadata(&self, token: Address) -> Result<TokenDescriptor> {
        self.ledger.metadata(token)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ReserveConfig;
    use crate::pools::ConstantProductPair;
    use crate::traits::FromConfig;

    const TOKEN_A: Address = Address::repeat_byte(0x11);
    const TOKEN_B: Address = Address::repeat_byte(0x22);
    const POOL: Address = Address::repeat_byte(0xee);
    const ALICE: Address = Address::repeat_byte(0xa1);

    fn host() -> ChainState {
        let mut ledger = InMemoryLedger::new();
        ledger.register_token(TokenDescriptor::new("A", "Token A", TOKEN_A, 18));
        ledger.register_token(TokenDescriptor::new("B", "Token B", TOKEN_B, 18));
        ledger.mint(TOKEN_A, ALICE, U256::from(100u64));
        let mut host = ChainState::new(ledger);
        let Ok(config) =
            ReserveConfig::new(TOKEN_A, TOKEN_B, U256::from(10u64), U256::from(10u64))
        else {
            panic!("valid config");
        };
        let Ok(pair) = ConstantProductPair::from_config(&config) else {
            panic!("valid config");
        };
        let Ok(()) = host.deploy_pool(POOL, PoolBox::Reserve(Box::new(pair))) else {
            panic!("fresh address");
        };
        host
    }

    #[test]
    fn duplicate_deploy_rejected() {
        let mut host = host();
        let Ok(pool) = host.pool(POOL).cloned() else {
            panic!("deployed");
        };
        assert_eq!(
            host.deploy_pool(POOL, pool),
            Err(RouterError::PoolExists(POOL))
        );
    }

    #[test]
    fn lent_pool_is_locked() {
        let mut host = host();
        let result = host.lend_pool(POOL, |_, host| {
            assert_eq!(host.pool(POOL).err(), Some(RouterError::PoolLocked(POOL)));
            host.lend_pool(POOL, |_, _| Ok(()))
        });
        assert_eq!(result, Err(RouterError::PoolLocked(POOL)));
        assert!(host.pool(POOL).is_ok());
    }

    #[test]
    fn unknown_pool() {
        let mut host = host();
        let other = Address::repeat_byte(0x01);
        assert_eq!(
            host.lend_pool(other, |_, _| Ok(())),
            Err(RouterError::UnknownPool(other))
        );
    }

    #[test]
    fn atomically_rolls_back_on_error() {
        let mut host = host();
        let result: Result<()> = host.atomically(|host| {
            host.transfer(TOKEN_A, ALICE, POOL, U256::from(40u64))?;
            Err(RouterError::InvalidSwap)
        });
        assert_eq!(result, Err(RouterError::InvalidSwap));
        assert_eq!(host.balance_of(TOKEN_A, ALICE), Ok(U256::from(100u64)));
        assert_eq!(host.balance_of(TOKEN_A, POOL), Ok(U256::ZERO));
    }

    #[test]
    fn atomically_keeps_success() {
        let mut host = host();
        let result = host.atomically(|host| host.transfer(TOKEN_A, ALICE, POOL, U256::from(40u64)));
        assert_eq!(result, Ok(U256::from(40u64)));
        assert_eq!(host.balance_of(TOKEN_A, POOL), Ok(U256::from(40u64)));
    }
}
