//! In-memory token ledger.

use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use tracing::trace;

use crate::domain::TokenDescriptor;
use crate::error::{Result, RouterError};
use crate::traits::TokenLedger;

const BPS_DENOMINATOR: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
struct TokenEntry {
    descriptor: TokenDescriptor,
    transfer_fee_bps: u16,
}

/// Registry of tokens with their balances, allowances and the native
/// balance of every account.
///
/// Tokens must be registered before they can move.  A token registered
/// with a transfer fee burns that share of every transfer, so the
/// recipient receives less than was sent.
///
/// # Examples
///
/// ```
/// use alloy_primitives::{Address, U256};
/// use hydra_router::chain::InMemoryLedger;
/// use hydra_router::domain::TokenDescriptor;
/// use hydra_router::traits::TokenLedger;
///
/// let token = Address::repeat_byte(0x11);
/// let alice = Address::repeat_byte(0xa1);
/// let bob = Address::repeat_byte(0xb0);
///
/// let mut ledger = InMemoryLedger::default();
/// ledger.register_token(TokenDescriptor::new("TKA", "Token A", token, 18));
/// ledger.mint(token, alice, U256::from(100));
/// let received = ledger.transfer(token, alice, bob, U256::from(40));
/// assert_eq!(received, Ok(U256::from(40)));
/// assert_eq!(ledger.balance_of(token, bob), Ok(U256::from(40)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    tokens: BTreeMap<Address, TokenEntry>,
    balances: BTreeMap<(Address, Address), U256>,
    allowances: BTreeMap<(Address, Address, Address), U256>,
    native: BTreeMap<Address, U256>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a standard token.
    pub fn register_token(&mut self, descriptor: TokenDescriptor) {
        self.register_fee_on_transfer_token(descriptor, 0);
    }

    /// Registers a token that burns `transfer_fee_bps` of every transfer.
    pub fn register_fee_on_transfer_token(
        &mut self,
        descriptor: TokenDescriptor,
        transfer_fee_bps: u16,
    ) {
        self.tokens.insert(
            descriptor.address,
            TokenEntry {
                descriptor,
                transfer_fee_bps,
            },
        );
    }

    /// Whether `token` is registered.
    #[must_use]
    pub fn is_registered(&self, token: Address) -> bool {
        self.tokens.contains_key(&token)
    }

    /// Credits `amount` of `token` to `holder` out of thin air.
    pub fn mint(&mut self, token: Address, holder: Address, amount: U256) {
        let balance = self.balances.entry((token, holder)).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Sets the native balance of `holder`.
    pub fn set_native_balance(&mut self, holder: Address, amount: U256) {
        self.native.insert(holder, amount);
    }

    fn entry(&self, token: Address) -> Result<&TokenEntry> {
        self.tokens.get(&token).ok_or(RouterError::UnknownToken(token))
    }

    fn balance(&self, token: Address, holder: Address) -> U256 {
        self.balances
            .get(&(token, holder))
            .copied()
            .unwrap_or_default()
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, token: Address, holder: Address) -> Result<U256> {
        self.entry(token)?;
        Ok(self.balance(token, holder))
    }

    fn native_balance(&self, holder: Address) -> U256 {
        self.native.get(&holder).copied().unwrap_or_default()
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<U256> {
        let fee_bps = self.entry(token)?.transfer_fee_bps;
        let from_balance = self.balance(token, from);
        if from_balance < amount {
            return Err(RouterError::InsufficientBalance {
                token,
                holder: from,
            });
        }
        let burned = amount
            .checked_mul(U256::from(fee_bps))
            .ok_or(RouterError::Overflow("transfer fee"))?
            / U256::from(BPS_DENOMINATOR);
        let received = amount - burned;

        self.balances.insert((token, from), from_balance - amount);
        let to_balance = self.balance(token, to);
        self.balances.insert(
            (token, to),
            to_balance
                .checked_add(received)
                .ok_or(RouterError::Overflow("recipient balance"))?,
        );
        trace!(%token, %from, %to, %amount, %received, "transfer");
        Ok(received)
    }

    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<U256> {
        if spender != from {
            let allowed = self.allowance(token, from, spender);
            if allowed < amount {
                return Err(RouterError::InsufficientAllowance {
                    token,
                    owner: from,
                    spender,
                });
            }
            if allowed != U256::MAX {
                self.allowances
                    .insert((token, from, spender), allowed - amount);
            }
        }
        self.transfer(token, from, to, amount)
    }

    fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: U256) {
        self.allowances.insert((token, owner, spender), amount);
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn metadata(&self, token: Address) -> Result<TokenDescriptor> {
        Ok(self.entry(token)?.descriptor.clone())
    }
}
