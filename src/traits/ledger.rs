//! Token ledger abstraction consumed by pools and engines.
//!
//! [`TokenLedger`] models the fungible-token standard the router settles
//! against: balances, transfers, allowance-based transfers and token
//! metadata.  Transfers return the amount the recipient actually received
//! so fee-on-transfer tokens are accounted for by balance deltas.

use alloy_primitives::{Address, U256};

use crate::domain::TokenDescriptor;
use crate::error::Result;

/// Balances, transfers and metadata of every token the router touches.
///
/// # Errors
///
/// Implementations report [`RouterError::InsufficientBalance`],
/// [`RouterError::InsufficientAllowance`] and [`RouterError::UnknownToken`]
/// through the crate [`Result`].
///
/// [`RouterError::InsufficientBalance`]: crate::error::RouterError::InsufficientBalance
/// [`RouterError::InsufficientAllowance`]: crate::error::RouterError::InsufficientAllowance
/// [`RouterError::UnknownToken`]: crate::error::RouterError::UnknownToken
pub trait TokenLedger {
    /// Balance of `token` held by `holder`.
    fn balance_of(&self, token: Address, holder: Address) -> Result<U256>;

    /// Native-asset balance of `holder`.
    fn native_balance(&self, holder: Address) -> U256;

    /// Moves `amount` of `token` from `from` to `to` and returns the amount
    /// `to` received.
    fn transfer(&mut self, token: Address, from: Address, to: Address, amount: U256)
        -> Result<U256>;

    /// Moves `amount` of `token` from `from` to `to` on behalf of `spender`,
    /// consuming allowance, and returns the amount `to` received.
    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<U256>;

    /// Sets the allowance of `spender` over `owner`'s `token`.
    fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: U256);

    /// Remaining allowance of `spender` over `owner`'s `token`.
    fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256;

    /// Symbol, name, address and decimals of `token`.
    fn metadata(&self, token: Address) -> Result<TokenDescriptor>;
}
