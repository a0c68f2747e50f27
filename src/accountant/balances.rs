//! Trader balance probes taken around a swap.

use alloy_primitives::{Address, U256};

use crate::domain::TraderBalanceSnapshot;
use crate::error::Result;
use crate::traits::TokenLedger;

/// Balance of `holder` as reported in trade records.
///
/// For the wrapped-native token the native balance is added, since a
/// trader holding either form owns the same asset.
///
/// # Errors
///
/// Returns [`RouterError::UnknownToken`](crate::error::RouterError::UnknownToken)
/// if the ledger does not know `token`.
pub fn trader_balance(
    ledger: &dyn TokenLedger,
    token: Address,
    holder: Address,
    wrapped_native: Address,
) -> Result<U256> {
    let balance = ledger.balance_of(token, holder)?;
    if token == wrapped_native {
        return Ok(balance.saturating_add(ledger.native_balance(holder)));
    }
    Ok(balance)
}

/// "Before" balances of a trader, read before a swap executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceProbe {
    sold_before: U256,
    bought_before: U256,
}

impl BalanceProbe {
    /// Reads the trader's balances of both sides of the trade.
    ///
    /// # Errors
    ///
    /// See [`trader_balance`].
    pub fn capture(
        ledger: &dyn TokenLedger,
        trader: Address,
        token_sold: Address,
        token_bought: Address,
        wrapped_native: Address,
    ) -> Result<Self> {
        Ok(Self {
            sold_before: trader_balance(ledger, token_sold, trader, wrapped_native)?,
            bought_before: trader_balance(ledger, token_bought, trader, wrapped_native)?,
        })
    }

    /// Completes the snapshot with the realized trade amounts.
    #[must_use]
    pub fn finish(self, amount_sold: U256, amount_bought: U256) -> TraderBalanceSnapshot {
        TraderBalanceSnapshot::finalize(
            self.sold_before,
            self.bought_before,
            amount_sold,
            amount_bought,
        )
    }
}
