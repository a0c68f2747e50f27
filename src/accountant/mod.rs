//! Trade accounting: USD valuation, trader balances and trade records.
//!
//! Engines hand the accountant a [`Settlement`] once every slippage check
//! has passed.  The accountant values the trade and each hop's fee with a
//! [`UsdValuator`], snapshots the pools it crossed, finalizes the
//! trader's [`BalanceProbe`] and emits the resulting
//! [`TradeRecord`](crate::domain::TradeRecord) into the host.

mod balances;
mod report;
mod valuation;

pub use balances::{trader_balance, BalanceProbe};
pub use report::{pool_snapshot, Settlement, TradeAccountant};
pub use valuation::UsdValuator;
