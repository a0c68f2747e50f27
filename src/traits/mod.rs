//! Core trait abstractions at the router's seams.
//!
//! The engines talk to the outside world only through these traits:
//! [`TokenLedger`] for balances and transfers, [`PriceFeed`] for the
//! wrapped-native price, [`ReservePool`] and [`TickPool`] for the two pool
//! protocols, and [`SwapCallback`] for the tick protocol's settlement
//! callback.  [`FromConfig`] builds pools from configuration.

mod from_config;
mod ledger;
mod pool;
mod price_feed;

pub use from_config::FromConfig;
pub use ledger::TokenLedger;
pub use pool::{PoolState, ReservePool, SwapCallback, TickPool};
pub use price_feed::{PriceData, PriceFeed};
