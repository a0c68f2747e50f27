//! In-memory execution host.
//!
//! [`ChainState`] stands in for the chain a router runs on: it owns the
//! [`InMemoryLedger`], the deployed pools and the log of emitted trade
//! records, lends pools out while they execute, and rolls every change
//! back when a swap fails.  [`StaticPriceFeed`] is a fixed-answer
//! [`PriceFeed`](crate::traits::PriceFeed).

mod ledger;
mod price_feed;
mod state;

pub use ledger::InMemoryLedger;
pub use price_feed::StaticPriceFeed;
pub use state::ChainState;
