//! Fundamental domain value types used throughout the router.
//!
//! This module contains the value types that model a routed swap: token
//! pairs and metadata, fee tiers and fee policies, hops, per-hop swap steps,
//! and the trade record assembled once a swap completes.  Types that carry
//! invariants use validated constructors.

mod fee_policy;
mod fee_tier;
mod hop;
mod rounding;
mod swap_spec;
mod swap_step;
mod token;
mod token_pair;
mod trade_record;

pub use fee_policy::FeePolicy;
pub use fee_tier::{FeeTier, PIPS_DENOMINATOR};
pub use hop::{Hop, PoolKind};
pub use rounding::Rounding;
pub use swap_spec::{AmountIn, TradeType};
pub use swap_step::SwapStep;
pub use token::TokenDescriptor;
pub use token_pair::TokenPair;
pub use trade_record::{PoolSnapshot, TradeRecord, TraderBalanceSnapshot};
