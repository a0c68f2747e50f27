//! The auditable report emitted once per completed swap.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::{FeeTier, SwapStep, TokenDescriptor, TradeType};

/// Read-only view of a pool at report time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Metadata of the pool's lower-address token.
    pub token0_info: TokenDescriptor,
    /// Metadata of the pool's higher-address token.
    pub token1_info: TokenDescriptor,
    /// Pool address.
    pub pool_address: Address,
    /// Fee tier in pips.
    pub fee_tier: FeeTier,
    /// Tick spacing; `0` for reserve-based pools.
    pub tick_spacing: u32,
}

/// Balances of the initiating trader around the swap.
///
/// For the wrapped-native asset a balance is the wrapped balance plus the
/// native balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraderBalanceSnapshot {
    /// Sold-token balance read before execution.
    pub sold_before: U256,
    /// `sold_before − amount_sold`, saturating at zero.
    pub sold_after: U256,
    /// Bought-token balance read before execution.
    pub bought_before: U256,
    /// `bought_before + amount_bought`, saturating at the maximum.
    pub bought_after: U256,
}

impl TraderBalanceSnapshot {
    /// Finalizes the "after" side from the "before" balances and the
    /// realized trade amounts.
    ///
    /// Saturating arithmetic is used because unrelated activity in the same
    /// call can leave the "before" balance below the sold amount.
    #[must_use]
    pub fn finalize(
        sold_before: U256,
        bought_before: U256,
        amount_sold: U256,
        amount_bought: U256,
    ) -> Self {
        Self {
            sold_before,
            sold_after: sold_before.saturating_sub(amount_sold),
            bought_before,
            bought_after: bought_before.saturating_add(amount_bought),
        }
    }
}

/// Canonical report of one top-level swap.
///
/// Built once by the engine that executed the swap, after every slippage
/// check passed, and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Account that initiated the trade.
    pub trader: Address,
    /// USD value of the trade with 6 decimals; `0` when unpriced.
    pub usd_value: U256,
    /// Protocol tag of the engine that executed the trade.
    pub exchange_tag: String,
    /// Total input sold.
    pub amount_sold: U256,
    /// Metadata of the sold token.
    pub token_sold_info: TokenDescriptor,
    /// Total output bought.
    pub amount_bought: U256,
    /// Metadata of the bought token.
    pub token_bought_info: TokenDescriptor,
    /// Pools traversed, in route order.
    pub route: Vec<PoolSnapshot>,
    /// Trader balances around the swap.
    pub balances: TraderBalanceSnapshot,
    /// Which side the caller fixed.
    pub trade_type: TradeType,
    /// Per-hop amounts and fees, in route order.
    pub hop_fees: Vec<SwapStep>,
    /// USD value of each hop's fee, aligned with `hop_fees`.
    pub hop_fees_usd: Vec<U256>,
}

impl TradeRecord {
    /// Sum of the per-hop fees valued in USD.
    #[must_use]
    pub fn total_fees_usd(&self) -> U256 {
        self.hop_fees_usd
            .iter()
            .fold(U256::ZERO, |acc, fee| acc.saturating_add(*fee))
    }

    /// Serializes the record as a JSON event payload.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::ConfigParse`](crate::error::RouterError::ConfigParse)
    /// if serialization fails.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
