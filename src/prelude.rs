//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use hydra_router::prelude::*;
//! ```
//!
//! This re-exports the engines, the host, the most frequently used domain
//! types, core traits, configuration types, error types, and factory
//! utilities so that consumers don't need to import from individual
//! submodules.

// Engines and accounting
pub use crate::accountant::{TradeAccountant, UsdValuator};
pub use crate::engine::{CallbackRouter, ReserveRouter};

// Host
pub use crate::chain::{ChainState, InMemoryLedger, StaticPriceFeed};

// Domain types
pub use crate::domain::{
    AmountIn, FeeTier, Hop, PoolKind, PoolSnapshot, SwapStep, TokenDescriptor, TokenPair,
    TradeRecord, TradeType, TraderBalanceSnapshot,
};

// Routes and addressing
pub use crate::path::{Path, PoolLocator};

// Core traits
pub use crate::traits::{
    FromConfig, PoolState, PriceFeed, ReservePool, SwapCallback, TickPool, TokenLedger,
};

// Configuration
pub use crate::config::{PoolConfig, ProtocolConfig, ReserveConfig, RouterConfig, TickConfig};

// Error types
pub use crate::error::{Result, RouterError};

// Factory and pool dispatch
pub use crate::factory::DefaultPoolFactory;
pub use crate::pools::PoolBox;
