//! # Hydra Router
//!
//! Multi-hop swap execution for a decentralized-exchange aggregator.
//!
//! Given a caller-supplied route through liquidity pools of two AMM
//! protocol generations, the crate executes the swap hop by hop, enforces
//! the caller's slippage bound, and produces an auditable
//! [`TradeRecord`](domain::TradeRecord) with USD-valued amounts, per-hop
//! fees and trader balance deltas.
//!
//! - **Reserve protocol** (constant product, fixed 0.3% fee): every pool
//!   is funded before it swaps and sends its output straight into the next
//!   pool.  Executed by [`ReserveRouter`](engine::ReserveRouter).
//! - **Tick protocol** (concentrated liquidity, per-pool fee tier): every
//!   pool calls back into the engine for payment.  Exact-output swaps
//!   recurse backwards through those callbacks.  Executed by
//!   [`CallbackRouter`](engine::CallbackRouter).
//!
//! Pools are never looked up in a registry: their addresses are derived
//! from the sorted token pair (plus fee tier) with the CREATE2 scheme.
//!
//! # Quick Start
//!
//! ```rust
//! use alloy_primitives::{Address, B256, I256, U256};
//! use hydra_router::prelude::*;
//!
//! let (a, b) = (Address::repeat_byte(0x11), Address::repeat_byte(0x22));
//! let (trader, engine) = (Address::repeat_byte(0xa1), Address::repeat_byte(0xe0));
//! let config = RouterConfig {
//!     engine_address: engine,
//!     wrapped_native: Address::repeat_byte(0x44),
//!     usd_tokens: vec![b],
//!     reserve_protocol: ProtocolConfig::new(Address::repeat_byte(0xf2), B256::repeat_byte(0x96), "reserve-v2"),
//!     tick_protocol: ProtocolConfig::new(Address::repeat_byte(0xf3), B256::repeat_byte(0xe3), "tick-v3"),
//! };
//!
//! // 1. A host with two tokens and a funded trader
//! let mut ledger = InMemoryLedger::new();
//! ledger.register_token(TokenDescriptor::new("A", "Token A", a, 18));
//! ledger.register_token(TokenDescriptor::new("USD", "Dollar", b, 6));
//! ledger.mint(a, trader, U256::from(1_000));
//! ledger.approve(a, trader, engine, U256::MAX);
//! let mut host = ChainState::new(ledger);
//!
//! // 2. Deploy a pool at its derived address
//! let pool = ReserveConfig::new(a, b, U256::from(1_000), U256::from(1_000)).expect("valid");
//! DefaultPoolFactory::deploy(&mut host, &config.reserve_protocol.locator(), &pool.into())
//!     .expect("deployed");
//!
//! // 3. Sell 100 A for at least 90 USD
//! let router = ReserveRouter::new(config, StaticPriceFeed::new(I256::ONE, 8)).expect("valid");
//! let record = router
//!     .swap_exact_input(&mut host, &[a, b], trader, AmountIn::Exact(U256::from(100)), U256::from(90), trader)
//!     .expect("swap succeeded");
//!
//! assert_eq!(record.amount_bought, U256::from(90));
//! assert_eq!(record.usd_value, U256::from(90));
//! assert_eq!(host.events().len(), 1);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Caller     │  route + bounds
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │   Engines     │  ReserveRouter, CallbackRouter
//! └──────┬───────┘
//!        │ Path codec + PoolLocator
//!        ▼
//! ┌──────────────┐
//! │    Host       │  ChainState: ledger, pools (PoolBox), events
//! └──────┬───────┘
//!        │ realized amounts
//!        ▼
//! ┌──────────────┐
//! │  Accountant   │  USD valuation, balances, TradeRecord
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`engine`] | [`ReserveRouter`](engine::ReserveRouter) and [`CallbackRouter`](engine::CallbackRouter) |
//! | [`path`] | Packed path codec, [`PoolLocator`](path::PoolLocator) address derivation, callback context |
//! | [`accountant`] | USD valuation, trader balance probes, trade record assembly |
//! | [`chain`] | [`ChainState`](chain::ChainState) host, in-memory ledger, static price feed |
//! | [`pools`] | Reference pools and the [`PoolBox`](pools::PoolBox) dispatch enum |
//! | [`factory`] | [`DefaultPoolFactory`](factory::DefaultPoolFactory) for config-driven deployment |
//! | [`domain`] | Value types: fee tiers, hops, swap steps, trade records |
//! | [`traits`] | Seams: ledger, price feed, pool protocols, swap callback |
//! | [`config`] | [`RouterConfig`](config::RouterConfig) and pool blueprints |
//! | [`math`] | Exact 256-bit pool math |
//! | [`error`] | [`RouterError`](error::RouterError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod accountant;
pub mod chain;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod factory;
pub mod math;
pub mod path;
pub mod pools;
pub mod prelude;
pub mod traits;
