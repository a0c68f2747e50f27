//! Tick-protocol router example (concentrated liquidity, callback settlement).
//!
//! Demonstrates deploying concentrated-liquidity pools at their fee-specific
//! derived addresses, encoding a packed multi-hop path, and executing an
//! exact-input swap (engine-driven loop) and an exact-output swap (nested
//! callbacks paid backwards from the last pool).
//!
//! # Run
//!
//! ```bash
//! cargo run --example callback_router
//! ```

use alloy_primitives::{Address, B256, U256};
use hydra_router::chain::{ChainState, InMemoryLedger, StaticPriceFeed};
use hydra_router::config::{PoolConfig, ProtocolConfig, RouterConfig, TickConfig};
use hydra_router::domain::{AmountIn, FeeTier, TokenDescriptor};
use hydra_router::engine::CallbackRouter;
use hydra_router::factory::DefaultPoolFactory;
use hydra_router::math::Q96;
use hydra_router::path::Path;
use hydra_router::traits::TokenLedger;

const ONE: u64 = 1_000_000_000_000_000_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Callback Router (concentrated liquidity) ===\n");

    // ── 1. Define tokens and accounts ───────────────────────────────────
    let (a, b, c) = (
        Address::repeat_byte(0x11),
        Address::repeat_byte(0x22),
        Address::repeat_byte(0x33),
    );
    let engine = Address::repeat_byte(0xe0);
    let trader = Address::repeat_byte(0xa1);
    let recipient = Address::repeat_byte(0xb0);

    let mut ledger = InMemoryLedger::new();
    for (token, symbol) in [(a, "AAA"), (b, "BBB"), (c, "CCC")] {
        ledger.register_token(TokenDescriptor::new(symbol, symbol, token, 18));
    }
    ledger.mint(a, trader, U256::from(100u64) * U256::from(ONE));
    ledger.approve(a, trader, engine, U256::MAX);
    let mut host = ChainState::new(ledger);

    let config = RouterConfig {
        engine_address: engine,
        wrapped_native: Address::repeat_byte(0x44),
        usd_tokens: vec![],
        reserve_protocol: ProtocolConfig::new(
            Address::repeat_byte(0xf2),
            B256::repeat_byte(0x96),
            "reserve-v2",
        ),
        tick_protocol: ProtocolConfig::new(
            Address::repeat_byte(0xf3),
            B256::repeat_byte(0xe3),
            "tick-v3",
        ),
    };

    // ── 2. Deploy two pools at price 1.0 with different fee tiers ──────
    //    Liquidity L = 10 000 tokens; the pool address depends on the fee.
    let locator = config.tick_protocol.locator();
    let liquidity = 10_000u128 * u128::from(ONE);
    for (x, y, fee, spacing) in [(a, b, FeeTier::MEDIUM, 60), (b, c, FeeTier::LOW, 10)] {
        let pool = TickConfig::new(x, y, fee, spacing, Q96, liquidity)?;
        let address = DefaultPoolFactory::deploy(&mut host, &locator, &PoolConfig::Tick(pool))?;
        println!("Deployed {}-pip pool at {address}", fee.pips());
    }

    // ── 3. Encode the path A -(0.30%)-> B -(0.05%)-> C ─────────────────
    let path = Path::encode(&[a, b, c], &[FeeTier::MEDIUM, FeeTier::LOW])?;
    println!("\nPath: {} pools, {} bytes", path.num_pools(), path.as_bytes().len());

    let mut router = CallbackRouter::new(config, StaticPriceFeed::unavailable())?;

    // ── 4. Exact input: sell 10 A ──────────────────────────────────────
    let record = router.swap_exact_input(
        &mut host,
        &path,
        recipient,
        AmountIn::Exact(U256::from(10u64) * U256::from(ONE)),
        U256::ZERO,
        trader,
    )?;
    println!("\n--- Exact input: sell 10 AAA ---");
    println!("  Sold:        {}", record.amount_sold);
    println!("  Bought:      {}", record.amount_bought);
    for (i, step) in record.hop_fees.iter().enumerate() {
        println!(
            "  Hop {i}:       in {} out {} fee {}",
            step.amount_in, step.amount_out, step.fee_in_token_in
        );
    }

    // ── 5. Exact output: buy exactly 5 C for at most 6 A ───────────────
    let wanted = U256::from(5u64) * U256::from(ONE);
    let maximum = U256::from(6u64) * U256::from(ONE);
    let record = router.swap_exact_output(&mut host, &path, recipient, wanted, maximum, trader)?;
    println!("\n--- Exact output: buy 5 CCC ---");
    println!("  Paid:        {}", record.amount_sold);
    println!("  Received:    {}", record.amount_bought);
    println!("  In progress: {}", router.exact_output_in_progress());

    // ── 6. A too-tight bound aborts the whole nested chain ─────────────
    match router.swap_exact_output(&mut host, &path, recipient, wanted, U256::from(1u64), trader) {
        Err(err) => println!("\nRejected as expected: {err}"),
        Ok(_) => println!("\nUnexpectedly filled"),
    }

    println!("\nRecipient CCC balance: {}", host.balance_of(c, recipient)?);
    println!("Trade record JSON:\n{}", record.to_json()?);
    println!("\nDone.");
    Ok(())
}
