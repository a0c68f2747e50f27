//! Reserve-protocol router example (constant-product pairs, 0.30% fee).
//!
//! Demonstrates deploying constant-product pairs at their derived
//! addresses, quoting a two-hop route, and executing exact-input and
//! exact-output swaps with slippage bounds and USD-valued trade records.
//!
//! # Run
//!
//! ```bash
//! cargo run --example reserve_router
//! ```

use alloy_primitives::{Address, B256, I256, U256};
use hydra_router::chain::{ChainState, InMemoryLedger, StaticPriceFeed};
use hydra_router::config::{PoolConfig, ProtocolConfig, ReserveConfig, RouterConfig};
use hydra_router::domain::{AmountIn, TokenDescriptor};
use hydra_router::engine::ReserveRouter;
use hydra_router::error::RouterError;
use hydra_router::factory::DefaultPoolFactory;
use hydra_router::traits::TokenLedger;

fn units(amount: u64, decimals: u8) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(decimals))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Reserve Router (x · y = k, 0.30% fee) ===\n");

    // ── 1. Define tokens and accounts ───────────────────────────────────
    let weth = Address::repeat_byte(0x44);
    let usdc = Address::repeat_byte(0x55);
    let dai = Address::repeat_byte(0x66);
    let engine = Address::repeat_byte(0xe0);
    let trader = Address::repeat_byte(0xa1);

    let mut ledger = InMemoryLedger::new();
    ledger.register_token(TokenDescriptor::new("WETH", "Wrapped Ether", weth, 18));
    ledger.register_token(TokenDescriptor::new("USDC", "USD Coin", usdc, 6));
    ledger.register_token(TokenDescriptor::new("DAI", "Dai Stablecoin", dai, 18));
    ledger.mint(weth, trader, units(10, 18));
    ledger.approve(weth, trader, engine, U256::MAX);
    let mut host = ChainState::new(ledger);

    // ── 2. Configure the router: ETH priced at $2 000 (8 decimals) ─────
    let config = RouterConfig {
        engine_address: engine,
        wrapped_native: weth,
        usd_tokens: vec![usdc],
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
    let answer = I256::try_from(200_000_000_000i64)
        .map_err(|_| RouterError::Overflow("price answer"))?;
    let locator = config.reserve_protocol.locator();
    let router = ReserveRouter::new(config, StaticPriceFeed::new(answer, 8))?;

    // ── 3. Deploy WETH/USDC and USDC/DAI at their CREATE2 addresses ────
    let pools = [
        ReserveConfig::new(weth, usdc, units(1_000, 18), units(2_000_000, 6))?,
        ReserveConfig::new(usdc, dai, units(1_000_000, 6), units(1_000_000, 18))?,
    ];
    for pool in pools {
        let address = DefaultPoolFactory::deploy(&mut host, &locator, &PoolConfig::Reserve(pool))?;
        println!("Deployed pair at {address}");
    }

    // ── 4. Quote the route without executing ───────────────────────────
    let route = [weth, usdc, dai];
    let amount_in = units(1, 18);
    let quote = router.get_amounts_out(&host, amount_in, &route)?;
    println!("\nQuote for 1 WETH → DAI: {quote:?}");

    // ── 5. Exact input with 0.5% slippage tolerance ────────────────────
    let minimum = quote[2] * U256::from(995u64) / U256::from(1_000u64);
    let record = router.swap_exact_input(
        &mut host,
        &route,
        trader,
        AmountIn::Exact(amount_in),
        minimum,
        trader,
    )?;
    println!("\n--- Exact input: sell 1 WETH ---");
    println!("  Sold:        {} {}", record.amount_sold, record.token_sold_info.symbol);
    println!("  Bought:      {} {}", record.amount_bought, record.token_bought_info.symbol);
    println!("  USD value:   {} (6 decimals)", record.usd_value);
    println!("  Fees (USD):  {}", record.total_fees_usd());
    for (i, step) in record.hop_fees.iter().enumerate() {
        println!(
            "  Hop {i}:       in {} out {} fee_in {} fee_out {}",
            step.amount_in, step.amount_out, step.fee_in_token_in, step.fee_in_token_out
        );
    }

    // ── 6. Exact output: buy 500 DAI for at most 0.3 WETH ──────────────
    let wanted = units(500, 18);
    let needed = router.get_amounts_in(&host, wanted, &route)?;
    println!("\n--- Exact output: buy 500 DAI ---");
    println!("  Required input: {} WETH units", needed[0]);
    let record = router.swap_exact_output(&mut host, &route, trader, wanted, units(3, 17), trader)?;
    println!("  Sold:        {}", record.amount_sold);
    println!("  Bought:      {}", record.amount_bought);

    // ── 7. A bound one unit too tight rolls everything back ────────────
    let tight = router.get_amounts_in(&host, wanted, &route)?[0] - U256::from(1u64);
    let balance = host.balance_of(weth, trader)?;
    match router.swap_exact_output(&mut host, &route, trader, wanted, tight, trader) {
        Err(err) => println!("\nRejected as expected: {err}"),
        Ok(_) => println!("\nUnexpectedly filled"),
    }
    println!("  WETH balance unchanged: {}", host.balance_of(weth, trader)? == balance);

    println!("\nEvents emitted: {}", host.events().len());
    println!("\nDone.");
    Ok(())
}
