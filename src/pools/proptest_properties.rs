//! Property-based tests using `proptest` for routing invariants.
//!
//! 1. **Address symmetry**: a pool's derived address ignores token order.
//! 2. **Fee non-negativity**: the fee-free output of a reserve hop is never
//!    below the charged output.
//! 3. **Invariant preservation**: a pair accepts its own quote and `k`
//!    never decreases.
//! 4. **Quote consistency**: paying `get_amount_in(out)` yields at least
//!    `out`.
//! 5. **Saturating snapshots**: trader "after" balances never wrap.
//! 6. **Hop chaining**: each decoded hop starts where the previous ended.

use alloy_primitives::{Address, B256, U256};
use proptest::prelude::*;

use crate::chain::InMemoryLedger;
use crate::config::ReserveConfig;
use crate::domain::{FeeTier, TokenDescriptor, TraderBalanceSnapshot};
use crate::math::{fee_free_amount_out, get_amount_in, get_amount_out};
use crate::path::{Path, PoolLocator};
use crate::pools::ConstantProductPair;
use crate::traits::{FromConfig, ReservePool, TokenLedger};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn locator() -> PoolLocator {
    PoolLocator::new(Address::repeat_byte(0xf2), B256::repeat_byte(0x96))
}

fn fee_tier() -> impl Strategy<Value = FeeTier> {
    prop_oneof![
        Just(FeeTier::LOWEST),
        Just(FeeTier::LOW),
        Just(FeeTier::MEDIUM),
        Just(FeeTier::HIGH),
    ]
}

fn distinct_tokens() -> impl Strategy<Value = (Address, Address)> {
    (1u8..=255, 1u8..=255)
        .prop_filter("distinct tokens", |(a, b)| a != b)
        .prop_map(|(a, b)| (Address::repeat_byte(a), Address::repeat_byte(b)))
}

const TOKEN_A: Address = Address::repeat_byte(0x11);
const TOKEN_B: Address = Address::repeat_byte(0x22);
const POOL: Address = Address::repeat_byte(0xee);
const TRADER: Address = Address::repeat_byte(0xa1);

fn funded_pair(reserve_a: u64, reserve_b: u64) -> (ConstantProductPair, InMemoryLedger) {
    let mut ledger = InMemoryLedger::new();
    ledger.register_token(TokenDescriptor::new("A", "Token A", TOKEN_A, 18));
    ledger.register_token(TokenDescriptor::new("B", "Token B", TOKEN_B, 18));
    ledger.mint(TOKEN_A, POOL, U256::from(reserve_a));
    ledger.mint(TOKEN_B, POOL, U256::from(reserve_b));
    ledger.mint(TOKEN_A, TRADER, U256::from(u64::MAX));
    let Ok(cfg) = ReserveConfig::new(
        TOKEN_A,
        TOKEN_B,
        U256::from(reserve_a),
        U256::from(reserve_b),
    ) else {
        panic!("valid config");
    };
    let Ok(pair) = ConstantProductPair::from_config(&cfg) else {
        panic!("valid pair");
    };
    (pair, ledger)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn pool_address_is_order_independent(
        (a, b) in distinct_tokens(),
        fee in proptest::option::of(fee_tier()),
    ) {
        let locator = locator();
        prop_assert_eq!(
            locator.pool_address(a, b, fee),
            locator.pool_address(b, a, fee)
        );
    }

    #[test]
    fn reserve_fee_in_output_is_non_negative(
        amount_in in 1u64..1_000_000_000,
        reserve_in in 1u64..1_000_000_000,
        reserve_out in 1u64..1_000_000_000,
    ) {
        let (amount_in, reserve_in, reserve_out) =
            (U256::from(amount_in), U256::from(reserve_in), U256::from(reserve_out));
        let Ok(charged) = get_amount_out(amount_in, reserve_in, reserve_out) else {
            panic!("quotable");
        };
        let Ok(free) = fee_free_amount_out(amount_in, reserve_in, reserve_out) else {
            panic!("quotable");
        };
        prop_assert!(free >= charged);
    }

    #[test]
    fn pair_accepts_its_quote_and_k_grows(
        reserve_a in 1_000u64..1_000_000_000,
        reserve_b in 1_000u64..1_000_000_000,
        amount_in in 1_000u64..1_000_000,
    ) {
        let (mut pair, mut ledger) = funded_pair(reserve_a, reserve_b);
        let (r0, r1) = pair.reserves();
        let Ok(out) = get_amount_out(U256::from(amount_in), r0, r1) else {
            panic!("quotable");
        };
        prop_assume!(!out.is_zero());
        let Ok(_) = ledger.transfer(TOKEN_A, TRADER, POOL, U256::from(amount_in)) else {
            panic!("funded");
        };
        prop_assert!(pair.swap(POOL, &mut ledger, U256::ZERO, out, TRADER).is_ok());
        let (n0, n1) = pair.reserves();
        prop_assert!(n0 * n1 >= r0 * r1);
        prop_assert_eq!(ledger.balance_of(TOKEN_B, TRADER), Ok(out));
    }

    #[test]
    fn amount_in_buys_at_least_amount_out(
        reserve_in in 1_000u64..1_000_000_000,
        reserve_out in 1_000u64..1_000_000_000,
        amount_out in 1u64..1_000,
    ) {
        let (reserve_in, reserve_out) = (U256::from(reserve_in), U256::from(reserve_out));
        let Ok(required) = get_amount_in(U256::from(amount_out), reserve_in, reserve_out) else {
            panic!("quotable");
        };
        let Ok(bought) = get_amount_out(required, reserve_in, reserve_out) else {
            panic!("quotable");
        };
        prop_assert!(bought >= U256::from(amount_out));
    }

    #[test]
    fn after_balances_saturate(
        sold_before in any::<u64>(),
        bought_before in any::<u64>(),
        sold in any::<u64>(),
        bought in any::<u64>(),
    ) {
        let snap = TraderBalanceSnapshot::finalize(
            U256::from(sold_before),
            U256::from(bought_before),
            U256::from(sold),
            U256::from(bought),
        );
        prop_assert!(snap.sold_after <= snap.sold_before);
        prop_assert!(snap.bought_after >= snap.bought_before);
        if sold > sold_before {
            prop_assert_eq!(snap.sold_after, U256::ZERO);
        }
    }

    #[test]
    fn decoded_hops_chain(
        bytes in proptest::collection::vec(1u8..=255, 2..6),
        fees in proptest::collection::vec(fee_tier(), 5),
    ) {
        let tokens: Vec<Address> = bytes.iter().map(|b| Address::repeat_byte(*b)).collect();
        let fees = &fees[..tokens.len() - 1];
        let Ok(path) = Path::encode(&tokens, fees) else {
            panic!("encodable");
        };
        let Ok(hops) = path.hops() else {
            panic!("decodable");
        };
        prop_assert_eq!(hops.len(), tokens.len() - 1);
        for pair in hops.windows(2) {
            prop_assert_eq!(pair[0].token_out, pair[1].token_in);
        }
        prop_assert_eq!(path.reversed().first_token(), tokens.last().copied());
    }
}
