//! Exact integer arithmetic for pool quoting.
//!
//! Everything here works on 256-bit unsigned integers and rounds
//! explicitly.  The module provides:
//!
//! - [`mul_div`] and [`div_rounding_up`] for full-precision ratios.
//! - Constant-product quoting ([`get_amount_out`], [`get_amount_in`],
//!   [`fee_free_amount_out`]) for reserve-based pools.
//! - Square-root price math and [`compute_swap_step`] for tick-based pools.
//! - Tick-range bounds and price-limit checks.

mod constant_product;
mod full_math;
mod sqrt_price_math;
mod swap_math;
mod tick_math;

pub use constant_product::{fee_free_amount_out, get_amount_in, get_amount_out};
pub use full_math::{div_rounding_up, mul_div};
pub use sqrt_price_math::{
    get_amount0_delta, get_amount1_delta, next_sqrt_price_from_amount0_rounding_up,
    next_sqrt_price_from_amount1_rounding_down, next_sqrt_price_from_input,
    next_sqrt_price_from_output,
};
pub use swap_math::{compute_swap_step, SwapStepOutcome};
pub use tick_math::{
    check_price_limit, check_sqrt_price, default_price_limit, MAX_SQRT_RATIO,
    MAX_SQRT_RATIO_MINUS_ONE, MIN_SQRT_RATIO, MIN_SQRT_RATIO_PLUS_ONE, Q96,
};
