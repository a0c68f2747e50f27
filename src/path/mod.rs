//! Route encoding and pool address derivation.
//!
//! - [`Path`]: the packed `token | fee | token …` route of tick-based
//!   swaps, with hop decoding and reversal.
//! - [`PoolLocator`]: CREATE2 derivation of pool addresses from a token
//!   pair (and fee tier).
//! - [`SwapCallbackData`]: the continuation passed through pool callbacks.

mod callback_data;
mod codec;
mod locator;

pub use callback_data::SwapCallbackData;
pub use codec::{
    decode_hop, has_more_hops, Path, ADDR_SIZE, FEE_SIZE, MULTIPLE_POOLS_MIN_LENGTH,
    NEXT_OFFSET, POP_OFFSET,
};
pub use locator::PoolLocator;
