//! Reference pool implementations and the [`PoolBox`] dispatch enum.
//!
//! The [`PoolBox`] enum provides static dispatch across both pool
//! protocols, allowing the host to keep heterogeneous pools in one
//! registry without `dyn` storage.
//!
//! # Pool Types
//!
//! | Protocol | Pool | Settlement |
//! |----------|------|------------|
//! | reserve | [`ConstantProductPair`] | pre-funded, balance-derived input |
//! | tick | [`ConcentratedPool`] | callback, then balance check |

pub mod concentrated;
pub mod constant_product;

mod pool_box;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use concentrated::ConcentratedPool;
pub use constant_product::ConstantProductPair;
pub use pool_box::PoolBox;
