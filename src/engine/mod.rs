//! Swap execution engines for the two pool protocols.
//!
//! | Engine | Protocol | Route | Settlement |
//! |--------|----------|-------|------------|
//! | [`ReserveRouter`] | reserve-based | token list | pool pre-funded before each swap |
//! | [`CallbackRouter`] | tick-based | packed [`Path`](crate::path::Path) | pool calls back for payment |
//!
//! Both expose `swap_exact_input` and `swap_exact_output`, run every
//! top-level call atomically against the host, enforce the caller's
//! slippage bound and emit exactly one
//! [`TradeRecord`](crate::domain::TradeRecord) per successful call.

mod callback_router;
mod payment;
mod reserve_router;
mod transient;

pub use callback_router::CallbackRouter;
pub use payment::pay;
pub use reserve_router::ReserveRouter;
pub use transient::TransientSlot;
