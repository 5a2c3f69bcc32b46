//! Recovery policies.
//!
//! This module groups the knobs that control **how long** to wait between
//! recovery attempts and **what happens** when attempts run out.
//!
//! ## Contents
//! - [`BackoffPolicy`] how delays evolve (first / factor / optional cap + jitter)
//! - [`JitterPolicy`]  randomization strategy to avoid synchronized retries
//! - [`FailurePolicy`] auto-restart vs. manual intervention after exhaustion
//!
//! ## Quick wiring
//! ```text
//! Config { backoff_base, backoff_cap, jitter, on_exhausted, .. }
//!      └─► Config::backoff_policy() → BackoffPolicy { factor: 2.0, .. }
//!           └─► core::recovery uses:
//!                - backoff.next(attempt) before each attempt
//!                - on_exhausted once all attempts failed
//! ```

mod backoff;
mod failure;
mod jitter;

pub use backoff::BackoffPolicy;
pub use failure::FailurePolicy;
pub use jitter::JitterPolicy;
