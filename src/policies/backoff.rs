//! # Backoff policy for recovery attempts.
//!
//! [`BackoffPolicy`] controls how the delay before each recovery attempt grows.
//! It is parameterized by:
//! - [`BackoffPolicy::first`] the delay before attempt `0`;
//! - [`BackoffPolicy::factor`] the multiplicative growth factor;
//! - [`BackoffPolicy::max`] an optional cap (`None` = unbounded).
//!
//! The delay for attempt `n` is `first × factor^n`, clamped to `max` when set,
//! then jitter is applied. The base delay is derived from the attempt number only,
//! so jitter output never feeds back into later attempts.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use flowvisor::{BackoffPolicy, JitterPolicy};
//!
//! let backoff = BackoffPolicy {
//!     first: Duration::from_millis(100),
//!     max: Some(Duration::from_secs(10)),
//!     factor: 2.0,
//!     jitter: JitterPolicy::None,
//! };
//!
//! assert_eq!(backoff.next(0), Duration::from_millis(100));
//! assert_eq!(backoff.next(1), Duration::from_millis(200));
//! // 100ms × 2^10 = 102.4s → capped at 10s
//! assert_eq!(backoff.next(10), Duration::from_secs(10));
//! ```

use std::time::Duration;

use crate::policies::jitter::JitterPolicy;

/// Largest delay produced when no cap is configured and the computation overflows.
const UNBOUNDED_CEILING: Duration = Duration::from_secs(u32::MAX as u64);

/// Recovery backoff policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackoffPolicy {
    /// Delay before the first attempt.
    pub first: Duration,
    /// Optional delay cap (`None` = grows without bound).
    pub max: Option<Duration>,
    /// Multiplicative growth factor (`>= 1.0` recommended).
    pub factor: f64,
    /// Jitter policy to prevent synchronized retries.
    pub jitter: JitterPolicy,
}

impl Default for BackoffPolicy {
    /// Returns a strategy with:
    /// - `first = 1s`;
    /// - `factor = 2.0` (doubling);
    /// - `max = None`;
    /// - `jitter = None`.
    fn default() -> Self {
        Self {
            first: Duration::from_secs(1),
            max: None,
            factor: 2.0,
            jitter: JitterPolicy::None,
        }
    }
}

impl BackoffPolicy {
    /// Computes the delay for the given attempt number (0-indexed).
    ///
    /// # Notes
    /// - Non-finite or negative intermediate values fall back to the cap
    ///   (or to a very large ceiling when no cap is set).
    /// - Decorrelated jitter draws from `[first, 3 × base]`, clamped to the cap.
    pub fn next(&self, attempt: u32) -> Duration {
        let ceiling = self.max.unwrap_or(UNBOUNDED_CEILING);
        let clamped_exp = attempt.min(i32::MAX as u32) as i32;
        let unclamped_secs = self.first.as_secs_f64() * self.factor.powi(clamped_exp);

        let base = if !unclamped_secs.is_finite()
            || unclamped_secs < 0.0
            || unclamped_secs > ceiling.as_secs_f64()
        {
            ceiling
        } else {
            Duration::from_secs_f64(unclamped_secs)
        };

        match self.jitter {
            JitterPolicy::Decorrelated => {
                self.jitter
                    .apply_decorrelated(self.first.min(ceiling), base, ceiling)
            }
            _ => self.jitter.apply(base),
        }
    }
}
