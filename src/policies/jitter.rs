//! # Jitter policy for backoff delays.
//!
//! [`JitterPolicy`] randomizes recovery delays so that components failing at the
//! same moment do not retry in lockstep.
//!
//! - [`JitterPolicy::None`] - exact delays (default)
//! - [`JitterPolicy::Full`] - random delay in [0, delay]
//! - [`JitterPolicy::Equal`] - delay/2 + random[0, delay/2]
//! - [`JitterPolicy::Decorrelated`] - random[first, delay × 3], capped

use rand::Rng;
use std::time::Duration;

/// Policy controlling randomization of backoff delays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// No jitter: use the exact backoff delay.
    #[default]
    None,

    /// Full jitter: random delay in [0, delay].
    Full,

    /// Equal jitter: delay/2 + random[0, delay/2].
    Equal,

    /// Decorrelated jitter: random[first, delay × 3], capped at max.
    ///
    /// Requires context via [`apply_decorrelated`](Self::apply_decorrelated).
    Decorrelated,
}

impl JitterPolicy {
    /// Applies jitter to the given delay.
    ///
    /// For `Decorrelated` the input is returned unchanged;
    /// use [`apply_decorrelated`](Self::apply_decorrelated) instead.
    pub fn apply(&self, delay: Duration) -> Duration {
        match self {
            JitterPolicy::None | JitterPolicy::Decorrelated => delay,
            JitterPolicy::Full => full_jitter(delay),
            JitterPolicy::Equal => equal_jitter(delay),
        }
    }

    /// Applies decorrelated jitter with full context.
    ///
    /// Falls back to `apply(prev)` for other policies.
    pub fn apply_decorrelated(&self, base: Duration, prev: Duration, max: Duration) -> Duration {
        if !matches!(self, JitterPolicy::Decorrelated) {
            return self.apply(prev);
        }

        let base_ms = base.as_millis() as u64;
        let prev_ms = prev.as_millis() as u64;
        let max_ms = max.as_millis() as u64;

        let upper = prev_ms.saturating_mul(3).min(max_ms).max(base_ms);
        if base_ms >= upper {
            return base;
        }
        Duration::from_millis(rand::rng().random_range(base_ms..=upper))
    }
}

fn full_jitter(delay: Duration) -> Duration {
    let ms = delay.as_millis() as u64;
    if ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..=ms))
}

fn equal_jitter(delay: Duration) -> Duration {
    let ms = delay.as_millis() as u64;
    if ms == 0 {
        return Duration::ZERO;
    }
    let half = ms / 2;
    let jitter = if half == 0 {
        0
    } else {
        rand::rng().random_range(0..=half)
    };
    Duration::from_millis(half + jitter)
}
