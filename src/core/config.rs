//! # Supervisor configuration.
//!
//! [`Config`] centralizes the knobs of the self-healing [`Supervisor`](crate::Supervisor).
//! It is immutable once handed to the builder.
//!
//! ## Sentinel values
//! - `recovery_timeout = 0s` → no per-attempt timeout
//! - `backoff_cap = None` → delays grow without bound

use std::time::Duration;

use crate::policies::{BackoffPolicy, FailurePolicy, JitterPolicy};

/// Capacity of the recovery queue. Fixed; not part of [`Config`].
pub const RECOVERY_QUEUE_CAPACITY: usize = 100;

/// Growth factor between consecutive recovery delays.
const BACKOFF_FACTOR: f64 = 2.0;

/// Configuration for the self-healing supervisor.
///
/// ## Field semantics
/// - `max_retries`: attempts per recovery cycle
/// - `backoff_base`: delay before attempt `0`; attempt `n` waits `base × 2^n`
/// - `backoff_cap`: optional ceiling for that delay
/// - `jitter`: randomization applied to each delay
/// - `health_check_interval`: period of the health-check loop
/// - `recovery_timeout`: per-attempt timeout (`0s` = none)
/// - `on_exhausted`: what happens once all attempts failed
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of recovery attempts per cycle.
    ///
    /// `0` means a dequeued component is declared exhausted right away.
    pub max_retries: u32,

    /// Delay before the first attempt of a cycle.
    pub backoff_base: Duration,

    /// Optional ceiling on the backoff delay.
    pub backoff_cap: Option<Duration>,

    /// Jitter applied on top of the exponential delay.
    pub jitter: JitterPolicy,

    /// Interval between two health checks.
    ///
    /// The first check runs one interval after `start`.
    pub health_check_interval: Duration,

    /// Maximum time one recovery attempt may take.
    ///
    /// - `Duration::ZERO` = unbounded
    /// - `> 0` = the attempt is abandoned (not aborted) once exceeded
    pub recovery_timeout: Duration,

    /// Policy applied after `max_retries` failed attempts.
    pub on_exhausted: FailurePolicy,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,
}

impl Config {
    /// Returns the backoff policy derived from `backoff_base`, `backoff_cap` and `jitter`.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use flowvisor::Config;
    ///
    /// let cfg = Config { backoff_base: Duration::from_millis(10), ..Config::default() };
    /// let backoff = cfg.backoff_policy();
    /// assert_eq!(backoff.next(0), Duration::from_millis(10));
    /// assert_eq!(backoff.next(2), Duration::from_millis(40));
    /// ```
    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy {
            first: self.backoff_base,
            max: self.backoff_cap,
            factor: BACKOFF_FACTOR,
            jitter: self.jitter,
        }
    }

    /// Returns the per-attempt recovery timeout as an `Option`.
    ///
    /// - `None` → no timeout
    /// - `Some(d)` → each attempt is raced against `d`
    #[inline]
    pub fn recovery_timeout(&self) -> Option<Duration> {
        if self.recovery_timeout == Duration::ZERO {
            None
        } else {
            Some(self.recovery_timeout)
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `max_retries = 3`
    /// - `backoff_base = 1s`, no cap, no jitter
    /// - `health_check_interval = 30s`
    /// - `recovery_timeout = 30s`
    /// - `on_exhausted = ManualIntervention`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base: Duration::from_secs(1),
            backoff_cap: None,
            jitter: JitterPolicy::None,
            health_check_interval: Duration::from_secs(30),
            recovery_timeout: Duration::from_secs(30),
            on_exhausted: FailurePolicy::ManualIntervention,
            bus_capacity: 1024,
        }
    }
}
