//! # Component health records and health probes.
//!
//! [`HealthStatus`] is the per-component record kept by the supervisor and handed
//! out as value snapshots. [`HealthProbe`] decides, once per health check, whether
//! a component is healthy; [`ErrorCountProbe`] (healthy iff no errors are pending)
//! is used unless another probe is registered.

use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;

/// Progress of the recovery machinery for one component.
///
/// ```text
/// Idle ──► Recovering ──► Recovered ──► Recovering ...
///                    └──► Exhausted ──► Recovering ...
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RecoveryState {
    /// No recovery has run since registration.
    #[default]
    Idle,
    /// A recovery cycle is in progress.
    Recovering,
    /// The last cycle succeeded.
    Recovered,
    /// The last cycle ran out of attempts; the component failed permanently
    /// until a later cycle succeeds.
    Exhausted,
}

impl RecoveryState {
    /// Returns the lowercase state name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryState::Idle => "idle",
            RecoveryState::Recovering => "recovering",
            RecoveryState::Recovered => "recovered",
            RecoveryState::Exhausted => "exhausted",
        }
    }
}

/// Health record of a supervised component.
#[derive(Clone, Debug, PartialEq)]
pub struct HealthStatus {
    /// Registered component name.
    pub component_name: String,
    /// Verdict of the last health check (or `false` right after an error report).
    pub is_healthy: bool,
    /// Time of the last health check (registration time before the first one).
    pub last_checked: SystemTime,
    /// Errors reported since the last successful recovery or clear.
    pub error_count: u32,
    /// Message of the most recent error.
    pub last_error: Option<String>,
    /// Completed recovery cycles, successful or exhausted.
    pub recovery_attempts: u32,
    /// Recovery progress.
    pub recovery_state: RecoveryState,
}

impl HealthStatus {
    /// Fresh record: healthy, no errors, no recoveries.
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            is_healthy: true,
            last_checked: SystemTime::now(),
            error_count: 0,
            last_error: None,
            recovery_attempts: 0,
            recovery_state: RecoveryState::Idle,
        }
    }

    /// True if the last recovery cycle ran out of attempts.
    pub fn is_exhausted(&self) -> bool {
        self.recovery_state == RecoveryState::Exhausted
    }

    pub(crate) fn record_error(&mut self, err: &str) {
        self.error_count = self.error_count.saturating_add(1);
        self.last_error = Some(err.to_string());
        self.is_healthy = false;
    }

    pub(crate) fn clear_errors(&mut self) {
        self.error_count = 0;
        self.last_error = None;
    }

    pub(crate) fn mark_recovered(&mut self) {
        self.is_healthy = true;
        self.clear_errors();
        self.recovery_attempts = self.recovery_attempts.saturating_add(1);
        self.recovery_state = RecoveryState::Recovered;
    }

    pub(crate) fn mark_exhausted(&mut self) {
        self.is_healthy = false;
        self.recovery_attempts = self.recovery_attempts.saturating_add(1);
        self.recovery_state = RecoveryState::Exhausted;
    }
}

/// Shared handle to a health probe.
pub type ProbeRef = Arc<dyn HealthProbe>;

/// Health predicate evaluated by the health-check loop.
///
/// Receives a snapshot of the component's record; runs outside the supervisor lock.
#[async_trait]
pub trait HealthProbe: Send + Sync + 'static {
    /// Returns `true` if the component is healthy.
    async fn probe(&self, status: &HealthStatus) -> bool;
}

/// Default probe: healthy iff `error_count == 0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ErrorCountProbe;

#[async_trait]
impl HealthProbe for ErrorCountProbe {
    async fn probe(&self, status: &HealthStatus) -> bool {
        status.error_count == 0
    }
}
