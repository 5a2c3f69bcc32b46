//! # LogWriter - renders runtime events through `tracing`
//!
//! A subscriber that turns every [`Event`] into one structured `tracing` record.
//! Install any `tracing` subscriber (e.g. `tracing_subscriber::fmt`) to see them.
//!
//! ## Levels
//! - `error`: exhausted recoveries, manual intervention, subscriber panics
//! - `warn`: task failures, aborted runs, unhealthy components, dropped queue entries
//! - `info`: lifecycle milestones (registration, start/stop, recovery success)
//! - `debug`: per-attempt detail (task start, backoff, scheduling)

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;
use async_trait::async_trait;
use tracing::{debug, error, info, warn};

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let task = e.task.as_deref().unwrap_or("");
        let component = e.component.as_deref().unwrap_or("");
        let reason = e.reason.as_deref().unwrap_or("");

        match e.kind {
            EventKind::TaskStarting => debug!(seq = e.seq, task, "task starting"),
            EventKind::TaskCompleted => debug!(seq = e.seq, task, "task completed"),
            EventKind::TaskFailed => warn!(seq = e.seq, task, reason, "task failed"),
            EventKind::RunCompleted => info!(seq = e.seq, "run completed"),
            EventKind::RunAborted => warn!(seq = e.seq, task, reason, "run aborted"),
            EventKind::RunCanceled => info!(seq = e.seq, "run cancelled"),

            EventKind::SupervisorStarted => info!(seq = e.seq, "self-healing supervisor started"),
            EventKind::SupervisorStopped => info!(seq = e.seq, "self-healing supervisor stopped"),
            EventKind::ComponentRegistered => {
                info!(seq = e.seq, component, "registered component")
            }
            EventKind::ErrorReported => warn!(
                seq = e.seq,
                component,
                reason,
                total_errors = e.attempt,
                "error reported"
            ),
            EventKind::ComponentUnhealthy => {
                warn!(seq = e.seq, component, errors = e.attempt, "component is unhealthy")
            }
            EventKind::ErrorsCleared => info!(seq = e.seq, component, "cleared errors"),

            EventKind::RecoveryScheduled => debug!(seq = e.seq, component, "scheduled recovery"),
            EventKind::RecoveryQueueFull => {
                warn!(seq = e.seq, component, "recovery queue full, skipping")
            }
            EventKind::RecoveryMissing => {
                warn!(seq = e.seq, component, "no recovery procedure registered")
            }
            EventKind::RecoveryStarting => {
                info!(seq = e.seq, component, procedure = reason, "attempting recovery")
            }
            EventKind::BackoffScheduled => debug!(
                seq = e.seq,
                component,
                attempt = e.attempt,
                delay_ms = e.delay_ms,
                "backing off before recovery attempt"
            ),
            EventKind::RecoveryTimeoutHit => warn!(
                seq = e.seq,
                component,
                attempt = e.attempt,
                timeout_ms = e.timeout_ms,
                "recovery attempt timed out"
            ),
            EventKind::RecoveryAttemptFailed => warn!(
                seq = e.seq,
                component,
                attempt = e.attempt,
                reason,
                "recovery attempt failed"
            ),
            EventKind::ComponentRecovered => {
                info!(seq = e.seq, component, attempt = e.attempt, "successfully recovered")
            }
            EventKind::RecoveryExhausted => error!(
                seq = e.seq,
                component,
                attempts = e.attempt,
                "failed to recover"
            ),
            EventKind::AutoRestartRequested => {
                warn!(seq = e.seq, component, "initiating auto-restart")
            }
            EventKind::ManualInterventionRequired => {
                error!(seq = e.seq, component, "manual intervention required")
            }

            EventKind::SubscriberOverflow => {
                warn!(seq = e.seq, subscriber = component, reason, "subscriber overflow")
            }
            EventKind::SubscriberPanicked => {
                error!(seq = e.seq, subscriber = component, reason, "subscriber panicked")
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
