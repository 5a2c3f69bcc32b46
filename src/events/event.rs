//! # Runtime events emitted by the scheduler and the supervisor.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Run events**: task execution flow inside a scheduler run
//! - **Health events**: registration, error reports, health-check verdicts
//! - **Recovery events**: queueing, attempts, backoff, terminal outcomes
//! - **Subscriber events**: delivery problems inside the fan-out
//!
//! The [`Event`] struct carries metadata such as timestamps, task id or
//! component name, reasons and delays.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use flowvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::RecoveryAttemptFailed)
//!     .with_component("db")
//!     .with_reason("connection refused")
//!     .with_attempt(2)
//!     .with_timeout(Duration::from_secs(5));
//!
//! assert_eq!(ev.kind, EventKind::RecoveryAttemptFailed);
//! assert_eq!(ev.component.as_deref(), Some("db"));
//! assert_eq!(ev.reason.as_deref(), Some("connection refused"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets: `component` (subscriber name), `reason` (panic message).
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `component` (subscriber name), `reason`.
    SubscriberOverflow,

    // === Run events ===
    /// Task is about to run.
    ///
    /// Sets: `task`.
    TaskStarting,

    /// Task returned successfully.
    ///
    /// Sets: `task`.
    TaskCompleted,

    /// Task returned an error; the run is aborted.
    ///
    /// Sets: `task`, `reason`.
    TaskFailed,

    /// Every resolved task completed.
    RunCompleted,

    /// The run stopped on a failure (resolution or task).
    ///
    /// Sets: `task` (when a task failed), `reason`.
    RunAborted,

    /// The run stopped because its token was cancelled.
    RunCanceled,

    // === Supervisor lifecycle ===
    /// Health-check loop and recovery worker were spawned.
    SupervisorStarted,

    /// Stop was requested; loops are exiting.
    SupervisorStopped,

    // === Health events ===
    /// Component registered (or re-registered, which resets its health).
    ///
    /// Sets: `component`.
    ComponentRegistered,

    /// A fault was reported for a component.
    ///
    /// Sets: `component`, `reason`, `attempt` (running error count).
    ErrorReported,

    /// A health check found the component unhealthy.
    ///
    /// Sets: `component`, `attempt` (error count).
    ComponentUnhealthy,

    /// Errors were cleared administratively.
    ///
    /// Sets: `component`.
    ErrorsCleared,

    // === Recovery events ===
    /// Component was placed on the recovery queue.
    ///
    /// Sets: `component`.
    RecoveryScheduled,

    /// Recovery queue was full; the request was dropped.
    ///
    /// Sets: `component`.
    RecoveryQueueFull,

    /// Component was dequeued but has no recovery procedure.
    ///
    /// Sets: `component`.
    RecoveryMissing,

    /// A recovery cycle is starting.
    ///
    /// Sets: `component`, `reason` (procedure name).
    RecoveryStarting,

    /// Waiting before the next attempt.
    ///
    /// Sets: `component`, `attempt` (0-based), `delay_ms`.
    BackoffScheduled,

    /// One attempt exceeded the recovery timeout.
    ///
    /// Sets: `component`, `attempt`, `timeout_ms`.
    RecoveryTimeoutHit,

    /// One attempt failed.
    ///
    /// Sets: `component`, `attempt`, `reason`.
    RecoveryAttemptFailed,

    /// Component recovered; error count reset.
    ///
    /// Sets: `component`, `attempt`.
    ComponentRecovered,

    /// Every attempt failed; component failed permanently.
    ///
    /// Sets: `component`, `attempt` (attempts made).
    RecoveryExhausted,

    /// Auto-restart path triggered for an exhausted component.
    ///
    /// Sets: `component`.
    AutoRestartRequested,

    /// Exhausted component requires an operator.
    ///
    /// Sets: `component`.
    ManualInterventionRequired,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Task id, for run events.
    pub task: Option<Arc<str>>,
    /// Component or subscriber name.
    pub component: Option<Arc<str>>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
    /// Attempt number or counter, meaning depends on `kind`.
    pub attempt: Option<u32>,
    /// Timeout in milliseconds (compact).
    pub timeout_ms: Option<u32>,
    /// Backoff delay in milliseconds (compact).
    pub delay_ms: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            component: None,
            reason: None,
            attempt: None,
            timeout_ms: None,
            delay_ms: None,
        }
    }

    /// Attaches a task id.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a component name.
    #[inline]
    pub fn with_component(mut self, component: impl Into<Arc<str>>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches an attempt number.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a timeout duration (stored as milliseconds).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        self.timeout_ms = Some(compact_ms(d));
        self
    }

    /// Attaches a backoff delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        self.delay_ms = Some(compact_ms(d));
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_component(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_component(subscriber)
            .with_reason(info)
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}

fn compact_ms(d: Duration) -> u32 {
    d.as_millis().min(u128::from(u32::MAX)) as u32
}
