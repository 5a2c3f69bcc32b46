//! # Supervisor: continuous health monitoring with bounded self-healing.
//!
//! The [`Supervisor`] keeps a registry of components (health record, recovery
//! procedure, health probe), a bounded recovery queue and two background loops.
//!
//! ## High-level architecture
//! ```text
//! callers (any thread)                      background (Tokio tasks, spawned by start)
//!   register_component ──┐
//!   report_error ────────┼──► Registry ◄──── health-check loop (every interval)
//!   clear_errors ────────┘   (RwLock)               │ unhealthy
//!                                                   ▼
//!   schedule_recovery ──────────────► [recovery queue, cap 100] (try_send; full → dropped)
//!                                                   │
//!                                                   ▼
//!                                          recovery worker (single consumer)
//!                                            backoff → run_attempt(timeout) → mark
//!
//! everything publishes Event ──► Bus ──► SubscriberSet (LogWriter, user subscribers)
//! ```
//!
//! ## Lifecycle
//! - `start` spawns both loops and returns; a second `start` is refused.
//! - `stop` cancels the loops and closes the queue; it is final.
//! - `stopped` awaits loop exit. Recovery procedures that were left running
//!   after a timeout are not awaited.
//! - The loops hold an `Arc<Supervisor>`; a started supervisor lives until `stop`.
//! - Dropping the last handle stops the subscriber listener and releases the
//!   subscribers.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use flowvisor::{Config, RecoverFn, Supervisor, TaskError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sup = Supervisor::new(Config {
//!         health_check_interval: Duration::from_secs(10),
//!         ..Config::default()
//!     });
//!
//!     sup.register_component(
//!         "database",
//!         RecoverFn::arc("reconnect", || async { Ok::<_, TaskError>(()) }),
//!     );
//!     sup.start()?;
//!
//!     sup.report_error("database", "connection reset by peer");
//!     assert!(!sup.component_health("database").unwrap().is_healthy);
//!
//!     sup.stop();
//!     sup.stopped().await;
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::{
    builder::SupervisorBuilder,
    config::{Config, RECOVERY_QUEUE_CAPACITY},
    health::{ErrorCountProbe, HealthStatus, ProbeRef},
    monitor::health_check_loop,
    recovery::recovery_worker,
    registry::Registry,
};
use crate::error::SupervisorError;
use crate::events::{Bus, Event, EventKind};
use crate::policies::BackoffPolicy;
use crate::tasks::RecoverRef;

/// Callback invoked with the component name when an exhausted component takes
/// the auto-restart path.
pub type RestartHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Self-healing supervisor.
pub struct Supervisor {
    pub(super) cfg: Config,
    pub(super) backoff: BackoffPolicy,
    pub(super) bus: Bus,
    pub(super) registry: Registry,
    pub(super) restart_hook: Option<RestartHook>,
    pub(super) token: CancellationToken,
    /// Stops the subscriber listener when the supervisor is dropped.
    listener: CancellationToken,

    queue_tx: Mutex<Option<mpsc::Sender<String>>>,
    queue_rx: Mutex<Option<mpsc::Receiver<String>>>,
    started: AtomicBool,
    loops: Mutex<Vec<JoinHandle<()>>>,
}

impl Supervisor {
    /// Creates a supervisor without subscribers or restart hook.
    pub fn new(cfg: Config) -> Arc<Self> {
        SupervisorBuilder::new(cfg).build()
    }

    /// Returns a builder.
    pub fn builder(cfg: Config) -> SupervisorBuilder {
        SupervisorBuilder::new(cfg)
    }

    pub(super) fn new_internal(
        cfg: Config,
        bus: Bus,
        restart_hook: Option<RestartHook>,
        listener: CancellationToken,
    ) -> Self {
        let (tx, rx) = mpsc::channel(RECOVERY_QUEUE_CAPACITY);
        Self {
            backoff: cfg.backoff_policy(),
            cfg,
            bus,
            registry: Registry::new(),
            restart_hook,
            token: CancellationToken::new(),
            listener,
            queue_tx: Mutex::new(Some(tx)),
            queue_rx: Mutex::new(Some(rx)),
            started: AtomicBool::new(false),
            loops: Mutex::new(Vec::new()),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns the event bus (for ad-hoc receivers).
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Registers `name` with its recovery procedure and the default health probe.
    ///
    /// Re-registering replaces the procedure and resets health to healthy.
    pub fn register_component(&self, name: impl Into<String>, recover: RecoverRef) {
        self.register_component_with_probe(name, recover, Arc::new(ErrorCountProbe));
    }

    /// Registers `name` with its recovery procedure and a custom health probe.
    pub fn register_component_with_probe(
        &self,
        name: impl Into<String>,
        recover: RecoverRef,
        probe: ProbeRef,
    ) {
        let name = name.into();
        let replaced = self.registry.register(&name, recover, probe);
        let mut ev = Event::new(EventKind::ComponentRegistered).with_component(name);
        if replaced {
            ev = ev.with_reason("replaced");
        }
        self.bus.publish(ev);
    }

    /// Spawns the health-check loop and the recovery worker, then returns.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn start(self: &Arc<Self>) -> Result<(), SupervisorError> {
        if self.token.is_cancelled() {
            return Err(SupervisorError::Stopped);
        }
        if self.started.swap(true, Ordering::AcqRel) {
            return Err(SupervisorError::AlreadyStarted);
        }
        let Some(rx) = self.queue_rx.lock().take() else {
            return Err(SupervisorError::AlreadyStarted);
        };

        let monitor = tokio::spawn(health_check_loop(Arc::clone(self)));
        let worker = tokio::spawn(recovery_worker(Arc::clone(self), rx));
        self.loops.lock().extend([monitor, worker]);

        self.bus.publish(Event::new(EventKind::SupervisorStarted));
        Ok(())
    }

    /// Stops both loops and closes the recovery queue.
    ///
    /// Does not wait; see [`stopped`](Self::stopped). Idempotent.
    pub fn stop(&self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        self.queue_tx.lock().take();
        self.bus.publish(Event::new(EventKind::SupervisorStopped));
    }

    /// Waits until the loops spawned by [`start`](Self::start) have exited.
    pub async fn stopped(&self) {
        let handles = std::mem::take(&mut *self.loops.lock());
        for h in handles {
            let _ = h.await;
        }
    }

    /// True between a successful `start` and `stop`.
    pub fn is_running(&self) -> bool {
        self.started.load(Ordering::Acquire) && !self.token.is_cancelled()
    }

    /// Records a fault: error count +1, last error set, unhealthy immediately.
    ///
    /// Recovery is not scheduled here; the next health check does it.
    /// Returns `false` if `name` is not registered.
    pub fn report_error(&self, name: &str, err: impl Display) -> bool {
        let reason = err.to_string();
        let Some(count) = self.registry.record_error(name, &reason) else {
            return false;
        };
        self.bus.publish(
            Event::new(EventKind::ErrorReported)
                .with_component(name)
                .with_reason(reason)
                .with_attempt(count),
        );
        true
    }

    /// Enqueues `name` for recovery without blocking.
    ///
    /// Returns `false` if the queue is full (the request is dropped) or closed.
    pub fn schedule_recovery(&self, name: &str) -> bool {
        let guard = self.queue_tx.lock();
        let Some(tx) = guard.as_ref() else {
            return false;
        };
        match tx.try_send(name.to_string()) {
            Ok(()) => {
                self.bus
                    .publish(Event::new(EventKind::RecoveryScheduled).with_component(name));
                true
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.bus
                    .publish(Event::new(EventKind::RecoveryQueueFull).with_component(name));
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    /// Snapshot of every component's health, keyed by name.
    pub fn health_status(&self) -> HashMap<String, HealthStatus> {
        self.registry.health_status()
    }

    /// Snapshot of one component's health.
    pub fn component_health(&self, name: &str) -> Option<HealthStatus> {
        self.registry.get(name)
    }

    /// True if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Zeroes the error count and clears the last error.
    ///
    /// `is_healthy` is left unchanged until the next health check.
    /// Returns `false` if `name` is not registered.
    pub fn clear_errors(&self, name: &str) -> bool {
        if !self.registry.clear_errors(name) {
            return false;
        }
        self.bus
            .publish(Event::new(EventKind::ErrorsCleared).with_component(name));
        true
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        self.token.cancel();
        self.listener.cancel();
    }
}
