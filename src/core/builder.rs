//! # Supervisor builder.
//!
//! [`SupervisorBuilder`] wires the event bus, the subscriber listener and the
//! optional restart hook, then hands them to a fresh [`Supervisor`].

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    core::Config,
    events::Bus,
    subscribers::{Subscribe, SubscriberSet, spawn_listener},
};
use super::supervisor::{RestartHook, Supervisor};

/// Builder for constructing a Supervisor with optional features.
pub struct SupervisorBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
    restart_hook: Option<RestartHook>,
}

impl SupervisorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            restart_hook: None,
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events (health reports, recovery attempts,
    /// exhaustion) through dedicated workers with bounded queues.
    /// When non-empty, [`build`](Self::build) must run inside a Tokio runtime.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Sets the callback run when an exhausted component takes the auto-restart path.
    ///
    /// Only used with [`FailurePolicy::AutoRestart`](crate::FailurePolicy::AutoRestart).
    /// The hook runs on the recovery worker; it should hand off rather than block.
    pub fn with_restart_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.restart_hook = Some(Arc::new(hook));
        self
    }

    /// Builds and returns the Supervisor instance.
    ///
    /// Initializes the event bus, the subscriber workers and the recovery queue.
    /// Background loops are not started; call [`Supervisor::start`].
    pub fn build(self) -> Arc<Supervisor> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers, bus.clone()));
        let listener = CancellationToken::new();
        spawn_listener(&bus, subs, listener.clone());

        Arc::new(Supervisor::new_internal(
            self.cfg,
            bus,
            self.restart_hook,
            listener,
        ))
    }
}
