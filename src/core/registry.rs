//! # Component registry - health records plus recovery procedures.
//!
//! One [`parking_lot::RwLock`] guards, per component name, its [`HealthStatus`],
//! its recovery procedure and its health probe. Every method is synchronous and
//! releases the lock before returning; probes and procedures are handed out as
//! `Arc`s and run by the caller outside the lock.
//!
//! ## Rules
//! - Registering an existing name replaces procedure and probe and resets health.
//! - Components are never removed.
//! - Operations on unknown names are no-ops returning `None`/`false`.

use std::collections::HashMap;
use std::time::SystemTime;

use parking_lot::RwLock;

use crate::core::health::{HealthStatus, ProbeRef, RecoveryState};
use crate::tasks::RecoverRef;

struct Component {
    status: HealthStatus,
    recover: RecoverRef,
    probe: ProbeRef,
}

/// Registry of supervised components.
pub(crate) struct Registry {
    components: RwLock<HashMap<String, Component>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            components: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts or replaces a component with a fresh healthy record.
    ///
    /// Returns `true` if an earlier registration was replaced.
    pub(crate) fn register(&self, name: &str, recover: RecoverRef, probe: ProbeRef) -> bool {
        let component = Component {
            status: HealthStatus::new(name),
            recover,
            probe,
        };
        self.components
            .write()
            .insert(name.to_string(), component)
            .is_some()
    }

    /// Records an error; returns the new error count.
    pub(crate) fn record_error(&self, name: &str, err: &str) -> Option<u32> {
        let mut map = self.components.write();
        let c = map.get_mut(name)?;
        c.status.record_error(err);
        Some(c.status.error_count)
    }

    /// Zeroes the error count; `is_healthy` is left for the next check.
    pub(crate) fn clear_errors(&self, name: &str) -> bool {
        let mut map = self.components.write();
        match map.get_mut(name) {
            Some(c) => {
                c.status.clear_errors();
                true
            }
            None => false,
        }
    }

    /// Snapshot of every record with its probe, for one health-check pass.
    pub(crate) fn snapshot(&self) -> Vec<(HealthStatus, ProbeRef)> {
        self.components
            .read()
            .values()
            .map(|c| (c.status.clone(), c.probe.clone()))
            .collect()
    }

    /// Stores a probe verdict taken on a snapshot with `errors_seen` errors.
    ///
    /// Errors reported after the snapshot keep the component unhealthy.
    /// Returns the stored verdict.
    pub(crate) fn apply_check(&self, name: &str, healthy: bool, errors_seen: u32) -> Option<bool> {
        let mut map = self.components.write();
        let status = &mut map.get_mut(name)?.status;
        status.is_healthy = healthy && status.error_count <= errors_seen;
        status.last_checked = SystemTime::now();
        Some(status.is_healthy)
    }

    /// Marks the component `Recovering` and returns its procedure.
    pub(crate) fn begin_recovery(&self, name: &str) -> Option<RecoverRef> {
        let mut map = self.components.write();
        let c = map.get_mut(name)?;
        c.status.recovery_state = RecoveryState::Recovering;
        Some(c.recover.clone())
    }

    /// Healthy, errors cleared, one more completed cycle. Returns the cycle count.
    pub(crate) fn mark_recovered(&self, name: &str) -> Option<u32> {
        let mut map = self.components.write();
        let status = &mut map.get_mut(name)?.status;
        status.mark_recovered();
        Some(status.recovery_attempts)
    }

    /// Failed permanently, one more completed cycle. Returns the cycle count.
    pub(crate) fn mark_exhausted(&self, name: &str) -> Option<u32> {
        let mut map = self.components.write();
        let status = &mut map.get_mut(name)?.status;
        status.mark_exhausted();
        Some(status.recovery_attempts)
    }

    pub(crate) fn get(&self, name: &str) -> Option<HealthStatus> {
        self.components.read().get(name).map(|c| c.status.clone())
    }

    pub(crate) fn health_status(&self) -> HashMap<String, HealthStatus> {
        self.components
            .read()
            .iter()
            .map(|(name, c)| (name.clone(), c.status.clone()))
            .collect()
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.components.read().contains_key(name)
    }
}
