//! # Scheduler configuration.
//!
//! [`SchedulerConfig`] holds the few knobs of a [`Scheduler`](crate::Scheduler):
//! how dangling dependency ids are treated and the event bus size.

/// Treatment of dependency ids that name no registered task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DependencyMode {
    /// Unknown ids are skipped: they add no node and do not abort resolution.
    #[default]
    Permissive,
    /// Unknown ids fail resolution with `GraphError::MissingDependency`.
    Strict,
}

/// Configuration for a [`Scheduler`](crate::Scheduler).
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Dangling dependency handling.
    pub dependencies: DependencyMode,
    /// Capacity of the event bus ring buffer (min 1; clamped by Bus).
    pub bus_capacity: usize,
}

impl SchedulerConfig {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for SchedulerConfig {
    /// Default configuration:
    ///
    /// - `dependencies = Permissive`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            dependencies: DependencyMode::Permissive,
            bus_capacity: 1024,
        }
    }
}
