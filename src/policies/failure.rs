//! # What happens once a recovery cycle runs out of attempts.
//!
//! - [`FailurePolicy::ManualIntervention`] the component stays unhealthy and is
//!   flagged for an operator (default).
//! - [`FailurePolicy::AutoRestart`] the supervisor signals the auto-restart path:
//!   it publishes `AutoRestartRequested` and calls the restart hook, if one was
//!   installed with
//!   [`SupervisorBuilder::with_restart_hook`](crate::SupervisorBuilder::with_restart_hook).
//!
//! In both cases no further automatic attempts are made until a later health
//! check finds the component unhealthy and enqueues it again.

/// Policy applied after a component exhausts its recovery attempts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Leave the component unhealthy for an operator to handle.
    #[default]
    ManualIntervention,
    /// Hand the component over to the external restart path.
    AutoRestart,
}
