//! Error types used by the scheduler, the supervisor and user code.
//!
//! This module defines:
//!
//! - [`GraphError`] - the task graph cannot be built or ordered.
//! - [`RunError`] - a scheduler run stopped before every task completed.
//! - [`TaskError`] - a task body or recovery procedure reported a failure.
//! - [`RecoveryError`] - one recovery attempt did not succeed.
//! - [`SupervisorError`] - lifecycle misuse of the supervisor.
//!
//! All of them provide `as_label` for logs/metrics.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced while registering or ordering tasks.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A task with the same id is already registered.
    #[error("task {id} already exists")]
    DuplicateTask {
        /// The colliding id.
        id: String,
    },

    /// Traversal came back to a task that was still being visited.
    #[error("circular dependency detected: {id}")]
    CircularDependency {
        /// Task id at which the recurrence was detected.
        id: String,
    },

    /// A dependency names an unregistered task (strict mode only).
    #[error("task {task} depends on unknown task {dependency}")]
    MissingDependency {
        /// Task declaring the dependency.
        task: String,
        /// The unknown id.
        dependency: String,
    },
}

impl GraphError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use flowvisor::GraphError;
    ///
    /// let err = GraphError::CircularDependency { id: "a".into() };
    /// assert_eq!(err.as_label(), "graph_circular_dependency");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            GraphError::DuplicateTask { .. } => "graph_duplicate_task",
            GraphError::CircularDependency { .. } => "graph_circular_dependency",
            GraphError::MissingDependency { .. } => "graph_missing_dependency",
        }
    }
}

/// # Errors returned by [`Scheduler::execute`](crate::Scheduler::execute).
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum RunError {
    /// The graph could not be ordered; nothing was executed.
    #[error("dependency resolution failed: {0}")]
    Resolution(#[from] GraphError),

    /// A task failed and aborted the run.
    #[error("task {id} failed: {source}")]
    TaskFailed {
        /// Id of the failing task.
        id: String,
        /// The error reported by the task body.
        source: TaskError,
    },

    /// The run token was cancelled before every task was started.
    #[error("run cancelled")]
    Canceled,

    /// Another run of the same scheduler is in progress.
    #[error("scheduler is already running")]
    AlreadyRunning,
}

impl RunError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RunError::Resolution(_) => "run_resolution_failed",
            RunError::TaskFailed { .. } => "run_task_failed",
            RunError::Canceled => "run_canceled",
            RunError::AlreadyRunning => "run_already_running",
        }
    }

    /// Id of the task that aborted the run, if any.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            RunError::TaskFailed { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// # Errors produced by task bodies and recovery procedures.
///
/// The scheduler aborts a run on any of them. The recovery worker treats every
/// one as a failed attempt and moves on to the next.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Unrecoverable error; also reported for a panicking task body.
    #[error("fatal error: {reason}")]
    Fatal {
        /// The underlying error message.
        reason: String,
    },

    /// Execution failed.
    #[error("execution failed: {reason}")]
    Fail {
        /// The underlying error message.
        reason: String,
    },

    /// Execution observed cancellation and gave up.
    #[error("context cancelled")]
    Canceled,
}

impl TaskError {
    /// Shorthand for [`TaskError::Fail`].
    pub fn fail(reason: impl Into<String>) -> Self {
        TaskError::Fail {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`TaskError::Fatal`].
    pub fn fatal(reason: impl Into<String>) -> Self {
        TaskError::Fatal {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use flowvisor::TaskError;
    ///
    /// assert_eq!(TaskError::fatal("disk gone").as_label(), "task_fatal");
    /// assert_eq!(TaskError::Canceled.as_label(), "task_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fatal { .. } => "task_fatal",
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
        }
    }
}

/// # Outcome of a single unsuccessful recovery attempt.
///
/// Every variant is handled inside the supervisor by moving on to the next
/// attempt; none of them is returned to external callers.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecoveryError {
    /// The procedure did not finish within the recovery timeout.
    /// It keeps running detached; its outcome is discarded.
    #[error("recovery timeout exceeded after {timeout:?}")]
    Timeout {
        /// The configured per-attempt timeout.
        timeout: Duration,
    },

    /// The procedure returned an error.
    #[error("recovery failed: {0}")]
    Failed(#[from] TaskError),

    /// The procedure panicked.
    #[error("recovery panicked: {reason}")]
    Panicked {
        /// Panic payload, if it was a string.
        reason: String,
    },

    /// The supervisor stopped while the attempt was pending.
    #[error("supervisor stopped")]
    Canceled,
}

impl RecoveryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RecoveryError::Timeout { .. } => "recovery_timeout",
            RecoveryError::Failed(_) => "recovery_failed",
            RecoveryError::Panicked { .. } => "recovery_panicked",
            RecoveryError::Canceled => "recovery_canceled",
        }
    }
}

/// # Errors returned by supervisor lifecycle calls.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorError {
    /// `start` was already called.
    #[error("supervisor already started")]
    AlreadyStarted,

    /// `stop` was already called; a stopped supervisor cannot be restarted.
    #[error("supervisor stopped")]
    Stopped,
}

impl SupervisorError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SupervisorError::AlreadyStarted => "supervisor_already_started",
            SupervisorError::Stopped => "supervisor_stopped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_failed_names_task() {
        let err = RunError::TaskFailed {
            id: "b".into(),
            source: TaskError::fail("disk full"),
        };
        assert_eq!(err.task_id(), Some("b"));
        assert_eq!(err.to_string(), "task b failed: execution failed: disk full");
    }

    #[test]
    fn test_resolution_wraps_graph_error() {
        let err: RunError = GraphError::CircularDependency { id: "a".into() }.into();
        assert_eq!(err.as_label(), "run_resolution_failed");
        assert_eq!(
            err.to_string(),
            "dependency resolution failed: circular dependency detected: a"
        );
        assert!(err.task_id().is_none());
    }

    #[test]
    fn test_recovery_error_from_task_error() {
        let err: RecoveryError = TaskError::fail("refused").into();
        assert_eq!(err.as_label(), "recovery_failed");
    }
}
