use std::fmt;

use serde_json::Value;

use crate::error::TaskError;

/// Lifecycle of a task within one run.
///
/// ```text
/// Pending ──► Running ──► Completed
///                    └──► Failed
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Registered, not started in the current run.
    #[default]
    Pending,
    /// Body is executing.
    Running,
    /// Body returned a value.
    Completed,
    /// Body returned an error.
    Failed,
}

impl TaskStatus {
    /// Returns the lowercase status name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime fields of a registered task, mutated only by the scheduler.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskState {
    /// Current status.
    pub status: TaskStatus,
    /// Value returned by the body (set on success).
    pub result: Option<Value>,
    /// Error returned by the body (set on failure).
    pub error: Option<TaskError>,
}
