//! # Task specification for dependency-ordered execution.
//!
//! [`TaskSpec`] bundles a task body with the id it is registered under and the
//! ids it depends on. Specs are handed to
//! [`Scheduler::add_task`](crate::Scheduler::add_task).
//!
//! ## Rules
//! - `id` must be unique within one scheduler.
//! - `dependencies` keep their declared order and may name tasks that are
//!   registered later, or never (see [`DependencyMode`](crate::DependencyMode)).

use crate::tasks::task::TaskRef;

/// Specification of one node of the task graph.
///
/// ## Example
/// ```rust
/// use serde_json::Value;
/// use tokio_util::sync::CancellationToken;
/// use flowvisor::{TaskSpec, TaskFn, TaskRef, TaskError};
///
/// let build: TaskRef = TaskFn::arc("build", |_ctx: CancellationToken| async move {
///     Ok::<_, TaskError>(Value::Null)
/// });
///
/// let spec = TaskSpec::new("build", build).depends_on(["fetch", "configure"]);
/// assert_eq!(spec.id(), "build");
/// assert_eq!(spec.dependencies(), ["fetch", "configure"]);
/// ```
#[derive(Clone)]
pub struct TaskSpec {
    id: String,
    dependencies: Vec<String>,
    task: TaskRef,
}

impl TaskSpec {
    /// Creates a spec without dependencies.
    pub fn new(id: impl Into<String>, task: TaskRef) -> Self {
        Self {
            id: id.into(),
            dependencies: Vec::new(),
            task,
        }
    }

    /// Returns a new spec that additionally depends on the given ids.
    pub fn depends_on<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Returns the task id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Convenience: returns the task body's name.
    pub fn name(&self) -> &str {
        self.task.name()
    }

    /// Returns the declared dependency ids, in order.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Returns reference to the task body.
    pub fn task(&self) -> &TaskRef {
        &self.task
    }
}

impl std::fmt::Debug for TaskSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSpec")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("dependencies", &self.dependencies)
            .finish()
    }
}
