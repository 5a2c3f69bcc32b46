//! # Task body abstraction.
//!
//! This module defines the [`Task`] trait (async, cancelable) and the shared
//! handle type [`TaskRef`]. A closure-backed implementation lives in
//! [`TaskFn`](crate::TaskFn).
//!
//! A task receives a [`CancellationToken`] and should check it to stop
//! cooperatively when the run is cancelled.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Shared handle to a task body.
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous, cancelable unit of work.
///
/// A `Task` has a human-readable [`name`](Task::name) and an async
/// [`run`](Task::run) method that yields an opaque result value.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use async_trait::async_trait;
/// use serde_json::{json, Value};
/// use flowvisor::{Task, TaskError};
///
/// struct FetchUser;
///
/// #[async_trait]
/// impl Task for FetchUser {
///     fn name(&self) -> &str { "fetch user" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<Value, TaskError> {
///         if ctx.is_cancelled() {
///             return Err(TaskError::Canceled);
///         }
///         Ok(json!({ "id": 7 }))
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Executes the task once.
    async fn run(&self, ctx: CancellationToken) -> Result<Value, TaskError>;
}
