//! # Function-backed task (`TaskFn`)
//!
//! [`TaskFn`] wraps a closure `F: Fn(CancellationToken) -> Fut`, producing a fresh
//! future per run. State shared between runs must be captured explicitly
//! (e.g. an `Arc<...>` cloned into the closure).
//!
//! ## Example
//! ```rust
//! use serde_json::json;
//! use tokio_util::sync::CancellationToken;
//! use flowvisor::{TaskFn, TaskRef, TaskError};
//!
//! let t: TaskRef = TaskFn::arc("load config", |_ctx: CancellationToken| async move {
//!     Ok::<_, TaskError>(json!("loaded"))
//! });
//!
//! assert_eq!(t.name(), "load config");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::tasks::task::Task;

/// Function-backed task implementation.
#[derive(Debug)]
pub struct TaskFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> TaskFn<F> {
    /// Creates a new function-backed task.
    ///
    /// Prefer [`TaskFn::arc`] when you immediately need a [`TaskRef`](crate::TaskRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the task and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Task for TaskFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, TaskError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: CancellationToken) -> Result<Value, TaskError> {
        (self.f)(ctx).await
    }
}
