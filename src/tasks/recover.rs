//! # Recovery procedures.
//!
//! A [`Recover`] implementation restores one supervised component (reconnect,
//! reload, restart a subsystem). The supervisor runs each attempt on its own
//! Tokio task and races it against the recovery timeout; a procedure that
//! outlives the timeout keeps running, but its outcome is ignored.
//!
//! [`RecoverFn`] adapts a zero-argument closure returning a future.

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TaskError;

/// Shared handle to a recovery procedure.
pub type RecoverRef = Arc<dyn Recover>;

/// Procedure that attempts to bring a component back to health.
#[async_trait]
pub trait Recover: Send + Sync + 'static {
    /// Human-readable name of the procedure.
    fn name(&self) -> &str;

    /// Runs one recovery attempt.
    async fn recover(&self) -> Result<(), TaskError>;
}

/// Closure-backed recovery procedure.
///
/// ## Example
/// ```rust
/// use flowvisor::{RecoverFn, RecoverRef, TaskError};
///
/// let reconnect: RecoverRef = RecoverFn::arc("reconnect db", || async {
///     Ok::<_, TaskError>(())
/// });
/// assert_eq!(reconnect.name(), "reconnect db");
/// ```
#[derive(Debug)]
pub struct RecoverFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> RecoverFn<F> {
    /// Creates a new closure-backed procedure.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the procedure and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Recover for RecoverFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn recover(&self) -> Result<(), TaskError> {
        (self.f)().await
    }
}
