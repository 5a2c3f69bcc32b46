//! # Task and recovery abstractions.
//!
//! - [`Task`] - trait for async cancelable task bodies
//! - [`TaskFn`] - closure-based task body
//! - [`TaskRef`] - shared reference to a task body (`Arc<dyn Task>`)
//! - [`TaskSpec`] - task body plus id and dependencies
//! - [`Recover`], [`RecoverFn`], [`RecoverRef`] - component recovery procedures

mod recover;
mod spec;
mod task;
mod task_fn;

pub use recover::{Recover, RecoverFn, RecoverRef};
pub use spec::TaskSpec;
pub use task::{Task, TaskRef};
pub use task_fn::TaskFn;
