//! # Task graph: dependency resolution and fail-fast execution.
//!
//! - [`Scheduler`] - registers [`TaskSpec`](crate::TaskSpec)s, orders and runs them
//! - [`SchedulerBuilder`] - attaches subscribers and a [`FailureHandler`]
//! - [`SchedulerConfig`], [`DependencyMode`] - configuration
//! - [`TaskStatus`], [`TaskState`] - per-task runtime state

mod config;
mod resolve;
mod scheduler;
mod state;

pub use config::{DependencyMode, SchedulerConfig};
pub use scheduler::{FailureHandler, Scheduler, SchedulerBuilder};
pub use state::{TaskState, TaskStatus};
