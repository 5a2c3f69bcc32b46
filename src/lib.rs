//! # flowvisor
//!
//! **Flowvisor** is the orchestration core of an automation platform: it runs
//! dependency-ordered task graphs and keeps long-lived components healthy.
//!
//! It provides two independent building blocks sharing one event model:
//! - [`Scheduler`]: registers tasks with dependencies, detects cycles, orders them
//!   topologically and runs them one at a time, stopping at the first failure.
//! - [`Supervisor`]: tracks component health, runs a periodic health check and
//!   drives a single recovery worker with exponential backoff, per-attempt
//!   timeouts and a bounded queue.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   TaskSpec ─┐                                   register_component ─┐
//!   TaskSpec ─┼─► Scheduler                        report_error ───────┼─► Supervisor
//!   TaskSpec ─┘    ├─ resolve (DFS, cycle check)   clear_errors ───────┘    ├─ Registry (RwLock)
//!                  └─ execute (sequential,                                  ├─ health-check loop
//!                     fail-fast, cancellable)                               ├─ recovery queue (100)
//!                                                                           └─ recovery worker
//!        │                                                  │
//!        │ TaskStarting / TaskCompleted / TaskFailed        │ ErrorReported / ComponentUnhealthy /
//!        │ RunCompleted / RunAborted / RunCanceled          │ BackoffScheduled / ComponentRecovered /
//!        ▼                                                  ▼ RecoveryExhausted / ...
//! ┌───────────────────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel, one per owner)                 │
//! └──────────────────────────────────────┬────────────────────────────────────────┘
//!                                        ▼
//!                              SubscriberSet (per-subscriber queues)
//!                                ┌───────┼────────┐
//!                                ▼       ▼        ▼
//!                           LogWriter  custom   custom
//! ```
//!
//! ### Recovery cycle
//! ```text
//! health check finds component unhealthy ─► schedule_recovery (try_send, drop if full)
//!
//! recovery worker:
//!   for attempt in 0..max_retries {
//!   ├─► sleep(backoff_base × 2^attempt)         (cancellable)
//!   ├─► spawn(procedure), race recovery_timeout
//!   │       ├─ Ok      ─► healthy, errors reset, done
//!   │       ├─ Err     ─► next attempt
//!   │       └─ Timeout ─► procedure left running, next attempt
//!   }
//!   exhausted ─► AutoRestart (hook) | ManualIntervention
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                           |
//! |-------------------|---------------------------------------------------------------|----------------------------------------------|
//! | **Task graph**    | Dependency resolution and fail-fast execution.                | [`Scheduler`], [`TaskSpec`], [`TaskStatus`]  |
//! | **Self-healing**  | Health checks, bounded recovery with backoff and timeouts.    | [`Supervisor`], [`HealthStatus`], [`Recover`]|
//! | **Policies**      | Backoff, jitter, behavior after exhaustion.                   | [`BackoffPolicy`], [`FailurePolicy`]         |
//! | **Subscriber API**| Hook into runtime events (logging, metrics, alerts).          | [`Subscribe`], [`LogWriter`]                 |
//! | **Errors**        | Typed errors for graph, runs, tasks and recovery.             | [`GraphError`], [`RunError`], [`TaskError`]  |
//! | **Configuration** | Centralize runtime settings.                                  | [`Config`], [`SchedulerConfig`]              |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use tokio_util::sync::CancellationToken;
//! use flowvisor::{LogWriter, Scheduler, SchedulerConfig, Subscribe, TaskError, TaskFn, TaskSpec};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
//!     let scheduler = Scheduler::builder(SchedulerConfig::default())
//!         .with_subscribers(subs)
//!         .with_failure_handler(|id, err| eprintln!("task {id} failed: {err}"))
//!         .build();
//!
//!     let extract = TaskFn::arc("extract", |_ctx: CancellationToken| async move {
//!         Ok::<_, TaskError>(json!({ "rows": 42 }))
//!     });
//!     let load = TaskFn::arc("load", |ctx: CancellationToken| async move {
//!         if ctx.is_cancelled() {
//!             return Err(TaskError::Canceled);
//!         }
//!         Ok(json!("loaded"))
//!     });
//!
//!     scheduler.add_task(TaskSpec::new("load", load).depends_on(["extract"]))?;
//!     scheduler.add_task(TaskSpec::new("extract", extract))?;
//!
//!     scheduler.execute(CancellationToken::new()).await?;
//!     assert_eq!(scheduler.result("extract"), Some(json!({ "rows": 42 })));
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod graph;
mod policies;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use core::{
    Config, ErrorCountProbe, HealthProbe, HealthStatus, ProbeRef, RECOVERY_QUEUE_CAPACITY,
    RecoveryState, RestartHook, Supervisor, SupervisorBuilder,
};
pub use error::{GraphError, RecoveryError, RunError, SupervisorError, TaskError};
pub use events::{Bus, Event, EventKind};
pub use graph::{
    DependencyMode, FailureHandler, Scheduler, SchedulerBuilder, SchedulerConfig, TaskState,
    TaskStatus,
};
pub use policies::{BackoffPolicy, FailurePolicy, JitterPolicy};
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
pub use tasks::{Recover, RecoverFn, RecoverRef, Task, TaskFn, TaskRef, TaskSpec};
