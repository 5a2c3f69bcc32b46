//! Self-healing supervisor: health monitoring and bounded recovery.
//!
//! The public API from this module is [`Supervisor`] (with [`SupervisorBuilder`]),
//! its [`Config`] and the health types.
//!
//! Internal modules:
//! - [`registry`]: component table (health record, procedure, probe) under one lock;
//! - [`monitor`]: the periodic health-check loop;
//! - [`recovery`]: the single recovery worker, backoff and exhaustion handling;
//! - [`runner`]: executes one recovery attempt with timeout and event publishing;
//! - [`supervisor`]: public API and lifecycle.

mod builder;
mod config;
mod health;
mod monitor;
mod recovery;
mod registry;
mod runner;
mod supervisor;

pub use builder::SupervisorBuilder;
pub use config::{Config, RECOVERY_QUEUE_CAPACITY};
pub use health::{ErrorCountProbe, HealthProbe, HealthStatus, ProbeRef, RecoveryState};
pub use supervisor::{RestartHook, Supervisor};
