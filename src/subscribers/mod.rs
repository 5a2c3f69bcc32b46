//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out
//! and the built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Scheduler / Supervisor ── publish(Event) ──► Bus ──► listener ──► SubscriberSet
//!                                                                      │
//!                                                        ┌─────────────┼──────────┐
//!                                                        ▼             ▼          ▼
//!                                                    LogWriter     Telemetry    Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use flowvisor::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct Alerts;
//!
//! #[async_trait]
//! impl Subscribe for Alerts {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::ManualInterventionRequired {
//!             // page someone
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "alerts" }
//! }
//! ```

mod log;
mod subscribe;
mod subscriber_set;

pub use log::LogWriter;
pub use subscribe::Subscribe;
pub use subscriber_set::SubscriberSet;

pub(crate) use subscriber_set::spawn_listener;
