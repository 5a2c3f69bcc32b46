//! # Core subscriber trait
//!
//! `Subscribe` is the notification port of the crate: telemetry, alerting or
//! log shipping plug in here without the scheduler or supervisor knowing about
//! any transport. Each subscriber is driven by a dedicated worker loop fed by a
//! bounded queue owned by the [`SubscriberSet`](crate::SubscriberSet).
//!
//! ## Contract
//! - Implementations may be slow (I/O, batching, retries); they do **not** block
//!   publishers nor other subscribers.
//! - Each subscriber declares its preferred queue capacity via
//!   [`Subscribe::queue_capacity`]. On overflow events for that subscriber are
//!   **dropped** (warn).

use crate::events::Event;
use async_trait::async_trait;

/// Contract for event subscribers.
///
/// Called from a subscriber-dedicated worker task.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this subscriber's queue.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
