//! # Non-blocking event fan-out to multiple subscribers.
//!
//! Provides [`SubscriberSet`] - distributes events to multiple subscribers
//! concurrently without blocking the publisher.
//!
//! ## Architecture
//! ```text
//! emit(event)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► subscriber1.on_event()
//!     │    (bounded)         └──────► panic → SubscriberPanicked
//!     ├──► [queue 2] ──► worker 2 ──► subscriber2.on_event()
//!     └──► [queue N] ──► worker N ──► subscriberN.on_event()
//! ```
//!
//! ## Rules
//! - **Overflow**: event dropped for that subscriber only, `SubscriberOverflow` published
//! - **Non-blocking**: `emit()` returns immediately (uses `try_send`)
//! - **Isolation**: a slow or panicking subscriber doesn't affect others
//! - **Per-subscriber FIFO**: each subscriber sees events in order
//!
//! Workers use `catch_unwind` with `AssertUnwindSafe`: a subscriber that panics
//! while holding its own lock may leave that state inconsistent.

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::broadcast::error::RecvError;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::events::{Bus, Event};
use crate::subscribers::Subscribe;

/// Per-subscriber channel metadata.
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Fan-out coordinator for multiple event subscribers.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker task per subscriber.
    ///
    /// Must be called inside a Tokio runtime when `subs` is not empty.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(cap);
            let bus_for_worker = bus.clone();

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = sub.on_event(ev.as_ref());

                    let res = std::panic::AssertUnwindSafe(fut).catch_unwind().await;
                    if let Err(panic_err) = res {
                        let info = if let Some(msg) = panic_err.downcast_ref::<&'static str>() {
                            (*msg).to_string()
                        } else if let Some(msg) = panic_err.downcast_ref::<String>() {
                            msg.clone()
                        } else {
                            "unknown panic".to_string()
                        };
                        bus_for_worker.publish(Event::subscriber_panicked(sub.name(), info));
                    }
                }
            });
            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(handle);
        }
        Self {
            channels,
            workers,
            bus,
        }
    }

    /// Emits an event to all subscribers (clones the event once).
    pub fn emit(&self, event: &Event) {
        self.emit_arc(Arc::new(event.clone()));
    }

    /// Emits a pre-allocated `Arc<Event>` to all subscribers.
    ///
    /// `SubscriberOverflow` events are not re-published if they themselves overflow.
    pub fn emit_arc(&self, event: Arc<Event>) {
        let is_overflow_evt = event.is_subscriber_overflow();

        for channel in &self.channels {
            let reason = match channel.sender.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            tracing::warn!(subscriber = channel.name, reason, "subscriber dropped event");
            if !is_overflow_evt {
                self.bus
                    .publish(Event::subscriber_overflow(channel.name, reason));
            }
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Gracefully shuts down all subscriber workers.
    ///
    /// Drops all senders, then awaits the workers draining their queues.
    pub async fn shutdown(self) {
        drop(self.channels);
        for h in self.workers {
            let _ = h.await;
        }
    }
}

/// Subscribes to the bus and forwards events to the subscriber set (fire-and-forget).
///
/// Does nothing when the set is empty. The listener ends once `token` is cancelled
/// (after forwarding the events already buffered) or the bus closes. It owns the
/// only handle to `set`, so its exit drops the set, which closes every worker
/// queue and releases the subscribers.
pub(crate) fn spawn_listener(bus: &Bus, set: Arc<SubscriberSet>, token: CancellationToken) {
    if set.is_empty() {
        return;
    }
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                msg = rx.recv() => match msg {
                    Ok(ev) => set.emit(&ev),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "event listener lagged behind the bus");
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = token.cancelled() => break,
            }
        }
    });
}
