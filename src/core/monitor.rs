//! # Health-check loop.
//!
//! ```text
//! every health_check_interval (first tick one interval after start):
//!   snapshot (status, probe) of every component     ── read lock, released
//!   for each:
//!     healthy = probe.probe(&status).await          ── no lock held
//!     store verdict + last_checked                  ── write lock, released
//!     unhealthy → ComponentUnhealthy, schedule_recovery(name)
//! exits when the supervisor token is cancelled
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};

use crate::core::supervisor::Supervisor;
use crate::events::{Event, EventKind};

/// Smallest accepted check period (`tokio::time::interval` rejects zero).
const MIN_PERIOD: Duration = Duration::from_millis(1);

pub(super) async fn health_check_loop(sup: Arc<Supervisor>) {
    let period = sup.cfg.health_check_interval.max(MIN_PERIOD);
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = sup.token.cancelled() => break,
            _ = ticker.tick() => sup.check_health().await,
        }
    }
}

impl Supervisor {
    /// Runs one health-check pass over every registered component.
    pub(super) async fn check_health(&self) {
        for (status, probe) in self.registry.snapshot() {
            let name = status.component_name.as_str();
            let verdict = probe.probe(&status).await;

            let Some(healthy) = self.registry.apply_check(name, verdict, status.error_count)
            else {
                continue;
            };
            if !healthy {
                self.bus.publish(
                    Event::new(EventKind::ComponentUnhealthy)
                        .with_component(name)
                        .with_attempt(status.error_count),
                );
                self.schedule_recovery(name);
            }
        }
    }
}
