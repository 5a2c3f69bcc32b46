//! # Recovery worker: drains the recovery queue, one component at a time.
//!
//! ```text
//! loop {
//!   name = queue.recv()                       (exits on cancel or closed queue)
//!   attempt_recovery(name):
//!     ├─ no procedure ─► RecoveryMissing, done
//!     ├─ state = Recovering, RecoveryStarting
//!     ├─ for attempt in 0..max_retries:
//!     │     ├─ delay = backoff.next(attempt), BackoffScheduled
//!     │     ├─ sleep(delay)                   (cancellable)
//!     │     └─ run_attempt(timeout)
//!     │           ├─ Ok  ─► mark_recovered, ComponentRecovered, done
//!     │           └─ Err ─► next attempt
//!     └─ handle_recovery_failure:
//!           mark_exhausted, RecoveryExhausted
//!           ├─ AutoRestart        ─► AutoRestartRequested, restart hook
//!           └─ ManualIntervention ─► ManualInterventionRequired
//! }
//! ```
//!
//! Recoveries never overlap: the worker finishes a whole cycle (including its
//! backoff sleeps) before dequeuing the next name. A cycle interrupted by `stop`
//! leaves the component in `Recovering`.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time;

use crate::core::{runner::run_attempt, supervisor::Supervisor};
use crate::error::RecoveryError;
use crate::events::{Event, EventKind};
use crate::policies::FailurePolicy;

pub(super) async fn recovery_worker(sup: Arc<Supervisor>, mut rx: mpsc::Receiver<String>) {
    loop {
        let name = tokio::select! {
            _ = sup.token.cancelled() => break,
            next = rx.recv() => match next {
                Some(name) => name,
                None => break,
            },
        };
        sup.attempt_recovery(&name).await;
    }
}

impl Supervisor {
    /// Runs one full recovery cycle for `name`.
    pub(super) async fn attempt_recovery(&self, name: &str) {
        let Some(recover) = self.registry.begin_recovery(name) else {
            self.bus
                .publish(Event::new(EventKind::RecoveryMissing).with_component(name));
            return;
        };
        self.bus.publish(
            Event::new(EventKind::RecoveryStarting)
                .with_component(name)
                .with_reason(recover.name().to_string()),
        );

        let timeout = self.cfg.recovery_timeout();
        for attempt in 0..self.cfg.max_retries {
            let delay = self.backoff.next(attempt);
            self.bus.publish(
                Event::new(EventKind::BackoffScheduled)
                    .with_component(name)
                    .with_attempt(attempt)
                    .with_delay(delay),
            );
            tokio::select! {
                _ = self.token.cancelled() => return,
                _ = time::sleep(delay) => {}
            }

            match run_attempt(&recover, name, attempt, timeout, &self.token, &self.bus).await {
                Ok(()) => {
                    if self.registry.mark_recovered(name).is_some() {
                        self.bus.publish(
                            Event::new(EventKind::ComponentRecovered)
                                .with_component(name)
                                .with_attempt(attempt),
                        );
                    }
                    return;
                }
                Err(RecoveryError::Canceled) => return,
                Err(_) => continue,
            }
        }

        self.handle_recovery_failure(name);
    }

    /// Marks `name` as failed permanently and applies the exhaustion policy.
    fn handle_recovery_failure(&self, name: &str) {
        if self.registry.mark_exhausted(name).is_none() {
            return;
        }
        self.bus.publish(
            Event::new(EventKind::RecoveryExhausted)
                .with_component(name)
                .with_attempt(self.cfg.max_retries),
        );

        match self.cfg.on_exhausted {
            FailurePolicy::AutoRestart => {
                self.bus
                    .publish(Event::new(EventKind::AutoRestartRequested).with_component(name));
                if let Some(hook) = &self.restart_hook {
                    hook(name);
                }
            }
            FailurePolicy::ManualIntervention => {
                self.bus.publish(
                    Event::new(EventKind::ManualInterventionRequired).with_component(name),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Config, RecoveryState, Supervisor};
    use crate::error::TaskError;
    use crate::events::EventKind;
    use crate::policies::FailurePolicy;
    use crate::tasks::{RecoverFn, RecoverRef};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    fn config(base_ms: u64) -> Config {
        Config {
            backoff_base: Duration::from_millis(base_ms),
            recovery_timeout: Duration::from_secs(5),
            ..Config::default()
        }
    }

    /// Procedure that fails its first `failures` calls.
    fn flaky(failures: u32, calls: &Arc<AtomicU32>) -> RecoverRef {
        let calls = calls.clone();
        RecoverFn::arc("flaky", move || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < failures {
                    Err(TaskError::fail(format!("attempt {n} refused")))
                } else {
                    Ok(())
                }
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_second_attempt() {
        let sup = Supervisor::new(config(100));
        let calls = Arc::new(AtomicU32::new(0));
        sup.register_component("db", flaky(1, &calls));
        sup.report_error("db", "refused");

        let started = Instant::now();
        sup.attempt_recovery("db").await;

        assert!(started.elapsed() >= Duration::from_millis(300));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let status = sup.component_health("db").unwrap();
        assert!(status.is_healthy);
        assert_eq!(status.error_count, 0);
        assert!(status.last_error.is_none());
        assert_eq!(status.recovery_attempts, 1);
        assert_eq!(status.recovery_state, RecoveryState::Recovered);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_error_is_retried() {
        let sup = Supervisor::new(config(10));
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let fatal_once: RecoverRef = RecoverFn::arc("fatal-once", move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(TaskError::fatal("credentials revoked"))
                } else {
                    Ok(())
                }
            }
        });
        sup.register_component("vault", fatal_once);
        sup.report_error("vault", "sealed");

        sup.attempt_recovery("vault").await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let status = sup.component_health("vault").unwrap();
        assert!(status.is_healthy);
        assert_eq!(status.recovery_state, RecoveryState::Recovered);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_after_max_retries() {
        let sup = Supervisor::new(config(10));
        let mut rx = sup.bus().subscribe();
        let calls = Arc::new(AtomicU32::new(0));
        sup.register_component("db", flaky(u32::MAX, &calls));
        sup.report_error("db", "refused");

        sup.attempt_recovery("db").await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let status = sup.component_health("db").unwrap();
        assert!(!status.is_healthy);
        assert_eq!(status.recovery_attempts, 1);
        assert_eq!(status.recovery_state, RecoveryState::Exhausted);

        let kinds: Vec<EventKind> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|ev| ev.kind)
            .collect();
        let failed = kinds
            .iter()
            .filter(|k| **k == EventKind::RecoveryAttemptFailed)
            .count();
        assert_eq!(failed, 3);
        assert!(kinds.contains(&EventKind::RecoveryExhausted));
        assert!(kinds.contains(&EventKind::ManualInterventionRequired));
        assert!(!kinds.contains(&EventKind::AutoRestartRequested));
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_restart_calls_hook() {
        let restarted: Arc<Mutex<Vec<String>>> = Arc::default();
        let seen = restarted.clone();
        let sup = Supervisor::builder(Config {
            max_retries: 1,
            on_exhausted: FailurePolicy::AutoRestart,
            ..config(10)
        })
        .with_restart_hook(move |name| seen.lock().push(name.to_string()))
        .build();
        let calls = Arc::new(AtomicU32::new(0));
        sup.register_component("queue", flaky(u32::MAX, &calls));

        sup.attempt_recovery("queue").await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*restarted.lock(), vec!["queue".to_string()]);
        assert!(sup.component_health("queue").unwrap().is_exhausted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_attempts_count_as_failures() {
        let sup = Supervisor::new(Config {
            max_retries: 2,
            recovery_timeout: Duration::from_secs(1),
            ..config(10)
        });
        let hang: RecoverRef = RecoverFn::arc("hang", || async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok::<_, TaskError>(())
        });
        sup.register_component("ldap", hang);

        let started = Instant::now();
        sup.attempt_recovery("ldap").await;

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert!(started.elapsed() < Duration::from_secs(3600));
        assert!(sup.component_health("ldap").unwrap().is_exhausted());
    }

    #[tokio::test]
    async fn test_unknown_component_is_abandoned() {
        let sup = Supervisor::new(config(10));
        let mut rx = sup.bus().subscribe();

        sup.attempt_recovery("ghost").await;

        assert_eq!(rx.try_recv().unwrap().kind, EventKind::RecoveryMissing);
        assert!(sup.component_health("ghost").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_recovers_reported_component() {
        let sup = Supervisor::new(Config {
            health_check_interval: Duration::from_secs(1),
            ..config(10)
        });
        let mut rx = sup.bus().subscribe();
        let calls = Arc::new(AtomicU32::new(0));
        sup.register_component("db", flaky(0, &calls));
        sup.start().unwrap();
        sup.report_error("db", "refused");

        tokio::time::timeout(Duration::from_secs(60), async {
            loop {
                match rx.recv().await {
                    Ok(ev) if ev.kind == EventKind::ComponentRecovered => break,
                    Ok(_) => continue,
                    Err(e) => panic!("bus closed: {e}"),
                }
            }
        })
        .await
        .unwrap();

        assert!(sup.component_health("db").unwrap().is_healthy);
        sup.stop();
        sup.stopped().await;
    }
}
