//! # Run a single recovery attempt.
//!
//! Executes one attempt of a [`Recover`](crate::Recover) procedure on its own Tokio
//! task, with an optional timeout, and publishes per-attempt events to [`Bus`].
//!
//! ## Event flow
//!
//! ```text
//! Success:
//!   spawn(recover()) → Ok(())             → (no event; caller publishes ComponentRecovered)
//!
//! Failure:
//!   spawn(recover()) → Err(e) | panic     → publish RecoveryAttemptFailed
//!
//! Timeout:
//!   timeout exceeded → detach procedure   → publish RecoveryTimeoutHit
//!                                         → publish RecoveryAttemptFailed
//!
//! Cancellation:
//!   supervisor token cancelled            → detach procedure, Err(Canceled), no event
//! ```
//!
//! ## Rules
//! - The procedure is **never aborted**: on timeout or cancellation its join handle is
//!   dropped and the task keeps running; whatever it returns later is ignored.
//! - A panicking procedure is reported as [`RecoveryError::Panicked`].

use std::any::Any;
use std::time::Duration;

use tokio::task::JoinError;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::{
    error::{RecoveryError, TaskError},
    events::{Bus, Event, EventKind},
    tasks::RecoverRef,
};

/// Executes attempt `attempt` of `recover` for `component`.
pub(crate) async fn run_attempt(
    recover: &RecoverRef,
    component: &str,
    attempt: u32,
    timeout: Option<Duration>,
    token: &CancellationToken,
    bus: &Bus,
) -> Result<(), RecoveryError> {
    let procedure = recover.clone();
    let handle = tokio::spawn(async move { procedure.recover().await });

    let res = tokio::select! {
        _ = token.cancelled() => return Err(RecoveryError::Canceled),
        res = async {
            match timeout {
                Some(dur) => match time::timeout(dur, handle).await {
                    Ok(joined) => flatten(joined),
                    Err(_elapsed) => Err(RecoveryError::Timeout { timeout: dur }),
                },
                None => flatten(handle.await),
            }
        } => res,
    };

    match &res {
        Ok(()) | Err(RecoveryError::Canceled) => {}
        Err(e) => {
            if let RecoveryError::Timeout { timeout } = e {
                publish_timeout(bus, component, *timeout, attempt);
            }
            publish_failed(bus, component, attempt, e);
        }
    }
    res
}

fn flatten(joined: Result<Result<(), TaskError>, JoinError>) -> Result<(), RecoveryError> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(RecoveryError::Failed(e)),
        Err(join_err) if join_err.is_panic() => Err(RecoveryError::Panicked {
            reason: panic_message(join_err.into_panic()),
        }),
        Err(_) => Err(RecoveryError::Canceled),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Publishes `RecoveryAttemptFailed` with error details.
fn publish_failed(bus: &Bus, component: &str, attempt: u32, err: &RecoveryError) {
    bus.publish(
        Event::new(EventKind::RecoveryAttemptFailed)
            .with_component(component)
            .with_attempt(attempt)
            .with_reason(err.to_string()),
    );
}

/// Publishes `RecoveryTimeoutHit` (always followed by `RecoveryAttemptFailed`).
fn publish_timeout(bus: &Bus, component: &str, dur: Duration, attempt: u32) {
    bus.publish(
        Event::new(EventKind::RecoveryTimeoutHit)
            .with_component(component)
            .with_timeout(dur)
            .with_attempt(attempt),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::RecoverFn;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_success() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let ok: RecoverRef = RecoverFn::arc("ok", || async { Ok::<_, TaskError>(()) });

        let res = run_attempt(&ok, "db", 0, None, &CancellationToken::new(), &bus).await;
        assert!(res.is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failure_publishes_attempt_failed() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let bad: RecoverRef =
            RecoverFn::arc("bad", || async { Err::<(), _>(TaskError::fail("refused")) });

        let res = run_attempt(&bad, "db", 1, None, &CancellationToken::new(), &bus).await;
        assert_eq!(res, Err(RecoveryError::Failed(TaskError::fail("refused"))));

        let ev = rx.try_recv().unwrap();
        assert_eq!(ev.kind, EventKind::RecoveryAttemptFailed);
        assert_eq!(ev.attempt, Some(1));
        assert_eq!(ev.component.as_deref(), Some("db"));
    }

    #[tokio::test]
    async fn test_panic_is_reported() {
        let bus = Bus::new(8);
        let boom: RecoverRef = RecoverFn::arc("boom", || async {
            if true {
                panic!("wires crossed");
            }
            Ok::<_, TaskError>(())
        });

        let res = run_attempt(&boom, "db", 0, None, &CancellationToken::new(), &bus).await;
        assert_eq!(
            res,
            Err(RecoveryError::Panicked {
                reason: "wires crossed".into()
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_detaches_procedure() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();
        let slow: RecoverRef = RecoverFn::arc("slow", move || {
            let flag = flag.clone();
            async move {
                time::sleep(Duration::from_secs(10)).await;
                flag.store(true, Ordering::SeqCst);
                Ok::<_, TaskError>(())
            }
        });

        let timeout = Duration::from_secs(1);
        let res = run_attempt(&slow, "db", 0, Some(timeout), &CancellationToken::new(), &bus).await;
        assert_eq!(res, Err(RecoveryError::Timeout { timeout }));
        assert_eq!(rx.try_recv().unwrap().kind, EventKind::RecoveryTimeoutHit);
        assert_eq!(rx.try_recv().unwrap().kind, EventKind::RecoveryAttemptFailed);

        assert!(!finished.load(Ordering::SeqCst));
        time::sleep(Duration::from_secs(10)).await;
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_returns_canceled() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let token = CancellationToken::new();
        let slow: RecoverRef = RecoverFn::arc("slow", || async {
            time::sleep(Duration::from_secs(60)).await;
            Ok::<_, TaskError>(())
        });

        let canceller = token.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_secs(1)).await;
            canceller.cancel();
        });

        let res = run_attempt(&slow, "db", 0, None, &token, &bus).await;
        assert_eq!(res, Err(RecoveryError::Canceled));
        assert!(rx.try_recv().is_err());
    }
}
