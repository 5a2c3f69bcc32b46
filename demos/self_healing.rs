//! # Example: self_healing
//!
//! Supervises two components. `database` reconnects on its second attempt;
//! `cache` never comes back: each cycle ends in manual intervention and the next
//! health check queues it again.
//!
//! ## Flow
//! ```text
//! report_error(database), report_error(cache)     → both unhealthy immediately
//! health check (after 1s)                         → both enqueued
//! recovery worker:
//!   database: sleep 200ms → fail, sleep 400ms → ok          → Recovered
//!   cache:    sleep 200ms → fail, 400ms → fail, 800ms → fail → Exhausted
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example self_healing
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use flowvisor::{Config, LogWriter, RecoverFn, RecoverRef, Subscribe, Supervisor, TaskError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // 1. Short intervals so the demo finishes quickly
    let cfg = Config {
        backoff_base: Duration::from_millis(200),
        health_check_interval: Duration::from_secs(1),
        recovery_timeout: Duration::from_secs(2),
        ..Config::default()
    };
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let sup = Supervisor::builder(cfg).with_subscribers(subs).build();

    // 2. Recovery procedures
    let tries = Arc::new(AtomicU32::new(0));
    let counter = tries.clone();
    let reconnect: RecoverRef = RecoverFn::arc("reconnect", move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            if n == 0 {
                Err(TaskError::fail("connection refused"))
            } else {
                Ok(())
            }
        }
    });
    let flush: RecoverRef = RecoverFn::arc("flush cache", || async {
        Err::<(), _>(TaskError::fail("cache node unreachable"))
    });

    sup.register_component("database", reconnect);
    sup.register_component("cache", flush);
    sup.start()?;

    // 3. Faults
    sup.report_error("database", "connection reset by peer");
    sup.report_error("cache", "eviction storm");

    // 4. Wait for both cycles to finish
    tokio::time::sleep(Duration::from_secs(4)).await;

    let mut health: Vec<_> = sup.health_status().into_values().collect();
    health.sort_by(|a, b| a.component_name.cmp(&b.component_name));
    for h in health {
        println!(
            "[self_healing] {:<8} healthy={} errors={} cycles={} state={}",
            h.component_name,
            h.is_healthy,
            h.error_count,
            h.recovery_attempts,
            h.recovery_state.as_str(),
        );
    }

    sup.stop();
    sup.stopped().await;
    Ok(())
}
