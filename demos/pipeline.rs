//! # Example: pipeline
//!
//! Runs a small build pipeline through the [`Scheduler`]: tasks are registered
//! out of order, resolved into dependency order and executed one at a time.
//! The second run injects a failing `test` step to show fail-fast behavior.
//!
//! ## Flow
//! ```text
//! fetch ──► build ──► test ──► package
//!    └────► lint ─────┘
//!
//! run 1: fetch, build, lint, test, package   → all Completed
//! run 2: fetch, build, lint, test (fails)    → package stays Pending
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example pipeline
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use flowvisor::{
    LogWriter, Scheduler, SchedulerConfig, Subscribe, TaskError, TaskFn, TaskRef, TaskSpec,
};

fn step(name: &'static str) -> TaskRef {
    TaskFn::arc(name, move |ctx: CancellationToken| async move {
        tokio::select! {
            _ = ctx.cancelled() => Err(TaskError::Canceled),
            _ = tokio::time::sleep(Duration::from_millis(50)) => Ok(json!({ "step": name })),
        }
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // 1. Scheduler with the tracing-backed LogWriter and a failure callback
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let scheduler = Scheduler::builder(SchedulerConfig::default())
        .with_subscribers(subs)
        .with_failure_handler(|id, err| eprintln!("[pipeline] step {id} failed: {err}"))
        .build();

    // 2. The test step fails once the flag is flipped
    let break_tests = Arc::new(AtomicBool::new(false));
    let flag = break_tests.clone();
    let test: TaskRef = TaskFn::arc("test", move |_ctx: CancellationToken| {
        let broken = flag.load(Ordering::SeqCst);
        async move {
            if broken {
                Err(TaskError::fail("3 tests failed"))
            } else {
                Ok(json!({ "passed": 128 }))
            }
        }
    });

    // 3. Register out of order; the scheduler sorts it out
    scheduler.add_task(TaskSpec::new("package", step("package")).depends_on(["test"]))?;
    scheduler.add_task(TaskSpec::new("test", test).depends_on(["build", "lint"]))?;
    scheduler.add_task(TaskSpec::new("lint", step("lint")).depends_on(["fetch"]))?;
    scheduler.add_task(TaskSpec::new("build", step("build")).depends_on(["fetch"]))?;
    scheduler.add_task(TaskSpec::new("fetch", step("fetch")))?;

    println!("[pipeline] order: {:?}", scheduler.resolve_dependencies()?);

    // 4. Happy run
    scheduler.execute(CancellationToken::new()).await?;
    println!("[pipeline] results: {:?}", scheduler.results());

    // 5. Failing run
    break_tests.store(true, Ordering::SeqCst);
    if let Err(e) = scheduler.execute(CancellationToken::new()).await {
        println!("[pipeline] run aborted: {e}");
    }
    for id in ["fetch", "build", "lint", "test", "package"] {
        if let Some(status) = scheduler.status(id) {
            println!("[pipeline] {id:<8} {status}");
        }
    }

    // let the LogWriter drain
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(())
}
