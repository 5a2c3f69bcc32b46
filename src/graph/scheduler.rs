//! # Scheduler: dependency-ordered, fail-fast task execution.
//!
//! The [`Scheduler`] owns a set of [`TaskSpec`]s, orders them so that every task
//! follows its dependencies, and runs them one at a time.
//!
//! ## Run lifecycle
//! ```text
//! execute(ctx)
//!   ├─► resolve_dependencies()            ── Err ─► RunAborted, RunError::Resolution
//!   ├─► reset every task to Pending
//!   └─► for id in order:
//!         ├─ ctx cancelled?               ── yes ─► RunCanceled, RunError::Canceled
//!         ├─ status = Running, publish TaskStarting
//!         ├─ task.run(child token)
//!         │     ├─ Ok(value) ─► Completed, result stored, publish TaskCompleted
//!         │     └─ Err(e)    ─► Failed, error stored, failure handler,
//!         │                     publish TaskFailed + RunAborted,
//!         │                     RunError::TaskFailed { id, e }   (remaining tasks stay Pending)
//!   publish RunCompleted
//! ```
//!
//! ## Rules
//! - Task ids are registered at most once.
//! - The graph lock is never held across an `.await`; `add_task` and the accessors
//!   may be called from other threads while a run is in progress.
//! - Only one run per scheduler at a time (`RunError::AlreadyRunning` otherwise).
//! - A panicking task body is reported as `TaskError::Fatal`.
//!
//! ## Example
//! ```rust
//! use serde_json::json;
//! use tokio_util::sync::CancellationToken;
//! use flowvisor::{Scheduler, SchedulerConfig, TaskError, TaskFn, TaskSpec, TaskStatus};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scheduler = Scheduler::new(SchedulerConfig::default());
//!
//!     let fetch = TaskFn::arc("fetch", |_ctx: CancellationToken| async move {
//!         Ok::<_, TaskError>(json!([1, 2, 3]))
//!     });
//!     let sum = TaskFn::arc("sum", |_ctx: CancellationToken| async move {
//!         Ok::<_, TaskError>(json!(6))
//!     });
//!
//!     scheduler.add_task(TaskSpec::new("sum", sum).depends_on(["fetch"]))?;
//!     scheduler.add_task(TaskSpec::new("fetch", fetch))?;
//!
//!     assert_eq!(scheduler.resolve_dependencies()?, vec!["fetch", "sum"]);
//!     scheduler.execute(CancellationToken::new()).await?;
//!     assert_eq!(scheduler.status("sum"), Some(TaskStatus::Completed));
//!     assert_eq!(scheduler.result("sum"), Some(json!(6)));
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::FutureExt;
use parking_lot::RwLock;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::{GraphError, RunError, TaskError};
use crate::events::{Bus, Event, EventKind};
use crate::graph::{
    config::SchedulerConfig,
    resolve::resolve,
    state::{TaskState, TaskStatus},
};
use crate::subscribers::{Subscribe, SubscriberSet, spawn_listener};
use crate::tasks::{TaskRef, TaskSpec};

/// Callback invoked with `(task id, error)` whenever a task fails.
pub type FailureHandler = Arc<dyn Fn(&str, &TaskError) + Send + Sync>;

/// Registered task: the spec plus its runtime state.
struct Entry {
    spec: TaskSpec,
    state: TaskState,
}

/// Everything guarded by the scheduler lock.
#[derive(Default)]
struct Graph {
    /// Registration order (drives deterministic traversal).
    order: Vec<String>,
    tasks: HashMap<String, Entry>,
    /// id → declared dependencies, one entry per registered task.
    deps: HashMap<String, Vec<String>>,
    /// id → value, for tasks completed in the current/last run.
    results: HashMap<String, Value>,
}

/// Dependency-graph task scheduler.
pub struct Scheduler {
    cfg: SchedulerConfig,
    graph: RwLock<Graph>,
    on_failure: Option<FailureHandler>,
    running: AtomicBool,
    bus: Bus,
    /// Stops the subscriber listener when the scheduler is dropped.
    listener: CancellationToken,
}

/// Builder for [`Scheduler`] with optional subscribers and failure handler.
pub struct SchedulerBuilder {
    cfg: SchedulerConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
    on_failure: Option<FailureHandler>,
}

impl SchedulerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: SchedulerConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            on_failure: None,
        }
    }

    /// Sets event subscribers.
    ///
    /// When non-empty, [`build`](Self::build) must run inside a Tokio runtime.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Sets the callback invoked with `(task id, error)` on every task failure.
    pub fn with_failure_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, &TaskError) + Send + Sync + 'static,
    {
        self.on_failure = Some(Arc::new(handler));
        self
    }

    /// Builds the scheduler and starts subscriber workers.
    pub fn build(self) -> Scheduler {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers, bus.clone()));
        let listener = CancellationToken::new();
        spawn_listener(&bus, subs, listener.clone());

        Scheduler {
            cfg: self.cfg,
            graph: RwLock::new(Graph::default()),
            on_failure: self.on_failure,
            running: AtomicBool::new(false),
            bus,
            listener,
        }
    }
}

/// Clears the `running` flag when a run ends, including by panic or drop.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Scheduler {
    /// Creates a scheduler without subscribers or failure handler.
    pub fn new(cfg: SchedulerConfig) -> Self {
        SchedulerBuilder::new(cfg).build()
    }

    /// Returns a builder.
    pub fn builder(cfg: SchedulerConfig) -> SchedulerBuilder {
        SchedulerBuilder::new(cfg)
    }

    /// Returns the event bus (for ad-hoc receivers).
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Registers a task.
    ///
    /// Dependencies are not validated here;
    /// see [`resolve_dependencies`](Self::resolve_dependencies).
    pub fn add_task(&self, spec: TaskSpec) -> Result<(), GraphError> {
        let mut graph = self.graph.write();
        if graph.tasks.contains_key(spec.id()) {
            return Err(GraphError::DuplicateTask {
                id: spec.id().to_string(),
            });
        }

        let id = spec.id().to_string();
        graph.order.push(id.clone());
        graph.deps.insert(id.clone(), spec.dependencies().to_vec());
        graph.tasks.insert(
            id,
            Entry {
                spec,
                state: TaskState::default(),
            },
        );
        Ok(())
    }

    /// Computes an execution order: every registered id once, after its registered dependencies.
    ///
    /// Does not touch task state.
    pub fn resolve_dependencies(&self) -> Result<Vec<String>, GraphError> {
        let graph = self.graph.read();
        resolve(&graph.order, &graph.deps, self.cfg.dependencies)
    }

    /// Runs every task in dependency order, stopping at the first failure.
    pub async fn execute(&self, ctx: CancellationToken) -> Result<(), RunError> {
        if self.running.swap(true, Ordering::AcqRel) {
            return Err(RunError::AlreadyRunning);
        }
        let _guard = RunGuard(&self.running);

        let order = match self.resolve_dependencies() {
            Ok(order) => order,
            Err(e) => {
                self.bus
                    .publish(Event::new(EventKind::RunAborted).with_reason(e.to_string()));
                return Err(e.into());
            }
        };
        self.reset();

        for id in &order {
            if ctx.is_cancelled() {
                self.bus.publish(Event::new(EventKind::RunCanceled));
                return Err(RunError::Canceled);
            }
            let Some(task) = self.begin(id) else {
                continue;
            };
            self.bus
                .publish(Event::new(EventKind::TaskStarting).with_task(id.as_str()));

            match run_task(&task, ctx.child_token()).await {
                Ok(value) => {
                    self.complete(id, value);
                    self.bus
                        .publish(Event::new(EventKind::TaskCompleted).with_task(id.as_str()));
                }
                Err(e) => {
                    self.fail(id, &e);
                    if let Some(handler) = &self.on_failure {
                        handler(id, &e);
                    }
                    self.bus.publish(
                        Event::new(EventKind::TaskFailed)
                            .with_task(id.as_str())
                            .with_reason(e.to_string()),
                    );
                    self.bus.publish(
                        Event::new(EventKind::RunAborted)
                            .with_task(id.as_str())
                            .with_reason(e.to_string()),
                    );
                    return Err(RunError::TaskFailed {
                        id: id.clone(),
                        source: e,
                    });
                }
            }
        }

        self.bus.publish(Event::new(EventKind::RunCompleted));
        Ok(())
    }

    /// Returns the status of a task.
    pub fn status(&self, id: &str) -> Option<TaskStatus> {
        self.graph.read().tasks.get(id).map(|e| e.state.status)
    }

    /// Returns the value produced by a completed task.
    pub fn result(&self, id: &str) -> Option<Value> {
        self.graph.read().results.get(id).cloned()
    }

    /// Returns the error of a failed task.
    pub fn error(&self, id: &str) -> Option<TaskError> {
        self.graph
            .read()
            .tasks
            .get(id)
            .and_then(|e| e.state.error.clone())
    }

    /// Returns a copy of a task's runtime state.
    pub fn state(&self, id: &str) -> Option<TaskState> {
        self.graph.read().tasks.get(id).map(|e| e.state.clone())
    }

    /// Returns a copy of all results of completed tasks.
    pub fn results(&self) -> HashMap<String, Value> {
        self.graph.read().results.clone()
    }

    /// Returns the display name of a task.
    pub fn name(&self, id: &str) -> Option<String> {
        self.graph
            .read()
            .tasks
            .get(id)
            .map(|e| e.spec.name().to_string())
    }

    /// True if a task with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.graph.read().tasks.contains_key(id)
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.graph.read().tasks.len()
    }

    /// True if no task is registered.
    pub fn is_empty(&self) -> bool {
        self.graph.read().tasks.is_empty()
    }

    // ---------------------------
    // State transitions
    // ---------------------------

    /// Puts every task back to `Pending` and forgets previous results.
    fn reset(&self) {
        let mut graph = self.graph.write();
        graph.results.clear();
        for entry in graph.tasks.values_mut() {
            entry.state = TaskState::default();
        }
    }

    /// Marks a task `Running` and hands out its body.
    fn begin(&self, id: &str) -> Option<TaskRef> {
        let mut graph = self.graph.write();
        let entry = graph.tasks.get_mut(id)?;
        entry.state.status = TaskStatus::Running;
        Some(entry.spec.task().clone())
    }

    fn complete(&self, id: &str, value: Value) {
        let mut graph = self.graph.write();
        if let Some(entry) = graph.tasks.get_mut(id) {
            entry.state.status = TaskStatus::Completed;
            entry.state.result = Some(value.clone());
        }
        graph.results.insert(id.to_string(), value);
    }

    fn fail(&self, id: &str, err: &TaskError) {
        let mut graph = self.graph.write();
        if let Some(entry) = graph.tasks.get_mut(id) {
            entry.state.status = TaskStatus::Failed;
            entry.state.error = Some(err.clone());
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.listener.cancel();
    }
}

/// Runs one task body, turning a panic into `TaskError::Fatal`.
async fn run_task(task: &TaskRef, ctx: CancellationToken) -> Result<Value, TaskError> {
    match std::panic::AssertUnwindSafe(task.run(ctx))
        .catch_unwind()
        .await
    {
        Ok(res) => res,
        Err(panic_err) => {
            let reason = if let Some(msg) = panic_err.downcast_ref::<&'static str>() {
                (*msg).to_string()
            } else if let Some(msg) = panic_err.downcast_ref::<String>() {
                msg.clone()
            } else {
                "unknown panic".to_string()
            };
            Err(TaskError::fatal(format!("task panicked: {reason}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskFn;
    use parking_lot::Mutex;
    use serde_json::json;

    type Log = Arc<Mutex<Vec<String>>>;

    fn ok_task(id: &'static str, log: &Log) -> TaskRef {
        let log = log.clone();
        TaskFn::arc(id, move |_ctx: CancellationToken| {
            let log = log.clone();
            async move {
                log.lock().push(id.to_string());
                Ok::<_, TaskError>(json!(id))
            }
        })
    }

    fn failing_task(id: &'static str, log: &Log) -> TaskRef {
        let log = log.clone();
        TaskFn::arc(id, move |_ctx: CancellationToken| {
            let log = log.clone();
            async move {
                log.lock().push(id.to_string());
                Err::<Value, _>(TaskError::fail("boom"))
            }
        })
    }

    fn spec(id: &'static str, task: TaskRef, deps: &[&str]) -> TaskSpec {
        TaskSpec::new(id, task).depends_on(deps.iter().copied())
    }

    #[test]
    fn test_duplicate_task_rejected() {
        let log = Log::default();
        let s = Scheduler::new(SchedulerConfig::default());
        s.add_task(spec("a", ok_task("first", &log), &[])).unwrap();

        let err = s
            .add_task(spec("a", ok_task("second", &log), &["x"]))
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateTask { id: "a".into() });
        assert_eq!(s.len(), 1);
        assert_eq!(s.name("a").as_deref(), Some("first"));
        assert_eq!(s.resolve_dependencies().unwrap(), vec!["a"]);
    }

    #[test]
    fn test_resolve_abc() {
        let log = Log::default();
        let s = Scheduler::new(SchedulerConfig::default());
        s.add_task(spec("C", ok_task("C", &log), &["A", "B"])).unwrap();
        s.add_task(spec("A", ok_task("A", &log), &[])).unwrap();
        s.add_task(spec("B", ok_task("B", &log), &["A"])).unwrap();

        assert_eq!(s.resolve_dependencies().unwrap(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_cycle_leaves_state_untouched() {
        let log = Log::default();
        let s = Scheduler::new(SchedulerConfig::default());
        s.add_task(spec("A", ok_task("A", &log), &["B"])).unwrap();
        s.add_task(spec("B", ok_task("B", &log), &["A"])).unwrap();

        let err = s.resolve_dependencies().unwrap_err();
        assert!(matches!(err, GraphError::CircularDependency { .. }));
        assert_eq!(s.status("A"), Some(TaskStatus::Pending));
        assert_eq!(s.status("B"), Some(TaskStatus::Pending));
    }

    #[tokio::test]
    async fn test_execute_runs_in_dependency_order() {
        let log = Log::default();
        let s = Scheduler::new(SchedulerConfig::default());
        s.add_task(spec("C", ok_task("C", &log), &["A", "B"])).unwrap();
        s.add_task(spec("B", ok_task("B", &log), &["A"])).unwrap();
        s.add_task(spec("A", ok_task("A", &log), &[])).unwrap();

        s.execute(CancellationToken::new()).await.unwrap();

        assert_eq!(*log.lock(), vec!["A", "B", "C"]);
        for id in ["A", "B", "C"] {
            assert_eq!(s.status(id), Some(TaskStatus::Completed));
            assert_eq!(s.result(id), Some(json!(id)));
        }
        assert_eq!(s.results().len(), 3);
    }

    #[tokio::test]
    async fn test_execute_fail_fast() {
        let log = Log::default();
        let failures: Arc<Mutex<Vec<(String, TaskError)>>> = Arc::default();
        let seen = failures.clone();

        let s = Scheduler::builder(SchedulerConfig::default())
            .with_failure_handler(move |id, err| seen.lock().push((id.to_string(), err.clone())))
            .build();
        s.add_task(spec("A", ok_task("A", &log), &[])).unwrap();
        s.add_task(spec("B", failing_task("B", &log), &["A"])).unwrap();
        s.add_task(spec("C", ok_task("C", &log), &["B"])).unwrap();

        let err = s.execute(CancellationToken::new()).await.unwrap_err();

        assert_eq!(err.task_id(), Some("B"));
        assert!(err.to_string().contains("task B failed"));
        assert_eq!(s.status("A"), Some(TaskStatus::Completed));
        assert_eq!(s.status("B"), Some(TaskStatus::Failed));
        assert_eq!(s.status("C"), Some(TaskStatus::Pending));
        assert_eq!(s.error("B"), Some(TaskError::fail("boom")));
        assert!(s.result("B").is_none());
        assert_eq!(*log.lock(), vec!["A", "B"]);
        assert_eq!(*failures.lock(), vec![("B".to_string(), TaskError::fail("boom"))]);
    }

    #[tokio::test]
    async fn test_execute_cycle_is_resolution_error() {
        let log = Log::default();
        let s = Scheduler::new(SchedulerConfig::default());
        s.add_task(spec("A", ok_task("A", &log), &["B"])).unwrap();
        s.add_task(spec("B", ok_task("B", &log), &["A"])).unwrap();

        let err = s.execute(CancellationToken::new()).await.unwrap_err();
        assert!(matches!(
            err,
            RunError::Resolution(GraphError::CircularDependency { .. })
        ));
        assert!(log.lock().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let log = Log::default();
        let s = Scheduler::new(SchedulerConfig::default());
        s.add_task(spec("A", ok_task("A", &log), &[])).unwrap();

        let ctx = CancellationToken::new();
        ctx.cancel();
        let err = s.execute(ctx).await.unwrap_err();

        assert!(matches!(err, RunError::Canceled));
        assert_eq!(s.status("A"), Some(TaskStatus::Pending));
        assert!(log.lock().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_between_tasks() {
        let ctx = CancellationToken::new();
        let s = Scheduler::new(SchedulerConfig::default());

        let trigger = ctx.clone();
        let first = TaskFn::arc("first", move |_ctx: CancellationToken| {
            let trigger = trigger.clone();
            async move {
                trigger.cancel();
                Ok::<_, TaskError>(Value::Null)
            }
        });
        let log = Log::default();
        s.add_task(spec("first", first, &[])).unwrap();
        s.add_task(spec("second", ok_task("second", &log), &["first"]))
            .unwrap();

        let err = s.execute(ctx).await.unwrap_err();
        assert!(matches!(err, RunError::Canceled));
        assert_eq!(s.status("first"), Some(TaskStatus::Completed));
        assert_eq!(s.status("second"), Some(TaskStatus::Pending));
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_dangling_dependency() {
        let log = Log::default();
        let s = Scheduler::new(SchedulerConfig {
            dependencies: crate::graph::DependencyMode::Strict,
            ..SchedulerConfig::default()
        });
        s.add_task(spec("a", ok_task("a", &log), &["ghost"])).unwrap();

        let err = s.execute(CancellationToken::new()).await.unwrap_err();
        assert!(matches!(
            err,
            RunError::Resolution(GraphError::MissingDependency { .. })
        ));
    }

    #[tokio::test]
    async fn test_panicking_task_is_fatal() {
        let s = Scheduler::new(SchedulerConfig::default());
        let bad = TaskFn::arc("bad", |_ctx: CancellationToken| async move {
            if true {
                panic!("kaboom");
            }
            Ok::<_, TaskError>(Value::Null)
        });
        s.add_task(spec("bad", bad, &[])).unwrap();

        let err = s.execute(CancellationToken::new()).await.unwrap_err();
        assert_eq!(err.task_id(), Some("bad"));
        assert_eq!(s.status("bad"), Some(TaskStatus::Failed));
        assert!(matches!(s.error("bad"), Some(TaskError::Fatal { .. })));
    }

    #[tokio::test]
    async fn test_rerun_resets_state() {
        let log = Log::default();
        let s = Scheduler::new(SchedulerConfig::default());
        s.add_task(spec("A", ok_task("A", &log), &[])).unwrap();

        s.execute(CancellationToken::new()).await.unwrap();
        s.add_task(spec("B", failing_task("B", &log), &["A"])).unwrap();
        s.execute(CancellationToken::new()).await.unwrap_err();

        assert_eq!(*log.lock(), vec!["A", "A", "B"]);
        assert_eq!(s.status("A"), Some(TaskStatus::Completed));
        assert_eq!(s.status("B"), Some(TaskStatus::Failed));
    }

    #[tokio::test]
    async fn test_events_published_for_run() {
        let log = Log::default();
        let s = Scheduler::new(SchedulerConfig::default());
        let mut rx = s.bus().subscribe();
        s.add_task(spec("A", ok_task("A", &log), &[])).unwrap();

        s.execute(CancellationToken::new()).await.unwrap();

        let kinds: Vec<EventKind> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|ev| ev.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::TaskStarting,
                EventKind::TaskCompleted,
                EventKind::RunCompleted
            ]
        );
    }

    struct Counter {
        seen: Mutex<Vec<EventKind>>,
    }

    #[async_trait::async_trait]
    impl Subscribe for Counter {
        async fn on_event(&self, event: &Event) {
            self.seen.lock().push(event.kind);
        }

        fn name(&self) -> &'static str {
            "counter"
        }
    }

    #[tokio::test]
    async fn test_dropping_scheduler_releases_subscribers() {
        let counter = Arc::new(Counter {
            seen: Mutex::new(Vec::new()),
        });
        {
            let s = Scheduler::builder(SchedulerConfig::default())
                .with_subscribers(vec![counter.clone()])
                .build();
            let log = Log::default();
            s.add_task(spec("A", ok_task("A", &log), &[])).unwrap();
            s.execute(CancellationToken::new()).await.unwrap();
        }

        for _ in 0..100 {
            if Arc::strong_count(&counter) == 1 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert_eq!(Arc::strong_count(&counter), 1);
        assert!(counter.seen.lock().contains(&EventKind::RunCompleted));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_registration_while_running() {
        use std::time::Duration;
        use tokio::sync::Notify;

        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let (e, r) = (entered.clone(), release.clone());
        let blocking = TaskFn::arc("blocking", move |_ctx: CancellationToken| {
            let (e, r) = (e.clone(), r.clone());
            async move {
                e.notify_one();
                r.notified().await;
                Ok::<_, TaskError>(json!("done"))
            }
        });

        let s = Arc::new(Scheduler::new(SchedulerConfig::default()));
        s.add_task(spec("blocking", blocking, &[])).unwrap();

        let runner = Arc::clone(&s);
        let run = tokio::spawn(async move { runner.execute(CancellationToken::new()).await });

        tokio::time::timeout(Duration::from_secs(5), entered.notified())
            .await
            .unwrap();
        assert_eq!(s.status("blocking"), Some(TaskStatus::Running));

        let other = Arc::clone(&s);
        let order = tokio::time::timeout(
            Duration::from_secs(5),
            tokio::task::spawn_blocking(move || {
                let log = Log::default();
                other.add_task(spec("late", ok_task("late", &log), &["blocking"]))?;
                other.resolve_dependencies()
            }),
        )
        .await
        .unwrap()
        .unwrap()
        .unwrap();
        assert_eq!(order, vec!["blocking", "late"]);

        release.notify_one();
        tokio::time::timeout(Duration::from_secs(5), run)
            .await
            .unwrap()
            .unwrap()
            .unwrap();

        assert_eq!(s.status("blocking"), Some(TaskStatus::Completed));
        // registered after the order was computed: not part of this run
        assert_eq!(s.status("late"), Some(TaskStatus::Pending));
        assert_eq!(s.len(), 2);
    }
}
