use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, ThreadId};
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use uuid::Uuid;

use crate::errors::{CoreError, ErrorKind};
use crate::models::snapshot::{Snapshot, SnapshotStatus};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// One fetch-and-normalize step a [`Poller`] repeats.
///
/// `Params` are whatever the request depends on (coin id, timeframe); the
/// poller hands the current value to every cycle.
#[async_trait]
pub trait SnapshotSource: Send + Sync + 'static {
    type Params: Clone + std::fmt::Debug + Send + Sync + 'static;
    type Output: Send + Sync + 'static;

    /// Short name for logs.
    fn name(&self) -> &str;

    async fn fetch(&self, params: &Self::Params) -> Result<Self::Output, CoreError>;
}

pub type SnapshotCallback<T> = Arc<dyn Fn(&Snapshot<T>) + Send + Sync>;
pub type ErrorCallback = Arc<dyn Fn(ErrorKind, &CoreError) + Send + Sync>;

/// Cadence, request bound and subscriber callbacks of a poller.
pub struct PollerOptions<T> {
    pub interval: Duration,
    pub request_timeout: Duration,
    on_snapshot: Option<SnapshotCallback<T>>,
    on_error: Option<ErrorCallback>,
}

impl<T> Default for PollerOptions<T> {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            on_snapshot: None,
            on_error: None,
        }
    }
}

impl<T> PollerOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Called with every successful snapshot, in fetch order.
    ///
    /// Runs on a runtime worker, and [`Poller::stop`] waits for a callback in
    /// progress to return. Keep it short and never block in it.
    #[must_use]
    pub fn on_snapshot(mut self, f: impl Fn(&Snapshot<T>) + Send + Sync + 'static) -> Self {
        self.on_snapshot = Some(Arc::new(f));
        self
    }

    /// Called for every failed cycle. The previous snapshot stays in place.
    /// Same constraints as [`PollerOptions::on_snapshot`].
    #[must_use]
    pub fn on_error(mut self, f: impl Fn(ErrorKind, &CoreError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// State shared between the handle and the background task.
struct Shared<T> {
    id: Uuid,
    source: String,
    stopped: AtomicBool,
    /// Bumped at the start of every cycle, on every parameter change and on
    /// stop. A result is published only if the generation it was fetched
    /// under is still current.
    generation: AtomicU64,
    /// Held for the whole of a publication so `stop` can wait one out.
    publish_gate: Mutex<()>,
    /// Thread running a callback right now, so `stop` from inside a
    /// callback doesn't wait on itself.
    publisher: Mutex<Option<ThreadId>>,
    snapshot: Mutex<Snapshot<T>>,
    on_snapshot: Option<SnapshotCallback<T>>,
    on_error: Option<ErrorCallback>,
}

impl<T> Shared<T> {
    fn begin_cycle(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Invalidate whatever cycle is in flight. Must happen before the new
    /// parameters become visible to the task.
    fn supersede(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn is_current(&self, generation: u64) -> bool {
        !self.stopped.load(Ordering::SeqCst) && self.generation.load(Ordering::SeqCst) == generation
    }

    fn publish(&self, generation: u64, result: Result<T, CoreError>) {
        let _gate = lock(&self.publish_gate);
        if !self.is_current(generation) {
            tracing::debug!(poller = %self.id, source = %self.source, generation, "Discarding stale result");
            return;
        }

        *lock(&self.publisher) = Some(thread::current().id());
        match result {
            Ok(data) => {
                let snapshot = Snapshot::ready(data, Utc::now());
                *lock(&self.snapshot) = snapshot.clone();
                tracing::debug!(poller = %self.id, source = %self.source, generation, "Published snapshot");
                if let Some(callback) = &self.on_snapshot {
                    callback(&snapshot);
                }
            }
            Err(err) => {
                let kind = err.kind();
                {
                    let mut current = lock(&self.snapshot);
                    *current = current.failed(kind);
                }
                tracing::warn!(poller = %self.id, source = %self.source, %kind, error = %err, "Poll cycle failed");
                if let Some(callback) = &self.on_error {
                    callback(kind, &err);
                }
            }
        }
        *lock(&self.publisher) = None;
    }

    /// Returns `false` if already stopped.
    fn stop(&self) -> bool {
        let was_running = !self.stopped.swap(true, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);

        let inside_callback = *lock(&self.publisher) == Some(thread::current().id());
        if !inside_callback {
            // Wait for a publication that passed its check before `stopped` was set.
            drop(lock(&self.publish_gate));
        }
        was_running
    }
}

/// Periodically fetches a snapshot from a [`SnapshotSource`] and publishes it.
///
/// One cycle runs immediately on start, then one per `interval`. The poller is
/// its own subscription handle: [`Poller::stop`] (or dropping it) ends the
/// subscription, and no callback fires after `stop` returns.
///
/// Overlap policy: a parameter change cancels the in-flight request and starts
/// a fresh cycle with the latest parameters; timer ticks that elapse while a
/// request is in flight are skipped. Two cycles never run at once.
#[must_use = "dropping a Poller stops it"]
pub struct Poller<S: SnapshotSource> {
    shared: Arc<Shared<S::Output>>,
    params_tx: watch::Sender<S::Params>,
    refresh: Arc<Notify>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<S: SnapshotSource> std::fmt::Debug for Poller<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("id", &self.shared.id)
            .field("source", &self.shared.source)
            .field("params", &*self.params_tx.borrow())
            .field("status", &self.status())
            .field("running", &self.is_running())
            .finish()
    }
}

impl<S: SnapshotSource> Poller<S> {
    /// Spawn the polling task on the current tokio runtime.
    pub fn start(
        source: Arc<S>,
        params: S::Params,
        options: PollerOptions<S::Output>,
    ) -> Result<Self, CoreError> {
        if options.interval.is_zero() {
            return Err(CoreError::InvalidConfig("poll interval must be greater than zero".into()));
        }
        if options.request_timeout.is_zero() {
            return Err(CoreError::InvalidConfig("request timeout must be greater than zero".into()));
        }

        let shared = Arc::new(Shared {
            id: Uuid::new_v4(),
            source: source.name().to_string(),
            stopped: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            publish_gate: Mutex::new(()),
            publisher: Mutex::new(None),
            snapshot: Mutex::new(Snapshot::loading()),
            on_snapshot: options.on_snapshot,
            on_error: options.on_error,
        });
        let (params_tx, params_rx) = watch::channel(params);
        let refresh = Arc::new(Notify::new());

        tracing::info!(
            poller = %shared.id,
            source = %shared.source,
            interval = ?options.interval,
            "Starting poller"
        );

        let task = tokio::spawn(run(
            source,
            Arc::clone(&shared),
            params_rx,
            Arc::clone(&refresh),
            options.interval,
            options.request_timeout,
        ));

        Ok(Self {
            shared,
            params_tx,
            refresh,
            task: Mutex::new(Some(task)),
        })
    }

    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    /// Latest snapshot: `Loading` until the first cycle completes.
    pub fn latest(&self) -> Snapshot<S::Output> {
        lock(&self.shared.snapshot).clone()
    }

    pub fn status(&self) -> SnapshotStatus {
        lock(&self.shared.snapshot).status
    }

    pub fn params(&self) -> S::Params {
        self.params_tx.borrow().clone()
    }

    /// Replace the parameters. Runs a cycle right away and restarts the timer.
    pub fn set_params(&self, params: S::Params) {
        self.shared.supersede();
        self.params_tx.send_replace(params);
    }

    /// Edit the parameters in place, with the same effect as [`Poller::set_params`].
    pub fn update_params(&self, f: impl FnOnce(&mut S::Params)) {
        self.shared.supersede();
        self.params_tx.send_modify(f);
    }

    /// Ask for an out-of-band cycle with the current parameters.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    pub fn is_running(&self) -> bool {
        !self.shared.stopped.load(Ordering::SeqCst)
    }

    /// Stop polling. Any request in flight is abandoned and its result dropped.
    /// Idempotent.
    pub fn stop(&self) {
        if self.shared.stop() {
            tracing::info!(poller = %self.shared.id, source = %self.shared.source, "Stopped poller");
        }
        if let Some(task) = lock(&self.task).take() {
            task.abort();
        }
    }
}

impl<S: SnapshotSource> Drop for Poller<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

// ─── Background task ─────────────────────────────────────────────────────────

async fn run<S: SnapshotSource>(
    source: Arc<S>,
    shared: Arc<Shared<S::Output>>,
    mut params_rx: watch::Receiver<S::Params>,
    refresh: Arc<Notify>,
    interval: Duration,
    request_timeout: Duration,
) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        let params = params_rx.borrow_and_update().clone();
        let generation = shared.begin_cycle();
        let started = time::Instant::now();
        tracing::debug!(poller = %shared.id, source = %shared.source, generation, ?params, "Poll cycle");

        // A change that lands together with a finished fetch wins.
        let outcome = tokio::select! {
            biased;
            changed = params_rx.changed() => {
                if changed.is_err() {
                    return;
                }
                None
            }
            result = time::timeout(request_timeout, source.fetch(&params)) => {
                Some(result.unwrap_or_else(|_| Err(CoreError::Timeout(request_timeout))))
            }
        };

        match outcome {
            Some(result) => {
                shared.publish(generation, result);
                // Ticks that came due during a slow request are dropped, not replayed.
                if started.elapsed() >= interval {
                    ticker.reset();
                }
            }
            None => {
                tracing::debug!(poller = %shared.id, source = %shared.source, generation, "Parameters changed mid-cycle, restarting");
                ticker.reset();
                continue;
            }
        }

        tokio::select! {
            _ = ticker.tick() => {}
            _ = refresh.notified() => {
                ticker.reset();
            }
            changed = params_rx.changed() => {
                if changed.is_err() {
                    return;
                }
                ticker.reset();
            }
        }
    }
}
