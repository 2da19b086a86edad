//! Worker lifecycle: start, pause, resume and stop.
//!
//! `Worker::start` spawns two independent tasks and returns immediately:
//! - the query task, which runs one query loop per root domain
//!   (`domain_concurrency` at a time);
//! - the signal processor, which handles control signals in FIFO order and
//!   acknowledges inbound work notifications.
//!
//! `Worker::stop` cancels the worker's token, which aborts any pacing wait in
//! progress, and queues a stop for the signal processor.

mod signals;
mod status;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, PausePolicy, Scope};
use crate::error_handling::ProcessingStats;
use crate::events::EventSink;
use crate::fetch::{Endpoints, Fetcher};
use crate::query::{QueryLoop, QueryReport, SourceIdentity};

pub use signals::{ControlSignal, WorkRequest};
pub use status::{WorkerState, WorkerStatus};

/// Tunables of one worker.
#[derive(Debug, Clone)]
pub struct WorkerSettings {
    /// Name reported as the source of every discovery
    pub name: String,
    /// Data source tag
    pub tag: String,
    /// Pause between two reverse lookups of the same domain
    pub reverse_interval: Duration,
    /// Root domains queried at the same time
    pub domain_concurrency: usize,
    /// Capacity of the work-notification channel
    pub request_buffer: usize,
    /// How long one activity mark counts
    pub activity_window: Duration,
    /// Stop handling while paused
    pub pause_policy: PausePolicy,
}

impl From<&Config> for WorkerSettings {
    fn from(config: &Config) -> Self {
        WorkerSettings {
            name: config.worker_name.clone(),
            tag: config.source_tag.clone(),
            reverse_interval: config.reverse_interval,
            domain_concurrency: config.domain_concurrency,
            request_buffer: config.request_buffer,
            activity_window: config.activity_window,
            pause_policy: config.pause_policy,
        }
    }
}

impl Default for WorkerSettings {
    fn default() -> Self {
        WorkerSettings::from(&Config::default())
    }
}

/// Collaborators a worker talks to.
pub struct WorkerResources {
    /// Root domains and their naming patterns
    pub scope: Arc<Scope>,
    /// Forward and reverse lookup URLs
    pub endpoints: Endpoints,
    /// Page retrieval
    pub fetcher: Arc<dyn Fetcher>,
    /// Receives every discovery
    pub sink: Arc<dyn EventSink>,
    /// Error and info counters
    pub stats: Arc<ProcessingStats>,
}

struct SignalChannels {
    control: mpsc::UnboundedReceiver<ControlSignal>,
    requests: mpsc::Receiver<WorkRequest>,
}

#[derive(Default)]
struct WorkerTasks {
    queries: Option<JoinHandle<Vec<QueryReport>>>,
    signals: Option<JoinHandle<()>>,
}

/// A pausable, resumable, cancellable passive-DNS data source.
pub struct Worker {
    settings: WorkerSettings,
    resources: WorkerResources,
    status: Arc<WorkerStatus>,
    cancel: CancellationToken,
    control_tx: mpsc::UnboundedSender<ControlSignal>,
    requests_tx: mpsc::Sender<WorkRequest>,
    channels: Mutex<Option<SignalChannels>>,
    tasks: Mutex<WorkerTasks>,
}

impl Worker {
    /// Creates an idle worker. Nothing runs until `start`.
    pub fn new(settings: WorkerSettings, resources: WorkerResources) -> Self {
        let (control_tx, control) = mpsc::unbounded_channel();
        let (requests_tx, requests) = mpsc::channel(settings.request_buffer.max(1));
        let status = Arc::new(WorkerStatus::new(settings.activity_window));

        Worker {
            settings,
            resources,
            status,
            cancel: CancellationToken::new(),
            control_tx,
            requests_tx,
            channels: Mutex::new(Some(SignalChannels { control, requests })),
            tasks: Mutex::new(WorkerTasks::default()),
        }
    }

    /// Name reported as the source of every discovery.
    pub fn name(&self) -> &str {
        &self.settings.name
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WorkerState {
        self.status.state()
    }

    /// Shared status, for external liveness monitoring.
    pub fn status(&self) -> Arc<WorkerStatus> {
        Arc::clone(&self.status)
    }

    /// Marks the worker as active for one activity window.
    pub fn set_active(&self) {
        self.status.set_active();
    }

    /// True if the last activity mark is within the activity window.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Sender for upstream work notifications.
    pub fn requests(&self) -> mpsc::Sender<WorkRequest> {
        self.requests_tx.clone()
    }

    /// Token cancelled by `stop`.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Starts the query and signal-processing tasks. Never blocks.
    ///
    /// Only the first call on an idle worker has an effect. Must be called
    /// from within a Tokio runtime.
    pub fn start(&self) {
        if !self
            .status
            .compare_and_transition(WorkerState::Idle, WorkerState::Running)
        {
            warn!("{}: start ignored in state {}", self.name(), self.state());
            return;
        }
        let Some(channels) = lock(&self.channels).take() else {
            return;
        };

        let query_loop = Arc::new(QueryLoop::new(
            SourceIdentity {
                name: self.settings.name.clone(),
                tag: self.settings.tag.clone(),
            },
            Arc::clone(&self.resources.fetcher),
            Arc::clone(&self.resources.sink),
            self.resources.endpoints.clone(),
            Arc::clone(&self.status),
            Arc::clone(&self.resources.stats),
            self.cancel.clone(),
            self.settings.reverse_interval,
        ));
        let scope = Arc::clone(&self.resources.scope);
        let concurrency = self.settings.domain_concurrency.max(1);

        let queries = tokio::spawn(async move {
            let domains = scope.domains().to_vec();
            stream::iter(domains)
                .map(|domain| {
                    let query_loop = Arc::clone(&query_loop);
                    let scope = Arc::clone(&scope);
                    async move { query_loop.run_in_scope(&scope, &domain).await }
                })
                .buffer_unordered(concurrency)
                .collect::<Vec<_>>()
                .await
        });

        let signals = tokio::spawn(signals::process_signals(
            Arc::from(self.settings.name.as_str()),
            Arc::clone(&self.status),
            Arc::clone(&self.resources.stats),
            channels.control,
            channels.requests,
            self.settings.pause_policy,
        ));

        let mut tasks = lock(&self.tasks);
        tasks.queries = Some(queries);
        tasks.signals = Some(signals);
        info!(
            "{}: started for {} root domain(s)",
            self.name(),
            self.resources.scope.domains().len()
        );
    }

    /// Queues a pause for the signal processor.
    pub fn pause(&self) {
        self.send(ControlSignal::Pause);
    }

    /// Queues a resume for the signal processor.
    pub fn resume(&self) {
        self.send(ControlSignal::Resume);
    }

    /// Cancels in-progress pacing waits and queues a stop.
    ///
    /// A worker that was never started moves straight to `Stopped`.
    pub fn stop(&self) {
        self.cancel.cancel();
        if self
            .status
            .compare_and_transition(WorkerState::Idle, WorkerState::Stopped)
        {
            lock(&self.channels).take();
            info!("{}: stopped before start", self.name());
            return;
        }
        self.send(ControlSignal::Stop);
    }

    fn send(&self, signal: ControlSignal) {
        if self.control_tx.send(signal).is_err() {
            debug!("{}: signal processor gone, {:?} dropped", self.name(), signal);
        }
    }

    /// Waits for every root domain's query loop to finish.
    ///
    /// Returns the reports of all domains the first time it completes; later
    /// calls return an empty list.
    pub async fn wait_for_queries(&self) -> Vec<QueryReport> {
        let handle = lock(&self.tasks).queries.take();
        match handle {
            Some(handle) => match handle.await {
                Ok(reports) => reports,
                Err(e) => {
                    warn!("{}: query task failed: {}", self.name(), e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        }
    }

    /// Waits for the signal processor to exit. Returns at once if it never ran.
    pub async fn wait_for_signals(&self) {
        let handle = lock(&self.tasks).signals.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("{}: signal task failed: {}", self.name(), e);
            }
        }
    }

    /// True once the signal processor has exited.
    pub fn signals_finished(&self) -> bool {
        lock(&self.tasks)
            .signals
            .as_ref()
            .map(|handle| handle.is_finished())
            .unwrap_or(true)
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Tasks still running observe the token and finish on their own
        self.cancel.cancel();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
