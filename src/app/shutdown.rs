//! Graceful shutdown handling.

use log::{debug, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::events::Discoveries;
use crate::worker::Worker;

/// Stops the worker and every background task, then returns what the
/// collector gathered.
///
/// The worker is dropped before the collector is awaited: its sink is the last
/// sender of the event channel, so the collector only finishes once it is gone.
pub async fn shutdown_gracefully(
    worker: Worker,
    collector: JoinHandle<Discoveries>,
    cancel: CancellationToken,
    logging_task: Option<JoinHandle<()>>,
) -> Discoveries {
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        let _ = logging_task.await;
    }

    // The resume releases a pause that would otherwise hold back the stop
    worker.stop();
    worker.resume();
    worker.wait_for_signals().await;
    debug!("{}: shut down in state {}", worker.name(), worker.state());
    drop(worker);

    match collector.await {
        Ok(discoveries) => discoveries,
        Err(e) => {
            warn!("Event collector failed: {}", e);
            Discoveries::default()
        }
    }
}
