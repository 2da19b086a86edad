//! Control signals and the signal-processing task.

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::mpsc;

use super::status::{WorkerState, WorkerStatus};
use crate::config::PausePolicy;
use crate::error_handling::{InfoType, ProcessingStats};

/// Lifecycle commands, processed strictly in the order they were sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// Suspend until a resume (or, depending on policy, a stop)
    Pause,
    /// Leave the paused state
    Resume,
    /// Exit the signal processor
    Stop,
}

/// Upstream notification about a name another part of the pipeline checked.
///
/// This worker only acknowledges them as liveness pings; the payload is not
/// inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkRequest {
    /// Name that was checked
    pub name: String,
    /// Root domain it belongs to
    pub domain: String,
}

enum PauseOutcome {
    Resumed,
    Stopped,
}

/// Runs until a stop is processed (or every control sender is dropped).
///
/// While running, waits on control signals and work notifications; the latter
/// only mark the worker active. A pause blocks everything except the control
/// queue until a resume arrives.
pub(crate) async fn process_signals(
    name: Arc<str>,
    status: Arc<WorkerStatus>,
    stats: Arc<ProcessingStats>,
    mut control: mpsc::UnboundedReceiver<ControlSignal>,
    mut requests: mpsc::Receiver<WorkRequest>,
    policy: PausePolicy,
) {
    let mut requests_open = true;

    loop {
        tokio::select! {
            biased;
            signal = control.recv() => match signal {
                Some(ControlSignal::Pause) => {
                    status.transition(WorkerState::Paused);
                    info!("{}: paused", name);
                    match await_resume(&name, &status, &mut control, policy).await {
                        PauseOutcome::Resumed => info!("{}: resumed", name),
                        PauseOutcome::Stopped => break,
                    }
                }
                Some(ControlSignal::Resume) => debug!("{}: resume ignored, not paused", name),
                Some(ControlSignal::Stop) | None => break,
            },
            request = requests.recv(), if requests_open => match request {
                Some(_) => {
                    status.set_active();
                    stats.increment_info(InfoType::WorkNotification);
                }
                None => requests_open = false,
            },
        }
    }

    status.transition(WorkerState::Stopped);
    info!("{}: stopped", name);
}

/// Blocks on the control queue until the pause ends.
async fn await_resume(
    name: &str,
    status: &WorkerStatus,
    control: &mut mpsc::UnboundedReceiver<ControlSignal>,
    policy: PausePolicy,
) -> PauseOutcome {
    let mut stop_pending = false;

    loop {
        match control.recv().await {
            Some(ControlSignal::Resume) => {
                status.transition(WorkerState::Running);
                if stop_pending {
                    debug!("{}: applying stop received while paused", name);
                    return PauseOutcome::Stopped;
                }
                return PauseOutcome::Resumed;
            }
            Some(ControlSignal::Pause) => {}
            Some(ControlSignal::Stop) => match policy {
                PausePolicy::StopPreempts => return PauseOutcome::Stopped,
                PausePolicy::AwaitResume => {
                    debug!("{}: stop deferred until resume", name);
                    stop_pending = true;
                }
            },
            None => return PauseOutcome::Stopped,
        }
    }
}
