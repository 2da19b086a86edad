//! Synchronized worker state shared by all of a worker's tasks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use strum_macros::Display;
use tokio::time::Instant;

/// Lifecycle state of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum WorkerState {
    /// Created, not started yet
    Idle,
    /// Query loops and the signal processor are running
    Running,
    /// The signal processor is blocked until a resume
    Paused,
    /// Terminal; the signal processor has exited
    Stopped,
}

impl WorkerState {
    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: WorkerState) -> bool {
        use WorkerState::*;
        matches!(
            (self, next),
            (Idle, Running)
                | (Idle, Stopped)
                | (Running, Paused)
                | (Running, Stopped)
                | (Paused, Running)
                | (Paused, Stopped)
        )
    }
}

/// Run state and activity tracking of one worker.
///
/// Each field is synchronized on its own; no cross-field consistency is
/// guaranteed or needed.
#[derive(Debug)]
pub struct WorkerStatus {
    state: Mutex<WorkerState>,
    active: AtomicBool,
    last_active: Mutex<Option<Instant>>,
    activity_window: Duration,
}

impl WorkerStatus {
    /// Idle, inactive status whose activity marks last `activity_window`.
    pub fn new(activity_window: Duration) -> Self {
        WorkerStatus {
            state: Mutex::new(WorkerState::Idle),
            active: AtomicBool::new(false),
            last_active: Mutex::new(None),
            activity_window,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WorkerState {
        *lock(&self.state)
    }

    /// Moves to `next` if the transition is legal. Returns the previous state
    /// on success.
    pub fn transition(&self, next: WorkerState) -> Option<WorkerState> {
        let mut state = lock(&self.state);
        let previous = *state;
        if !previous.can_transition_to(next) {
            return None;
        }
        *state = next;
        Some(previous)
    }

    /// Moves from `from` to `to` only if the current state is `from`.
    pub fn compare_and_transition(&self, from: WorkerState, to: WorkerState) -> bool {
        let mut state = lock(&self.state);
        if *state != from || !from.can_transition_to(to) {
            return false;
        }
        *state = to;
        true
    }

    /// Records that the worker did observable work just now. Idempotent.
    pub fn set_active(&self) {
        *lock(&self.last_active) = Some(Instant::now());
        self.active.store(true, Ordering::Release);
    }

    /// True if `set_active` was called within the activity window.
    pub fn is_active(&self) -> bool {
        if !self.active.load(Ordering::Acquire) {
            return false;
        }
        match *lock(&self.last_active) {
            Some(at) => at.elapsed() <= self.activity_window,
            None => false,
        }
    }

    /// Whether `set_active` has ever been called.
    pub fn was_ever_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Instant of the latest `set_active` call.
    pub fn last_active(&self) -> Option<Instant> {
        *lock(&self.last_active)
    }
}

// A panic while holding one of these locks cannot leave a half-written value
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
