//! Fixed-interval pacing that can be aborted between ticks.
//!
//! Ticks are scheduled on a steady clock (`tokio::time::Interval`), so a slow
//! consumer does not push later ticks back; missed ticks are skipped rather
//! than bursted. The underlying timer is released when the limiter is dropped.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::MIN_PACING_INTERVAL;

/// Outcome of one `RateLimiter::wait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The interval elapsed; the next operation may run.
    Elapsed,
    /// Cancellation was signalled before the tick.
    Aborted,
}

/// Paces a sequence of operations at a fixed interval.
pub struct RateLimiter {
    ticker: Interval,
    period: Duration,
}

impl RateLimiter {
    /// Creates a limiter whose first tick fires one `period` from now.
    pub fn new(period: Duration) -> Self {
        let period = period.max(MIN_PACING_INTERVAL);
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        RateLimiter { ticker, period }
    }

    /// Effective interval between ticks.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Waits for the next tick, or returns `Tick::Aborted` as soon as `cancel`
    /// fires. An already-cancelled token wins over a pending tick.
    pub async fn wait(&mut self, cancel: &CancellationToken) -> Tick {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Tick::Aborted,
            _ = self.ticker.tick() => Tick::Elapsed,
        }
    }
}
