//! Recurring Timers
//!
//! Interval tasks that post an event to the presenter's channel. A timer is
//! owned by whoever started it; dropping or canceling the handle aborts the
//! task, so re-initializing a view never leaks a ticking timer.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to a spawned interval task
#[derive(Debug)]
pub struct RecurringTimer {
    name: &'static str,
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl RecurringTimer {
    /// Spawn a task that sends `event` every `period`
    ///
    /// The first tick fires one full period after start. The task ends on
    /// its own once the receiving side of `tx` is dropped.
    pub fn start<E>(name: &'static str, period: Duration, tx: UnboundedSender<E>, event: E) -> Self
    where
        E: Clone + Send + 'static,
    {
        tracing::debug!(timer = name, period_secs = period.as_secs(), "Starting timer");

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // Skip the first immediate tick
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if tx.send(event.clone()).is_err() {
                    tracing::debug!(timer = name, "Receiver gone, stopping timer");
                    break;
                }
            }
        });

        Self {
            name,
            period,
            handle: Some(handle),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the task is still scheduled
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Abort the task; canceling twice is a no-op
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(timer = self.name, "Timer canceled");
        }
    }
}

impl Drop for RecurringTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    #[derive(Debug, Clone, PartialEq)]
    enum Tick {
        Refresh,
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_full_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();
        let _timer = RecurringTimer::start("refresh", Duration::from_secs(900), tx, Tick::Refresh);

        assert_eq!(rx.recv().await, Some(Tick::Refresh));
        assert!(start.elapsed() >= Duration::from_secs(900));

        assert_eq!(rx.recv().await, Some(Tick::Refresh));
        assert!(start.elapsed() >= Duration::from_secs(1800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = RecurringTimer::start("status", Duration::from_secs(300), tx, Tick::Refresh);
        assert!(timer.is_active());

        assert_eq!(rx.recv().await, Some(Tick::Refresh));
        drop(timer);

        // The aborted task drops its sender, closing the channel
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut timer = RecurringTimer::start("status", Duration::from_secs(300), tx, Tick::Refresh);

        timer.cancel();
        timer.cancel();
        assert!(!timer.is_active());
        assert_eq!(timer.name(), "status");
        assert_eq!(timer.period(), Duration::from_secs(300));
    }
}
