use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// Owns the tick timer and its period.
///
/// `Interval::reset_after` only moves the next deadline and keeps the old
/// period, so a period change replaces the interval outright.
pub struct TickScheduler {
    timer: Interval,
    period: Duration,
}

impl TickScheduler {
    /// First tick fires one full period from now
    pub fn new(period: Duration) -> Self {
        Self {
            timer: Self::arm(period),
            period,
        }
    }

    fn arm(period: Duration) -> Interval {
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Re-arm with `period` if it differs from the current one.
    /// Returns whether the timer was replaced.
    pub fn sync(&mut self, period: Duration) -> bool {
        if period == self.period {
            return false;
        }
        self.restart(period);
        true
    }

    /// Cancel the pending tick and schedule a fresh one a full period away
    pub fn restart(&mut self, period: Duration) {
        debug!(
            from_ms = self.period.as_millis() as u64,
            to_ms = period.as_millis() as u64,
            "tick timer re-armed"
        );
        self.period = period;
        self.timer = Self::arm(period);
    }

    /// Wait for the next tick. Cancel-safe, so it can sit in a `select!`.
    pub async fn tick(&mut self) -> Instant {
        self.timer.tick().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_elapsed(start: Instant, expected_ms: u64) {
        let elapsed = start.elapsed();
        let expected = Duration::from_millis(expected_ms);
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(2),
            "expected ~{:?}, got {:?}",
            expected,
            elapsed
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_one_period() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new(Duration::from_millis(150));

        scheduler.tick().await;
        assert_elapsed(start, 150);

        scheduler.tick().await;
        assert_elapsed(start, 300);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_changes_period() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new(Duration::from_millis(150));
        scheduler.tick().await;

        assert!(scheduler.sync(Duration::from_millis(250)));
        assert_eq!(scheduler.period(), Duration::from_millis(250));

        scheduler.tick().await;
        assert_elapsed(start, 400);
        scheduler.tick().await;
        assert_elapsed(start, 650);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_same_period_keeps_timer() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new(Duration::from_millis(150));
        scheduler.tick().await;

        assert!(!scheduler.sync(Duration::from_millis(150)));

        scheduler.tick().await;
        assert_elapsed(start, 300);
    }
}
