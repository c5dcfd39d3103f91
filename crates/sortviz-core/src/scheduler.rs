//! Step scheduler: the pause primitive drivers await between beats.
//!
//! A pause suspends only the calling driver. The runtime keeps serving the
//! rest of the program (input, rendering, delay changes) while it waits.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Delay used when no config overrides it.
pub const DEFAULT_DELAY_MS: u64 = 800;

/// Process-wide delay setting, shared between the UI and running drivers.
///
/// Read when a pause is scheduled, so a change only affects later pauses.
#[derive(Debug, Clone)]
pub struct Delay(Arc<AtomicU64>);

impl Delay {
    pub fn new(ms: u64) -> Self {
        Self(Arc::new(AtomicU64::new(ms)))
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, ms: u64) {
        self.0.store(ms, Ordering::Relaxed);
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_MS)
    }
}

/// Length of a pause relative to the configured delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beat {
    /// Half the delay; follows a comparison highlight.
    Compare,
    /// The full delay; precedes or follows a mutation.
    Swap,
}

impl Beat {
    pub fn duration(self, delay_ms: u64) -> Duration {
        match self {
            Beat::Compare => Duration::from_millis(delay_ms / 2),
            Beat::Swap => Duration::from_millis(delay_ms),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    delay: Delay,
}

impl Scheduler {
    pub fn new(delay: Delay) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> &Delay {
        &self.delay
    }

    /// Resumes once, after at least `duration`.
    ///
    /// A zero duration still yields so other tasks get a turn.
    pub async fn pause(&self, duration: Duration) {
        if duration.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(duration).await;
        }
    }

    pub async fn beat(&self, beat: Beat) {
        let duration = beat.duration(self.delay.get());
        self.pause(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[test]
    fn test_beat_durations() {
        assert_eq!(Beat::Compare.duration(800), Duration::from_millis(400));
        assert_eq!(Beat::Swap.duration(800), Duration::from_millis(800));
        assert_eq!(Beat::Compare.duration(1), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_waits_at_least_duration() {
        let scheduler = Scheduler::new(Delay::new(200));
        let start = Instant::now();
        scheduler.beat(Beat::Swap).await;
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_read_when_pause_is_scheduled() {
        let delay = Delay::new(1_000);
        let scheduler = Scheduler::new(delay.clone());

        delay.set(100);
        let start = Instant::now();
        scheduler.beat(Beat::Swap).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_millis(1_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_change_does_not_shorten_pause_in_progress() {
        let delay = Delay::new(1_000);
        let scheduler = Scheduler::new(delay.clone());

        let start = Instant::now();
        let pause = tokio::spawn(async move {
            scheduler.beat(Beat::Swap).await;
            Instant::now()
        });
        tokio::time::sleep(Duration::from_millis(300)).await;
        delay.set(100);

        let resumed = pause.await.unwrap();
        assert!(resumed - start >= Duration::from_millis(1_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_does_not_sleep() {
        let scheduler = Scheduler::new(Delay::new(0));
        let start = Instant::now();
        scheduler.beat(Beat::Compare).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
