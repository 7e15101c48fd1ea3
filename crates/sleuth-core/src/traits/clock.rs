//! Clock capability for arrival timestamps.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;

/// Source of whole-second timestamps.
///
/// Only differences between readings matter: the engine reads the clock
/// once at construction and stores each arrival relative to that origin.
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> i64;
}

/// Monotonic clock backed by `Instant`.
#[derive(Debug, Clone)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        i64::try_from(self.started.elapsed().as_secs()).unwrap_or(i64::MAX)
    }
}

/// Clock advanced by hand. Used to pin arrival times in tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    secs: AtomicI64,
}

impl ManualClock {
    pub fn new(start_secs: i64) -> Self {
        Self {
            secs: AtomicI64::new(start_secs),
        }
    }

    pub fn set(&self, secs: i64) {
        self.secs.store(secs, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> i64 {
        self.secs.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(10);
        assert_eq!(clock.now_secs(), 10);
        clock.advance(5);
        assert_eq!(clock.now_secs(), 15);
        clock.set(2);
        assert_eq!(clock.now_secs(), 2);
    }

    #[test]
    fn system_clock_starts_near_zero() {
        let clock = SystemClock::new();
        assert!(clock.now_secs() <= 1);
    }
}
