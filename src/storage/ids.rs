use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::sync::Mutex;

// ============================================================================
// Clock
// ============================================================================

/// Source of "now" for entity timestamps and time-derived ids.
///
/// Stores take an `Arc<dyn Clock>` so tests can pin time and produce posts
/// that share a timestamp tick.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = instant;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ============================================================================
// Id Allocation
// ============================================================================

/// Time-derived, strictly increasing id allocator.
///
/// Ids are the creation instant in epoch milliseconds, bumped past the last
/// issued id when two creations land in the same millisecond (or the clock
/// goes backwards). Uniqueness therefore holds for the allocator's lifetime
/// regardless of clock resolution.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    /// Record an id issued elsewhere (seed data, restored records) so it is
    /// never handed out again.
    pub fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    #[test]
    fn test_ids_follow_clock() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next(instant(1_000)), 1_000);
        assert_eq!(ids.next(instant(2_500)), 2_500);
    }

    #[test]
    fn test_same_tick_ids_are_bumped() {
        let mut ids = IdAllocator::new();
        let a = ids.next(instant(5_000));
        let b = ids.next(instant(5_000));
        let c = ids.next(instant(5_000));
        assert_eq!((a, b, c), (5_000, 5_001, 5_002));
    }

    #[test]
    fn test_clock_going_backwards_stays_monotonic() {
        let mut ids = IdAllocator::new();
        let a = ids.next(instant(9_000));
        let b = ids.next(instant(1_000));
        assert!(b > a);
    }

    #[test]
    fn test_observed_ids_are_skipped() {
        let mut ids = IdAllocator::new();
        ids.observe(10_000);
        assert_eq!(ids.next(instant(3)), 10_001);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(instant(0));
        clock.advance(Duration::milliseconds(250));
        assert_eq!(clock.now(), instant(250));
        clock.set(instant(42));
        assert_eq!(clock.now(), instant(42));
    }
}
