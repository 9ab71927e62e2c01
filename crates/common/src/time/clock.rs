//! Wall-clock abstraction for testability
//!
//! New time-block records are stamped with `created_at`, and recency decides
//! which record wins contested time. Code that stamps records takes a
//! [`Clock`] so tests can control the ordering exactly.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "runtime")]
//! # {
//! use chrono::{Duration, TimeZone, Utc};
//! use tallyline_common::time::{Clock, MockClock};
//!
//! let clock = MockClock::at(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
//! let first = clock.now();
//! clock.advance(Duration::seconds(1));
//! assert!(clock.now() > first);
//! # }
//! ```

use chrono::{DateTime, Utc};

/// Source of the current wall-clock instant
pub trait Clock: Send + Sync {
    /// Current UTC instant
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock. Use this in production code.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests
///
/// Time only moves when [`MockClock::advance`] or [`MockClock::set`] is
/// called. With `auto_advance` set, every read moves the clock forward by
/// the given step first, which yields strictly increasing stamps.
#[cfg(feature = "runtime")]
#[derive(Debug)]
pub struct MockClock {
    current: parking_lot::Mutex<DateTime<Utc>>,
    auto_advance: Option<chrono::Duration>,
}

#[cfg(feature = "runtime")]
impl MockClock {
    /// Clock frozen at `start`
    pub fn at(start: DateTime<Utc>) -> Self {
        Self { current: parking_lot::Mutex::new(start), auto_advance: None }
    }

    /// Clock that ticks forward by `step` before every read
    pub fn ticking(start: DateTime<Utc>, step: chrono::Duration) -> Self {
        Self { current: parking_lot::Mutex::new(start), auto_advance: Some(step) }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut current = self.current.lock();
        *current += by;
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.lock() = instant;
    }
}

#[cfg(feature = "runtime")]
impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = self.current.lock();
        if let Some(step) = self.auto_advance {
            *current += step;
        }
        *current
    }
}
