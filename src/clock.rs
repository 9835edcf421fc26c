//! Clock Module
//!
//! Time sources the cache reads "now" from. Every cache holds a shared
//! `Arc<dyn Clock>`; the same clock may back any number of caches.

use std::sync::atomic::{AtomicI64, Ordering};

// == Clock Trait ==
/// Supplies the current time in milliseconds since an arbitrary fixed epoch.
///
/// Readings are expected to be non-decreasing: expiration math assumes `now`
/// never moves backwards between a put and a later lookup.
pub trait Clock: Send + Sync {
    /// Returns the current time in milliseconds.
    fn now_millis(&self) -> i64;
}

// == System Clock ==
/// Wall clock, reporting Unix milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

// == Manual Clock ==
/// A clock that only moves when told to.
///
/// Used to drive expiration deterministically without real-time delays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Creates a clock frozen at `start_millis`.
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    /// Moves the clock to an absolute reading.
    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    /// Moves the clock forward by `millis`.
    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
