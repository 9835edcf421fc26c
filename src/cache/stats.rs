//! Cache Statistics Module
//!
//! Counters a cache keeps about lookups and sweeps, plus the snapshot type
//! handed out to callers.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of a cache's counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that returned a live value
    pub hits: u64,
    /// Lookups that found nothing live, whether the key was missing or expired
    pub misses: u64,
    /// Entries removed by expiration sweeps since the cache was created
    pub expirations: u64,
    /// Chain length when the snapshot was taken, expired entries included
    pub total_entries: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Fraction of lookups that were hits, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    // == Lookups ==
    /// Total lookups seen, hits and misses together.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    // == Record Lookup ==
    pub(crate) fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    // == Record Sweep ==
    /// Adds the entries one sweep unlinked.
    pub(crate) fn record_sweep(&mut self, removed: usize) {
        self.expirations += removed as u64;
    }

    // == Snapshot ==
    /// Copies the counters, stamping the current chain length.
    pub(crate) fn snapshot(&self, total_entries: usize) -> Self {
        Self {
            total_entries,
            ..self.clone()
        }
    }
}
