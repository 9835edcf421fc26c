//! Cache Entry Module
//!
//! Defines the link node of the cache chain: a value with its retention window.

// == Expirable Entry ==
/// A single node in the cache chain.
///
/// Each entry owns its successor, so the chain has exactly one owner per node.
#[derive(Debug)]
pub(crate) struct ExpirableEntry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// How long the entry stays live after `created_at`, in milliseconds
    pub(crate) retention_ms: i64,
    /// Clock reading at the last insert or overwrite
    pub(crate) created_at: i64,
    pub(crate) next: Option<Box<ExpirableEntry<K, V>>>,
}

impl<K, V> ExpirableEntry<K, V> {
    // == Constructor ==
    /// Creates an unlinked entry stamped at `now`.
    pub(crate) fn new(key: K, value: V, retention_ms: i64, now: i64) -> Self {
        Self {
            key,
            value,
            retention_ms,
            created_at: now,
            next: None,
        }
    }

    // == Refresh ==
    /// Overwrites value and retention, restarting the window at `now`.
    pub(crate) fn refresh(&mut self, value: V, retention_ms: i64, now: i64) {
        self.value = value;
        self.retention_ms = retention_ms;
        self.created_at = now;
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now`.
    ///
    /// Boundary condition: an age equal to the retention counts as expired, so
    /// a zero or negative retention is expired from the moment it is stored.
    pub(crate) fn is_expired(&self, now: i64) -> bool {
        now.saturating_sub(self.created_at) >= self.retention_ms
    }

    // == Remaining Retention ==
    /// Returns milliseconds left before expiry at `now`, floored at zero.
    pub(crate) fn remaining_ms(&self, now: i64) -> i64 {
        let age = now.saturating_sub(self.created_at);
        self.retention_ms.saturating_sub(age).max(0)
    }
}
