//! Cache Store Module
//!
//! The aged cache: a singly linked chain of entries, newest key first, swept
//! for expired entries at the start of every operation.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::cache::entry::ExpirableEntry;
use crate::cache::CacheStats;
use crate::clock::{Clock, SystemClock};

type Link<K, V> = Option<Box<ExpirableEntry<K, V>>>;

// == Aged Cache ==
/// Key-value cache where every entry carries its own retention window.
///
/// There is no background thread: each public operation first sweeps out
/// every entry whose age has reached its retention, judged against the
/// injected [`Clock`]. Mutating operations take `&mut self`; share a cache
/// across tasks by wrapping it in a mutex.
pub struct AgedCache<K, V> {
    /// Most recently inserted key first
    head: Link<K, V>,
    clock: Arc<dyn Clock>,
    stats: CacheStats,
}

impl<K, V> AgedCache<K, V> {
    // == Constructors ==
    /// Creates an empty cache reading the system wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty cache reading the given clock.
    ///
    /// The clock is shared, not owned; one clock may drive many caches.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            head: None,
            clock,
            stats: CacheStats::default(),
        }
    }

    // == Is Empty ==
    /// Sweeps, then reports whether no live entries remain.
    pub fn is_empty(&mut self) -> bool {
        self.remove_expired();
        self.head.is_none()
    }

    // == Size ==
    /// Sweeps, then counts the live entries.
    pub fn size(&mut self) -> usize {
        self.remove_expired();
        self.iter().count()
    }

    // == Purge Expired ==
    /// Runs an expiration sweep on demand.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        self.remove_expired()
    }

    // == Stats ==
    /// Returns a snapshot of the statistics without sweeping.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.iter().count())
    }

    // == Iter ==
    /// Iterates over the chain as stored, newest key first.
    ///
    /// Does not sweep, so entries that have expired since the last operation
    /// may still appear.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    // == Remove Expired ==
    /// Single pass over the chain, unlinking every expired entry.
    ///
    /// "Now" is read once, so every entry in the pass is judged against the
    /// same instant.
    fn remove_expired(&mut self) -> usize {
        let now = self.clock.now_millis();
        let mut removed = 0;
        let mut cursor = &mut self.head;

        while let Some(mut entry) = cursor.take() {
            if entry.is_expired(now) {
                *cursor = entry.next.take();
                removed += 1;
            } else {
                cursor = &mut cursor.insert(entry).next;
            }
        }

        if removed > 0 {
            self.stats.record_sweep(removed);
            debug!(removed, now, "Swept expired cache entries");
        }
        removed
    }
}

impl<K: Eq, V> AgedCache<K, V> {
    // == Put ==
    /// Stores `value` under `key` for `retention_ms` milliseconds.
    ///
    /// An existing entry for the key is refreshed in place: value, retention
    /// and creation time are all replaced, and its position is kept. A new key
    /// is linked at the head. Zero or negative retention is accepted and is
    /// already expired at the next check.
    pub fn put(&mut self, key: K, value: V, retention_ms: i64) {
        self.remove_expired();
        let now = self.clock.now_millis();

        if let Some(entry) = self.find_mut(&key) {
            entry.refresh(value, retention_ms, now);
            trace!(retention_ms, now, "Refreshed cache entry");
            return;
        }

        let mut entry = Box::new(ExpirableEntry::new(key, value, retention_ms, now));
        entry.next = self.head.take();
        self.head = Some(entry);
        trace!(retention_ms, now, "Inserted cache entry");
    }

    // == Get ==
    /// Returns the value for `key` if a live entry holds it.
    ///
    /// The match is re-checked against a fresh clock reading taken after the
    /// sweep, so an expired entry is never returned.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.remove_expired();
        let now = self.clock.now_millis();

        let live = find(self.head.as_deref(), key).filter(|entry| !entry.is_expired(now));
        self.stats.record_lookup(live.is_some());
        live.map(|entry| &entry.value)
    }

    // == Remaining Retention ==
    /// Returns how many milliseconds the live entry for `key` has left.
    pub fn remaining_retention<Q>(&mut self, key: &Q) -> Option<i64>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.remove_expired();
        let now = self.clock.now_millis();

        find(self.head.as_deref(), key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.remaining_ms(now))
    }

    fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut ExpirableEntry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut cursor = self.head.as_deref_mut();
        while let Some(entry) = cursor {
            if Borrow::<Q>::borrow(&entry.key) == key {
                return Some(entry);
            }
            cursor = entry.next.as_deref_mut();
        }
        None
    }
}

fn find<'a, K, V, Q>(
    mut cursor: Option<&'a ExpirableEntry<K, V>>,
    key: &Q,
) -> Option<&'a ExpirableEntry<K, V>>
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    while let Some(entry) = cursor {
        if Borrow::<Q>::borrow(&entry.key) == key {
            return Some(entry);
        }
        cursor = entry.next.as_deref();
    }
    None
}

impl<K, V> Default for AgedCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for AgedCache<K, V> {
    // Unlink iteratively; the default recursive drop can overflow on long chains.
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut entry) = link {
            link = entry.next.take();
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AgedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgedCache")
            .field("entries", &DebugEntries(self))
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

struct DebugEntries<'a, K, V>(&'a AgedCache<K, V>);

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for DebugEntries<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

// == Iter ==
/// Iterator over `(&K, &V)` pairs of an [`AgedCache`], newest key first.
pub struct Iter<'a, K, V> {
    next: Option<&'a ExpirableEntry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|entry| {
            self.next = entry.next.as_deref();
            (&entry.key, &entry.value)
        })
    }
}

impl<'a, K, V> IntoIterator for &'a AgedCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
