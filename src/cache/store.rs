//! Cache Store Module
//!
//! Reference-counted cache combining HashMap storage with insertion-order
//! tracking, lazy TTL expiry and an optional size bound.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{
    CacheEntry, CacheOptions, CacheStats, InsertionOrder, NoopRelease, Release, RemovalPolicy,
};

// == Ref Counted Cache ==
/// Cache of values whose disposal needs an explicit release step.
///
/// Consumers register interest with [`increment_ref`](Self::increment_ref)
/// and give it back with [`decrement_ref`](Self::decrement_ref). What happens
/// when the count reaches zero depends on the instance's [`RemovalPolicy`].
/// Every value that leaves the cache is handed to the release capability
/// exactly once.
///
/// The cache is not synchronized. Wrap it in a lock to share it across
/// threads.
pub struct RefCountedCache<K, V, R = NoopRelease> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Oldest-first insertion order
    order: InsertionOrder<K>,
    /// Activity counters
    stats: CacheStats,
    options: CacheOptions,
    release: R,
}

impl<K, V> RefCountedCache<K, V, NoopRelease>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    // == Constructor ==
    /// Creates a cache whose values own no external resource.
    pub fn new(options: CacheOptions) -> Self {
        Self::with_release(options, NoopRelease)
    }
}

impl<K, V, R> RefCountedCache<K, V, R>
where
    K: Eq + Hash + Clone + fmt::Debug,
    R: Release<V>,
{
    /// Creates a cache that disposes of values through `release`.
    pub fn with_release(options: CacheOptions, release: R) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            options,
            release,
        }
    }

    // == Has ==
    /// Returns true if a live entry exists for `key`.
    ///
    /// An expired entry is removed and released as a side effect.
    pub fn has<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        !self.expire_if_stale(key) && self.entries.contains_key(key)
    }

    // == Get ==
    /// Returns the stored value, or None if missing or expired.
    ///
    /// The reference count is left untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.expire_if_stale(key) || !self.entries.contains_key(key) {
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| &entry.value)
    }

    // == Set ==
    /// Stores a value with a zero reference count.
    ///
    /// `ttl` falls back to the configured default TTL. When the key is new and
    /// the cache is at its size bound, room is made before inserting so the
    /// bound still holds afterwards. Overwriting keeps the key's insertion
    /// position and releases the replaced value. Setting the value already
    /// stored only refreshes its TTL; the value is not released and live
    /// references are kept.
    pub fn set(&mut self, key: K, value: V, ttl: Option<Duration>)
    where
        V: PartialEq,
    {
        let ttl = ttl.or(self.options.default_ttl);

        if !self.entries.contains_key(&key) {
            self.make_room();
            self.order.insert(key.clone());
        }

        let mut entry = CacheEntry::new(value, ttl);
        let unchanged = match self.entries.get(&key) {
            Some(current) if current.value == entry.value => {
                if !current.is_expired() {
                    entry.ref_count = current.ref_count;
                }
                true
            }
            _ => false,
        };

        if let Some(previous) = self.entries.insert(key.clone(), entry) {
            if unchanged {
                debug!(key = ?key, "Refreshed cache entry");
            } else {
                debug!(key = ?key, ref_count = previous.ref_count, "Overwrote cache entry");
                self.release_value(&key, previous.value);
            }
        }

        self.stats.record_insertion();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Increment Ref ==
    /// Registers one more consumer of `key`.
    ///
    /// Returns false and does nothing when the key is absent or expired.
    pub fn increment_ref<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.expire_if_stale(key) {
            return false;
        }

        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.acquire();
                true
            }
            None => false,
        }
    }

    // == Decrement Ref ==
    /// Drops one consumer of `key`.
    ///
    /// Returns true only when this call brought the count to zero. Under the
    /// eager policy the entry is then removed and released. Absent keys and
    /// keys already at zero return false.
    pub fn decrement_ref<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.expire_if_stale(key) {
            return false;
        }

        let reached_zero = self
            .entries
            .get_mut(key)
            .is_some_and(|entry| entry.release_ref());

        if reached_zero && self.options.policy == RemovalPolicy::Eager {
            if let Some((key, entry)) = self.take(key) {
                debug!(key = ?key, "Removed entry on last reference");
                self.stats.record_removal();
                self.release_value(&key, entry.value);
            }
        }

        reached_zero
    }

    // == Remove ==
    /// Removes `key` regardless of its reference count.
    ///
    /// Returns true if an entry was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.take(key) {
            Some((key, entry)) => {
                self.stats.record_removal();
                self.release_value(&key, entry.value);
                true
            }
            None => false,
        }
    }

    // == Evict All ==
    /// Removes and releases every entry, oldest first.
    ///
    /// Returns the number of entries released.
    pub fn evict_all(&mut self) -> usize {
        let mut evicted = 0;

        for key in self.order.drain() {
            if let Some(entry) = self.entries.remove(&key) {
                self.release_value(&key, entry.value);
                evicted += 1;
            }
        }
        debug_assert!(self.entries.is_empty());

        self.stats.set_total_entries(self.entries.len());
        debug!(evicted, "Evicted all cache entries");
        evicted
    }

    // == Entries ==
    /// Iterates live entries oldest first.
    ///
    /// Expired entries are skipped but not removed. Calling this again starts
    /// a fresh pass.
    pub fn entries(&self) -> Entries<'_, K, V> {
        Entries {
            keys: self.order.iter(),
            entries: &self.entries,
            now: current_timestamp_ms(),
        }
    }

    // == Ref Count ==
    /// Returns the current reference count, 0 for absent or expired keys.
    pub fn ref_count<Q>(&self, key: &Q) -> u32
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map_or(0, |entry| entry.ref_count)
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included until
    /// they are observed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> Option<usize> {
        self.options.max_size
    }

    pub fn policy(&self) -> RemovalPolicy {
        self.options.policy
    }

    /// Returns the release capability.
    pub fn releaser(&self) -> &R {
        &self.release
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Internals ==
    /// Removes `key` if its entry has expired. Returns true if it did.
    fn expire_if_stale<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let expired = self.entries.get(key).is_some_and(CacheEntry::is_expired);
        if !expired {
            return false;
        }

        if let Some((key, entry)) = self.take(key) {
            debug!(key = ?key, ref_count = entry.ref_count, "Cache entry expired");
            self.stats.record_expiration();
            self.release_value(&key, entry.value);
        }
        true
    }

    /// Removes and releases every expired entry, oldest first.
    fn expire_stale_entries(&mut self) {
        let now = current_timestamp_ms();
        let stale: Vec<K> = self
            .order
            .iter()
            .filter(|key| {
                self.entries
                    .get(*key)
                    .is_some_and(|entry| entry.is_expired_at(now))
            })
            .cloned()
            .collect();

        for key in stale {
            if let Some((key, entry)) = self.take(&key) {
                debug!(key = ?key, ref_count = entry.ref_count, "Cache entry expired");
                self.stats.record_expiration();
                self.release_value(&key, entry.value);
            }
        }
    }

    /// Evicts until a new key fits under the size bound.
    ///
    /// Expired entries are cleared first and count as expirations.
    ///
    /// Unreferenced entries go first, oldest first. If every entry is
    /// referenced the oldest one is evicted anyway.
    fn make_room(&mut self) {
        let Some(max_size) = self.options.max_size else {
            return;
        };

        if self.entries.len() >= max_size {
            self.expire_stale_entries();
        }

        while self.entries.len() >= max_size {
            let unreferenced = self
                .order
                .iter()
                .find(|key| {
                    self.entries
                        .get(*key)
                        .is_some_and(CacheEntry::is_unreferenced)
                })
                .cloned();

            let (victim, forced) = match unreferenced {
                Some(key) => (key, false),
                None => match self.order.oldest().cloned() {
                    Some(key) => (key, true),
                    None => break,
                },
            };

            // take() also drops the key from the order, so the loop always advances
            let Some((key, entry)) = self.take(&victim) else {
                continue;
            };

            if forced {
                warn!(
                    key = ?key,
                    ref_count = entry.ref_count,
                    "Cache full of referenced entries, evicting oldest"
                );
            } else {
                debug!(key = ?key, "Evicted unreferenced entry");
            }
            self.stats.record_eviction(forced);
            self.release_value(&key, entry.value);
        }
    }

    fn take<Q>(&mut self, key: &Q) -> Option<(K, CacheEntry<V>)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.order.remove(key);
        let removed = self.entries.remove_entry(key);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    /// Hands a departing value to the release capability.
    ///
    /// Failures are logged and counted; the entry stays removed.
    fn release_value(&mut self, key: &K, value: V) {
        match self.release.release(&value) {
            Ok(()) => self.stats.record_release(true),
            Err(err) => {
                warn!(key = ?key, error = %err, "Failed to release cached resource");
                self.stats.record_release(false);
            }
        }
    }
}

impl<K: fmt::Debug, V, R> fmt::Debug for RefCountedCache<K, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefCountedCache")
            .field("len", &self.entries.len())
            .field("order", &self.order)
            .field("options", &self.options)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

// == Entries Iterator ==
/// Snapshot iteration over live `(key, value)` pairs, oldest first.
pub struct Entries<'a, K, V> {
    keys: std::iter::Rev<std::collections::vec_deque::Iter<'a, K>>,
    entries: &'a HashMap<K, CacheEntry<V>>,
    now: u64,
}

impl<K, V> Clone for Entries<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            entries: self.entries,
            now: self.now,
        }
    }
}

impl<'a, K: Eq + Hash, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for key in self.keys.by_ref() {
            match self.entries.get(key) {
                Some(entry) if !entry.is_expired_at(self.now) => {
                    return Some((key, &entry.value));
                }
                _ => continue,
            }
        }
        None
    }
}
