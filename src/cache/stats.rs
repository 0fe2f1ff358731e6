//! Cache Statistics Module
//!
//! Counters describing what a cache has done, for diagnostics.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads that found a live entry
    pub hits: u64,
    /// Reads that found nothing (missing or expired)
    pub misses: u64,
    /// Calls to `set`, including overwrites
    pub insertions: u64,
    /// Unreferenced entries evicted by the size bound
    pub evictions: u64,
    /// Referenced entries evicted because nothing else could go
    pub forced_evictions: u64,
    /// Entries dropped after their TTL elapsed
    pub expirations: u64,
    /// Entries removed explicitly or on zero reference count
    pub removals: u64,
    /// Successful release calls
    pub releases: u64,
    /// Release calls that reported an error
    pub release_failures: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    pub fn record_eviction(&mut self, forced: bool) {
        if forced {
            self.forced_evictions += 1;
        } else {
            self.evictions += 1;
        }
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Records the outcome of one release call.
    pub fn record_release(&mut self, ok: bool) {
        if ok {
            self.releases += 1;
        } else {
            self.release_failures += 1;
        }
    }

    // == Update Entry Count ==
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats, CacheStats::default());
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_eviction_split() {
        let mut stats = CacheStats::new();
        stats.record_eviction(false);
        stats.record_eviction(false);
        stats.record_eviction(true);
        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.forced_evictions, 1);
    }

    #[test]
    fn test_record_release_outcomes() {
        let mut stats = CacheStats::new();
        stats.record_release(true);
        stats.record_release(false);
        stats.record_release(true);
        assert_eq!(stats.releases, 2);
        assert_eq!(stats.release_failures, 1);
    }
}
