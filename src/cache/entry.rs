//! Cache Entry Module
//!
//! Defines a single stored value together with its reference count and
//! optional expiry.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A stored value with reference count and TTL metadata.
///
/// Entries are owned by the cache; callers only ever see the value.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Number of logical consumers currently holding the value
    pub ref_count: u32,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry with a zero reference count and optional TTL.
    pub fn new(value: V, ttl: Option<Duration>) -> Self {
        let now = current_timestamp_ms();
        let expires_at = ttl.map(|ttl| now.saturating_add(duration_ms(ttl)));

        Self {
            value,
            ref_count: 0,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Checks expiry against an explicit timestamp.
    ///
    /// An entry is expired only once `now` is strictly past `expires_at`.
    pub fn is_expired_at(&self, now: u64) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at
            .map(|expires| expires.saturating_sub(current_timestamp_ms()))
    }

    // == Reference Counting ==
    /// Increments the reference count.
    pub fn acquire(&mut self) -> u32 {
        self.ref_count = self.ref_count.saturating_add(1);
        self.ref_count
    }

    /// Decrements the reference count, floored at zero.
    ///
    /// Returns `true` only when this call moved the count from one to zero.
    pub fn release_ref(&mut self) -> bool {
        match self.ref_count {
            0 => false,
            1 => {
                self.ref_count = 0;
                true
            }
            _ => {
                self.ref_count -= 1;
                false
            }
        }
    }

    /// Returns true when no consumer holds the entry.
    pub fn is_unreferenced(&self) -> bool {
        self.ref_count == 0
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(duration_ms)
        .unwrap_or(0)
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation_no_ttl() {
        let entry = CacheEntry::new("test_value".to_string(), None);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.ref_count, 0);
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = CacheEntry::new("test_value", Some(Duration::from_secs(60)));

        assert!(entry.expires_at.is_some());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("test_value", Some(Duration::from_millis(20)));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(50));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_ms();
        let entry = CacheEntry {
            value: "test",
            ref_count: 0,
            created_at: now,
            expires_at: Some(now),
        };

        // Still live at exactly expires_at, gone one millisecond later
        assert!(!entry.is_expired_at(now));
        assert!(entry.is_expired_at(now + 1));
    }

    #[test]
    fn test_ttl_remaining_ms() {
        let entry = CacheEntry::new("test_value", Some(Duration::from_secs(10)));

        let remaining_ms = entry.ttl_remaining_ms().unwrap();
        assert!(remaining_ms <= 10_000);
        assert!(remaining_ms >= 9_000);
    }

    #[test]
    fn test_ttl_remaining_no_expiration() {
        let entry = CacheEntry::new("test_value", None);
        assert!(entry.ttl_remaining_ms().is_none());
    }

    #[test]
    fn test_acquire_and_release_ref() {
        let mut entry = CacheEntry::new("v", None);

        assert_eq!(entry.acquire(), 1);
        assert_eq!(entry.acquire(), 2);
        assert!(!entry.release_ref());
        assert!(entry.release_ref());
        assert!(entry.is_unreferenced());
    }

    #[test]
    fn test_release_ref_at_zero_stays_zero() {
        let mut entry = CacheEntry::new("v", None);

        assert!(!entry.release_ref());
        assert_eq!(entry.ref_count, 0);
    }
}
