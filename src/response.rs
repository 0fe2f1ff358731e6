//! API response cache
//!
//! Unbounded, lazily expiring cache for decoded API responses. Values own no
//! external resource, so nothing is released when they leave.

use std::time::Duration;

use crate::cache::{CacheOptions, CacheStats, RefCountedCache, RemovalPolicy};

#[derive(Debug)]
pub struct ResponseCache<V> {
    inner: RefCountedCache<String, V>,
}

impl<V: PartialEq> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> ResponseCache<V> {
    pub fn new() -> Self {
        Self {
            inner: RefCountedCache::new(CacheOptions::new(RemovalPolicy::Lazy)),
        }
    }

    /// Returns the cached response, or None once `ttl` has passed.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        self.inner.get(key)
    }

    /// Caches `value`. Without a TTL the value stays until deleted.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.inner.set(key.into(), value, ttl);
    }

    pub fn has(&mut self, key: &str) -> bool {
        self.inner.has(key)
    }

    pub fn delete(&mut self, key: &str) -> bool {
        self.inner.remove(key)
    }

    /// Drops every cached response.
    pub fn evict(&mut self) -> usize {
        self.inner.evict_all()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.stats()
    }
}
