//! Response DTOs for the cache service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, RemovalPolicy};

/// Response body for GET /get/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub value: String,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for PUT /set
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for DELETE /del/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for GET /has/:key
#[derive(Debug, Clone, Serialize)]
pub struct HasResponse {
    pub key: String,
    pub present: bool,
}

/// Response body for the reference-count endpoints
#[derive(Debug, Clone, Serialize)]
pub struct RefCountResponse {
    pub key: String,
    /// Count after the operation
    pub ref_count: u32,
    /// True when a decrement brought the count to zero
    pub released: bool,
}

/// Response body for POST /evict
#[derive(Debug, Clone, Serialize)]
pub struct EvictResponse {
    /// Number of entries released
    pub evicted: usize,
}

/// One stored pair in GET /entries
#[derive(Debug, Clone, Serialize)]
pub struct EntryItem {
    pub key: String,
    pub value: String,
}

/// Response body for GET /entries
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    pub count: usize,
    /// Live entries, oldest first
    pub entries: Vec<EntryItem>,
}

impl EntriesResponse {
    pub fn new(entries: Vec<EntryItem>) -> Self {
        Self {
            count: entries.len(),
            entries,
        }
    }
}

/// Response body for POST /key
#[derive(Debug, Clone, Serialize)]
pub struct KeyResponse {
    pub key: String,
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    pub policy: RemovalPolicy,
    /// Configured size bound, null when unbounded
    pub max_entries: Option<usize>,
}

impl StatsResponse {
    pub fn new(stats: CacheStats, policy: RemovalPolicy, max_entries: Option<usize>) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
            policy,
            max_entries,
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
