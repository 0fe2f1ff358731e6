//! Cache Module
//!
//! Reference-counted caching with lazy TTL expiry, an optional size bound
//! and injected resource release.

mod entry;
mod order;
mod policy;
mod release;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use order::InsertionOrder;
pub use policy::{CacheOptions, RemovalPolicy};
pub use release::{NoopRelease, Release, ReleaseError};
pub use stats::CacheStats;
pub use store::{Entries, RefCountedCache};
