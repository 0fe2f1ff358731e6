//! Refcache - reference-counted resource cache
//!
//! Caches values whose disposal needs an explicit release step, shared by
//! several consumers through reference counting, with lazy TTL expiry and an
//! optional size bound. Also ships an HTTP service hosting one cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod keys;
pub mod models;
pub mod pdf;
pub mod response;

pub use api::AppState;
pub use cache::{CacheOptions, RefCountedCache, Release, ReleaseError, RemovalPolicy};
pub use config::Config;
pub use keys::derive_key;
pub use pdf::{PdfResource, PdfUrlCache, UrlRevoker};
pub use response::ResponseCache;
