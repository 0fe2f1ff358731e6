//! PDF URL cache
//!
//! Size-bounded cache of object URLs for merged or rendered PDFs. A URL is
//! revoked as soon as its last consumer lets go.

use std::fmt;

use serde::Serialize;

use crate::cache::{CacheOptions, Entries, RefCountedCache, Release, ReleaseError, RemovalPolicy};
use crate::keys::derive_key;

/// Default number of PDF URLs kept at once.
pub const DEFAULT_PDF_CACHE_SIZE: usize = 10;

/// A cached PDF object URL and the file name it is offered under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdfResource {
    pub url: String,
    pub filename: String,
}

/// Revokes object URLs in the host environment.
pub trait UrlRevoker {
    fn revoke(&mut self, url: &str) -> Result<(), ReleaseError>;
}

/// Adapts a [`UrlRevoker`] to the cache's release capability.
pub struct RevokeUrl<U>(U);

impl<U: UrlRevoker> Release<PdfResource> for RevokeUrl<U> {
    fn release(&mut self, value: &PdfResource) -> Result<(), ReleaseError> {
        self.0.revoke(&value.url)
    }
}

/// Eager, size-bounded cache of PDF object URLs.
pub struct PdfUrlCache<U: UrlRevoker> {
    inner: RefCountedCache<String, PdfResource, RevokeUrl<U>>,
}

impl<U: UrlRevoker> PdfUrlCache<U> {
    pub fn new(revoker: U) -> Self {
        Self::with_max_size(DEFAULT_PDF_CACHE_SIZE, revoker)
    }

    pub fn with_max_size(max_size: usize, revoker: U) -> Self {
        let options = CacheOptions::new(RemovalPolicy::Eager).with_max_size(max_size);
        Self {
            inner: RefCountedCache::with_release(options, RevokeUrl(revoker)),
        }
    }

    /// Key for the PDF built from `file_urls`, independent of their order.
    pub fn generate_key<S: AsRef<str>>(&self, file_urls: &[S]) -> String {
        derive_key(file_urls)
    }

    pub fn has(&mut self, key: &str) -> bool {
        self.inner.has(key)
    }

    pub fn get(&mut self, key: &str) -> Option<&PdfResource> {
        self.inner.get(key)
    }

    pub fn set(
        &mut self,
        key: impl Into<String>,
        url: impl Into<String>,
        filename: impl Into<String>,
    ) {
        let resource = PdfResource {
            url: url.into(),
            filename: filename.into(),
        };
        self.inner.set(key.into(), resource, None);
    }

    /// Returns true if the key was present.
    pub fn increment_ref(&mut self, key: &str) -> bool {
        self.inner.increment_ref(key)
    }

    /// Returns true if this call revoked the URL.
    pub fn decrement_ref(&mut self, key: &str) -> bool {
        self.inner.decrement_ref(key)
    }

    pub fn ref_count(&self, key: &str) -> u32 {
        self.inner.ref_count(key)
    }

    /// Revokes every cached URL.
    pub fn revoke_all(&mut self) -> usize {
        self.inner.evict_all()
    }

    pub fn entries(&self) -> Entries<'_, String, PdfResource> {
        self.inner.entries()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn revoker(&self) -> &U {
        &self.inner.releaser().0
    }
}

impl<U: UrlRevoker> fmt::Debug for PdfUrlCache<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfUrlCache")
            .field("inner", &self.inner)
            .finish()
    }
}
