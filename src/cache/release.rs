//! Resource Release Module
//!
//! The capability a cache uses to dispose of the external resource behind a
//! value once the value leaves the cache.

use thiserror::Error;

// == Release Error ==
/// Failure reported by a release capability.
///
/// The cache logs and counts these; the entry is already gone by then.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to release resource: {0}")]
pub struct ReleaseError(pub String);

impl ReleaseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

// == Release Trait ==
/// Disposes of the resource wrapped by a cached value.
///
/// Called exactly once per value that leaves the cache.
pub trait Release<V> {
    fn release(&mut self, value: &V) -> Result<(), ReleaseError>;
}

impl<V, F> Release<V> for F
where
    F: FnMut(&V) -> Result<(), ReleaseError>,
{
    fn release(&mut self, value: &V) -> Result<(), ReleaseError> {
        self(value)
    }
}

// == Noop Release ==
/// Release capability for values that own no external resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRelease;

impl<V> Release<V> for NoopRelease {
    fn release(&mut self, _value: &V) -> Result<(), ReleaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_release() {
        let mut seen = Vec::new();
        {
            let mut release = |value: &String| {
                seen.push(value.clone());
                Ok::<(), ReleaseError>(())
            };
            release.release(&"blob:1".to_string()).unwrap();
        }
        assert_eq!(seen, vec!["blob:1".to_string()]);
    }

    #[test]
    fn test_release_error_display() {
        let err = ReleaseError::new("handle already revoked");
        assert_eq!(
            err.to_string(),
            "failed to release resource: handle already revoked"
        );
    }

    #[test]
    fn test_noop_release() {
        assert!(NoopRelease.release(&42).is_ok());
    }
}
