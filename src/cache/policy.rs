//! Cache Policy Module
//!
//! Per-instance removal policy and construction options.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

// == Removal Policy ==
/// What happens to an entry when its reference count drops to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    /// Remove and release the entry immediately.
    Eager,
    /// Keep the entry until size-bound eviction or a full clear.
    #[default]
    Lazy,
}

impl fmt::Display for RemovalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalPolicy::Eager => f.write_str("eager"),
            RemovalPolicy::Lazy => f.write_str("lazy"),
        }
    }
}

impl FromStr for RemovalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eager" => Ok(RemovalPolicy::Eager),
            "lazy" => Ok(RemovalPolicy::Lazy),
            other => Err(format!("unknown removal policy: {other}")),
        }
    }
}

// == Cache Options ==
/// Construction options for a reference-counted cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheOptions {
    /// Maximum number of entries, None = unbounded
    pub max_size: Option<usize>,
    /// Removal policy applied on zero reference count
    pub policy: RemovalPolicy,
    /// TTL used by `set` when no explicit TTL is given
    pub default_ttl: Option<Duration>,
}

impl CacheOptions {
    pub fn new(policy: RemovalPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Bounds the cache. A bound of zero is treated as unbounded.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = (max_size > 0).then_some(max_size);
        self
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("eager".parse::<RemovalPolicy>(), Ok(RemovalPolicy::Eager));
        assert_eq!(" LAZY ".parse::<RemovalPolicy>(), Ok(RemovalPolicy::Lazy));
        assert!("sometimes".parse::<RemovalPolicy>().is_err());
    }

    #[test]
    fn test_policy_display_roundtrips() {
        for policy in [RemovalPolicy::Eager, RemovalPolicy::Lazy] {
            assert_eq!(policy.to_string().parse::<RemovalPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_options_zero_max_size_is_unbounded() {
        let options = CacheOptions::new(RemovalPolicy::Eager).with_max_size(0);
        assert_eq!(options.max_size, None);

        let options = options.with_max_size(10);
        assert_eq!(options.max_size, Some(10));
    }
}
