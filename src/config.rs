//! Configuration Module
//!
//! Loads service configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::cache::{CacheOptions, RemovalPolicy};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold, 0 = unbounded
    pub max_entries: usize,
    /// Default TTL in milliseconds for entries without explicit TTL, 0 = none
    pub default_ttl_ms: u64,
    /// What happens when an entry's reference count reaches zero
    pub removal_policy: RemovalPolicy,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 0, no expiry)
    /// - `REMOVAL_POLICY` - `eager` or `lazy` (default: lazy)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            default_ttl_ms: parse_var("DEFAULT_TTL_MS").unwrap_or(defaults.default_ttl_ms),
            removal_policy: parse_var("REMOVAL_POLICY").unwrap_or(defaults.removal_policy),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// Cache options described by this configuration.
    pub fn cache_options(&self) -> CacheOptions {
        let options = CacheOptions::new(self.removal_policy).with_max_size(self.max_entries);
        match self.default_ttl_ms {
            0 => options,
            ms => options.with_default_ttl(Duration::from_millis(ms)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl_ms: 0,
            removal_policy: RemovalPolicy::Lazy,
            server_port: 3000,
        }
    }
}

/// Reads and parses an env var, ignoring (and logging) malformed values.
fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl_ms, 0);
        assert_eq!(config.removal_policy, RemovalPolicy::Lazy);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the environment to avoid races between tests
        env::remove_var("MAX_ENTRIES");
        env::remove_var("DEFAULT_TTL_MS");
        env::remove_var("REMOVAL_POLICY");
        env::remove_var("SERVER_PORT");
        assert_eq!(Config::from_env(), Config::default());

        env::set_var("MAX_ENTRIES", "5");
        env::set_var("REMOVAL_POLICY", "eager");
        env::set_var("SERVER_PORT", "not-a-port");
        let config = Config::from_env();
        assert_eq!(config.max_entries, 5);
        assert_eq!(config.removal_policy, RemovalPolicy::Eager);
        assert_eq!(config.server_port, 3000);

        env::remove_var("MAX_ENTRIES");
        env::remove_var("REMOVAL_POLICY");
        env::remove_var("SERVER_PORT");
    }

    #[test]
    fn test_cache_options() {
        let config = Config {
            max_entries: 0,
            default_ttl_ms: 1500,
            removal_policy: RemovalPolicy::Eager,
            server_port: 3000,
        };
        let options = config.cache_options();
        assert_eq!(options.max_size, None);
        assert_eq!(options.default_ttl, Some(Duration::from_millis(1500)));
        assert_eq!(options.policy, RemovalPolicy::Eager);
    }
}
