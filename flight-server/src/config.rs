//! Application configuration read from the environment.
//!
//! Built once at startup and handed to constructors; nothing reads the
//! environment after that.

use std::time::Duration;

use crate::cache::{CacheConfig, MAX_CACHE_TTL};
use crate::planner::SearchConfig;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3050;

/// Default environment name.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but can't be parsed.
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Environment name, e.g. "dev" or "prod".
    pub environment: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Itinerary cache settings.
    pub cache: CacheConfig,

    /// Search settings.
    pub search: SearchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            port: DEFAULT_PORT,
            cache: CacheConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// anything unset.
    ///
    /// | Variable             | Default |
    /// |----------------------|---------|
    /// | `ENV`                | `dev`   |
    /// | `PORT`               | `3050`  |
    /// | `CACHE_TTL_SECS`     | `86400` |
    /// | `CACHE_MAX_CAPACITY` | `10000` |
    /// | `SEARCH_MAX_STATES`  | `100000`|
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let environment = lookup("ENV")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.environment);

        let port = parse_or(&lookup, "PORT", defaults.port)?;
        let ttl_secs = parse_or(&lookup, "CACHE_TTL_SECS", defaults.cache.ttl.as_secs())?;
        ensure("CACHE_TTL_SECS", ttl_secs, ttl_secs <= MAX_CACHE_TTL.as_secs())?;
        let max_capacity = parse_or(&lookup, "CACHE_MAX_CAPACITY", defaults.cache.max_capacity)?;
        let max_states = parse_or(&lookup, "SEARCH_MAX_STATES", defaults.search.max_states)?;
        ensure("SEARCH_MAX_STATES", max_states, max_states > 0)?;

        Ok(Self {
            environment,
            port,
            cache: CacheConfig {
                ttl: Duration::from_secs(ttl_secs),
                max_capacity,
            },
            search: SearchConfig::new(max_states),
        })
    }

    /// Returns true for the local development environment.
    pub fn is_dev(&self) -> bool {
        self.environment == DEFAULT_ENVIRONMENT
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

/// Reject a parsed value that is out of range.
fn ensure<T: ToString>(name: &'static str, value: T, ok: bool) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.port, 3050);
        assert_eq!(config.cache.ttl, Duration::from_secs(86_400));
        assert!(config.is_dev());
    }

    #[test]
    fn reads_all_variables() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ENV", "prod"),
            ("PORT", "8080"),
            ("CACHE_TTL_SECS", "60"),
            ("CACHE_MAX_CAPACITY", "5"),
            ("SEARCH_MAX_STATES", "1000"),
        ]))
        .unwrap();

        assert_eq!(config.environment, "prod");
        assert!(!config.is_dev());
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache.ttl, Duration::from_secs(60));
        assert_eq!(config.cache.max_capacity, 5);
        assert_eq!(config.search.max_states, 1000);
    }

    #[test]
    fn blank_environment_falls_back() {
        let config = AppConfig::from_lookup(lookup_from(&[("ENV", "  ")])).unwrap();
        assert_eq!(config.environment, "dev");
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "PORT",
                value: "http".to_string()
            }
        );
        assert_eq!(err.to_string(), "invalid value for PORT: \"http\"");
    }

    #[test]
    fn ttl_beyond_cache_limit_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("CACHE_TTL_SECS", "99999999999")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "CACHE_TTL_SECS",
                value: "99999999999".to_string()
            }
        );

        let longest = MAX_CACHE_TTL.as_secs().to_string();
        let config = AppConfig::from_lookup(lookup_from(&[("CACHE_TTL_SECS", longest.as_str())])).unwrap();
        assert_eq!(config.cache.ttl, MAX_CACHE_TTL);
    }

    #[test]
    fn zero_max_states_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("SEARCH_MAX_STATES", "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "SEARCH_MAX_STATES",
                value: "0".to_string()
            }
        );
    }

    #[test]
    fn negative_ttl_is_an_error() {
        assert!(AppConfig::from_lookup(lookup_from(&[("CACHE_TTL_SECS", "-1")])).is_err());
    }
}
