//! Token store selection and Redis connection settings

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Backing store for live verification codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    /// Shared Redis instance; required once more than one server runs
    #[default]
    Redis,
    /// Process-local map for development and tests
    Memory,
}

impl FromStr for CacheType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "redis" => Ok(CacheType::Redis),
            "memory" | "in-memory" => Ok(CacheType::Memory),
            other => Err(format!("unknown cache type '{}'", other)),
        }
    }
}

/// Token store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub cache_type: CacheType,

    /// Redis connection URL, credentials included
    #[serde(default = "CacheConfig::default_url")]
    pub url: String,

    /// Redis logical database (0-15)
    #[serde(default)]
    pub database: u8,

    /// Seconds allowed per connection attempt
    #[serde(default = "CacheConfig::default_connection_timeout")]
    pub connection_timeout: u64,

    /// Attempts per connection or idempotent command
    #[serde(default = "CacheConfig::default_max_retries")]
    pub max_retries: u32,

    /// First backoff delay in milliseconds, doubled after every failure
    #[serde(default = "CacheConfig::default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Namespace prepended to every key, for deployments sharing one Redis
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_type: CacheType::default(),
            url: Self::default_url(),
            database: 0,
            connection_timeout: Self::default_connection_timeout(),
            max_retries: Self::default_max_retries(),
            retry_delay_ms: Self::default_retry_delay_ms(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Redis store at `url`, defaults elsewhere
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// In-memory store
    pub fn memory() -> Self {
        Self {
            cache_type: CacheType::Memory,
            ..Self::default()
        }
    }

    /// Read `CACHE_TYPE`, `REDIS_URL` and `REDIS_KEY_PREFIX`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(cache_type) = std::env::var("CACHE_TYPE").ok().and_then(|v| v.parse().ok()) {
            config.cache_type = cache_type;
        }
        if let Ok(url) = std::env::var("REDIS_URL") {
            config.url = url;
        }
        config.key_prefix = std::env::var("REDIS_KEY_PREFIX")
            .ok()
            .filter(|p| !p.trim().is_empty());
        config
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Select a logical database, clamped to the Redis default range
    pub fn with_database(mut self, db: u8) -> Self {
        self.database = db.min(15);
        self
    }

    /// Full key for a verification key, `<prefix>:<key>` when namespaced
    pub fn make_key(&self, key: &str) -> String {
        match self.key_prefix.as_deref() {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_owned(),
        }
    }

    fn default_url() -> String {
        "redis://localhost:6379".to_string()
    }

    fn default_connection_timeout() -> u64 {
        5
    }

    fn default_max_retries() -> u32 {
        3
    }

    fn default_retry_delay_ms() -> u64 {
        100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_local_redis() {
        let config = CacheConfig::default();
        assert_eq!(config.cache_type, CacheType::Redis);
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.max_retries, 3);
        assert!(config.key_prefix.is_none());
    }

    #[test]
    fn test_prefixed_keys() {
        let config = CacheConfig::new("redis://cache:6379")
            .with_prefix("tokengate")
            .with_database(42);

        assert_eq!(
            config.make_key("Email:VERIFICATION:CODE:a@b.com"),
            "tokengate:Email:VERIFICATION:CODE:a@b.com"
        );
        assert_eq!(config.database, 15);
        assert_eq!(
            CacheConfig::memory().make_key("IMG:VERIFICATION:CODE:CACHE:x"),
            "IMG:VERIFICATION:CODE:CACHE:x"
        );
    }

    #[test]
    fn test_cache_type_names() {
        assert_eq!("redis".parse::<CacheType>(), Ok(CacheType::Redis));
        assert_eq!(" In-Memory".parse::<CacheType>(), Ok(CacheType::Memory));
        assert!("memcached".parse::<CacheType>().is_err());
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: CacheConfig = serde_json::from_str(r#"{"cache_type": "memory"}"#).unwrap();
        assert_eq!(config.cache_type, CacheType::Memory);
        assert_eq!(config.connection_timeout, 5);
        assert_eq!(config.retry_delay_ms, 100);
    }
}
