//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::{parse_var, var, ConfigError};

/// Which credential store backs the OTP engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Redis,
    /// Process-local store for development and tests
    Memory,
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" | "in-memory" => Ok(CacheBackend::Memory),
            _ => Err(format!("Unknown cache backend: {}", s)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub backend: CacheBackend,

    /// Redis connection URL
    pub url: String,

    /// Connection attempts made at startup before giving up
    pub connect_retries: u32,

    /// Optional namespace prepended to every key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Redis,
            url: String::from("redis://localhost:6379"),
            connect_retries: 3,
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            backend: parse_var("CACHE_BACKEND", defaults.backend)?,
            url: var("REDIS_URL").unwrap_or(defaults.url),
            connect_retries: parse_var("REDIS_CONNECT_RETRIES", defaults.connect_retries)?,
            key_prefix: var("REDIS_KEY_PREFIX"),
        })
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}
