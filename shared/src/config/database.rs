//! Database configuration module

use serde::{Deserialize, Serialize};

use super::{parse_var, var, ConfigError};

/// MySQL connection settings for the user directory
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Connection URL; without one the in-memory directory is used
    #[serde(default)]
    pub url: Option<String>,

    pub max_connections: u32,

    /// Seconds to wait when acquiring a pooled connection
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connect_timeout: 30,
        }
    }
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            max_connections: 10,
            connect_timeout: 30,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: var("DATABASE_URL"),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 10)?,
            connect_timeout: parse_var("DATABASE_CONNECT_TIMEOUT", 30)?,
        })
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}
