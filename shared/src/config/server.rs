//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{parse_var, var, ConfigError, Environment};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: var("SERVER_HOST").unwrap_or(defaults.host),
            port: parse_var("SERVER_PORT", defaults.port)?,
            workers: parse_var("SERVER_WORKERS", defaults.workers)?,
        })
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any origin
    pub allowed_origins: Vec<String>,

    /// Preflight cache duration in seconds
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age: 3600,
        }
    }
}

impl CorsConfig {
    /// Permissive settings for local development
    pub fn development() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            ..Default::default()
        }
    }

    /// Reads comma-separated `ALLOWED_ORIGINS`
    pub fn from_env(environment: Environment) -> Self {
        match var("ALLOWED_ORIGINS") {
            Some(raw) => Self {
                allowed_origins: raw
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect(),
                ..Default::default()
            },
            None if environment.is_development() => Self::development(),
            None => Self::default(),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}
