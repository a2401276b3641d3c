//! Configuration module with business-specific sub-modules
//!
//! Every section is read from environment variables by its `from_env`
//! constructor; the binary loads `.env` through `dotenvy` beforehand.
//! - `cache` - Credential store backend and Redis connection
//! - `database` - MySQL user directory connection
//! - `environment` - Environment detection and logging configuration
//! - `notification` - Email and SMS transports
//! - `otp` - One-time passcode policy
//! - `server` - HTTP server and CORS

pub mod cache;
pub mod database;
pub mod environment;
pub mod notification;
pub mod otp;
pub mod server;

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use cache::{CacheBackend, CacheConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use notification::{EmailConfig, EmailProvider, SmsConfig, SmsProvider};
pub use otp::OtpConfig;
pub use server::{CorsConfig, ServerConfig};

/// Errors raised while assembling configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Missing required variable: {0}")]
    Missing(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    pub cache: CacheConfig,
    pub database: DatabaseConfig,
    pub otp: OtpConfig,
    pub email: EmailConfig,
    pub sms: SmsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            cache: CacheConfig::default(),
            database: DatabaseConfig::default(),
            otp: OtpConfig::default(),
            email: EmailConfig::default(),
            sms: SmsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        Ok(Self {
            environment,
            server: ServerConfig::from_env()?,
            cors: CorsConfig::from_env(environment),
            cache: CacheConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            otp: OtpConfig::from_env()?,
            email: EmailConfig::from_env()?,
            sms: SmsConfig::from_env()?,
            logging: LoggingConfig::from_env(environment)?,
        })
    }
}

/// Read an optional variable; empty strings count as unset
pub(crate) fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Read and parse a variable, falling back to `default` when unset
pub(crate) fn parse_var<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Read a variable that must be present
pub(crate) fn required_var(key: &str) -> Result<String, ConfigError> {
    var(key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}
