//! Shared utilities and common types for the social network backend
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the process environment
//! - Error response structures
//! - Identifier utilities (phone normalization, masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheBackend, CacheConfig, ConfigError, CorsConfig, DatabaseConfig,
    EmailConfig, EmailProvider, Environment, LogFormat, LoggingConfig, OtpConfig,
    ServerConfig, SmsConfig, SmsProvider,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::ApiResponse;
pub use utils::{email, phone};
