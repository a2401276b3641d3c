//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `sn_core`:
//!
//! - **Cache**: Redis and in-memory credential stores for passcode challenges
//! - **Database**: MySQL and in-memory user directories
//! - **SMS**: Twilio and mock transports
//! - **Email**: HTTP mail-relay and mock transports

// Re-export core types for convenience
pub use sn_core::errors::*;

/// Cache module - credential stores
pub mod cache;

/// Database module - user directory implementations
pub mod database;

/// Email transport module
pub mod email;

/// SMS transport module
pub mod sms;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS provider rejected a message
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Email provider rejected a message
    #[error("Email service error: {0}")]
    Email(String),
}
