//! Shared error response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const SERVICE_UNAVAILABLE: &str = "SERVICE_UNAVAILABLE";
    pub const INVALID_IDENTIFIER: &str = "INVALID_IDENTIFIER";
    pub const INVALID_CHANNEL: &str = "INVALID_CHANNEL";
    pub const INVALID_OR_EXPIRED_CODE: &str = "INVALID_OR_EXPIRED_CODE";
    pub const DISPATCH_FAILED: &str = "DISPATCH_FAILED";
    pub const VERIFICATION_UPDATE_FAILED: &str = "VERIFICATION_UPDATE_FAILED";
    pub const CACHE_ERROR: &str = "CACHE_ERROR";
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const EMAIL_MISMATCH: &str = "EMAIL_MISMATCH";
    pub const EMAIL_IN_USE: &str = "EMAIL_IN_USE";
}
