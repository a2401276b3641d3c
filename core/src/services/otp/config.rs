//! Configuration for the passcode service

use std::time::Duration;

use sn_shared::config::OtpConfig;

use crate::domain::entities::challenge::{DEFAULT_CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};

/// Subject line of passcode emails
pub const OTP_EMAIL_SUBJECT: &str = "OTP Verification";

#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Digits per code (4 or 6)
    pub code_length: usize,
    /// Lifetime of a stored challenge
    pub ttl: Duration,
    /// Replaces a leading national `0` in phone numbers
    pub country_calling_code: String,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            ttl: Duration::from_secs(DEFAULT_EXPIRATION_MINUTES as u64 * 60),
            country_calling_code: "+84".to_string(),
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            ttl: config.ttl(),
            country_calling_code: config.country_calling_code.clone(),
        }
    }
}

impl OtpServiceConfig {
    /// Validity quoted in messages, rounded up to whole minutes
    pub fn ttl_minutes(&self) -> u64 {
        self.ttl.as_secs().div_ceil(60)
    }

    pub fn otp_message(&self, code: &str) -> String {
        format!(
            "Your OTP code is {}. It is valid for {} minutes.",
            code,
            self.ttl_minutes()
        )
    }
}
