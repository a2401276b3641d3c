//! One-time passcode policy

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{parse_var, var, ConfigError};

/// Code lengths the generator supports
pub const SUPPORTED_CODE_LENGTHS: [usize; 2] = [4, 6];

/// Policy applied to every issued challenge
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of decimal digits in a code
    pub code_length: usize,

    /// Challenge lifetime in seconds
    pub ttl_seconds: u64,

    /// Calling code substituted for a national trunk prefix `0`
    pub country_calling_code: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            ttl_seconds: 300,
            country_calling_code: String::from("+84"),
        }
    }
}

impl OtpConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            code_length: parse_var("OTP_CODE_LENGTH", defaults.code_length)?,
            ttl_seconds: parse_var("OTP_TTL_SECONDS", defaults.ttl_seconds)?,
            country_calling_code: var("OTP_COUNTRY_CALLING_CODE")
                .unwrap_or(defaults.country_calling_code),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject policies the engine cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_CODE_LENGTHS.contains(&self.code_length) {
            return Err(ConfigError::InvalidValue {
                key: "OTP_CODE_LENGTH".to_string(),
                message: format!("must be one of {:?}", SUPPORTED_CODE_LENGTHS),
            });
        }
        if self.ttl_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "OTP_TTL_SECONDS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        let digits = self.country_calling_code.strip_prefix('+').unwrap_or("");
        if digits.is_empty() || digits.len() > 3 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidValue {
                key: "OTP_COUNTRY_CALLING_CODE".to_string(),
                message: "expected '+' followed by 1-3 digits".to_string(),
            });
        }
        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Lifetime in whole minutes, as quoted to recipients
    pub fn ttl_minutes(&self) -> u64 {
        self.ttl_seconds.div_ceil(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let config = OtpConfig::default();
        assert_eq!(config.code_length, 6);
        assert_eq!(config.ttl(), Duration::from_secs(300));
        assert_eq!(config.ttl_minutes(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_unsupported_length() {
        let config = OtpConfig {
            code_length: 8,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "OTP_CODE_LENGTH"
        ));
    }

    #[test]
    fn test_rejects_zero_ttl_and_bad_calling_code() {
        let zero_ttl = OtpConfig {
            ttl_seconds: 0,
            ..Default::default()
        };
        assert!(zero_ttl.validate().is_err());

        let bad_code = OtpConfig {
            country_calling_code: "84".to_string(),
            ..Default::default()
        };
        assert!(bad_code.validate().is_err());
    }

    #[test]
    fn test_four_digit_variant_is_supported() {
        let config = OtpConfig {
            code_length: 4,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
