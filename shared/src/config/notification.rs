//! Email and SMS transport configuration

use serde::{Deserialize, Serialize};

use super::{parse_var, required_var, var, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Records messages in memory and logs them
    Mock,
    /// JSON mail-relay HTTP API
    Http,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(EmailProvider::Mock),
            "http" | "api" => Ok(EmailProvider::Http),
            _ => Err(format!("Unknown email provider: {}", s)),
        }
    }
}

/// Email transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub provider: EmailProvider,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub from_address: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            api_url: None,
            api_key: None,
            from_address: String::from("no-reply@localhost"),
            timeout_seconds: 10,
        }
    }
}

impl EmailConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let provider = parse_var("EMAIL_PROVIDER", defaults.provider)?;
        let api_url = match provider {
            EmailProvider::Http => Some(required_var("EMAIL_API_URL")?),
            EmailProvider::Mock => var("EMAIL_API_URL"),
        };
        Ok(Self {
            provider,
            api_url,
            api_key: var("EMAIL_API_KEY"),
            from_address: var("EMAIL_FROM").unwrap_or(defaults.from_address),
            timeout_seconds: parse_var("EMAIL_TIMEOUT_SECONDS", defaults.timeout_seconds)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    Mock,
    Twilio,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(SmsProvider::Mock),
            "twilio" => Ok(SmsProvider::Twilio),
            _ => Err(format!("Unknown SMS provider: {}", s)),
        }
    }
}

/// SMS transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    pub provider: SmsProvider,
    #[serde(default)]
    pub account_sid: Option<String>,
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub from_number: Option<String>,
    /// Override of the Twilio API base URL
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::Mock,
            account_sid: None,
            auth_token: None,
            from_number: None,
            api_base_url: String::from("https://api.twilio.com/2010-04-01"),
            timeout_seconds: 10,
        }
    }
}

impl SmsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let provider = parse_var("SMS_PROVIDER", defaults.provider)?;
        let (account_sid, auth_token, from_number) = match provider {
            SmsProvider::Twilio => (
                Some(required_var("TWILIO_ACCOUNT_SID")?),
                Some(required_var("TWILIO_AUTH_TOKEN")?),
                Some(required_var("TWILIO_FROM_NUMBER")?),
            ),
            SmsProvider::Mock => (None, None, None),
        };
        Ok(Self {
            provider,
            account_sid,
            auth_token,
            from_number,
            api_base_url: var("TWILIO_API_BASE_URL").unwrap_or(defaults.api_base_url),
            timeout_seconds: parse_var("SMS_TIMEOUT_SECONDS", defaults.timeout_seconds)?,
        })
    }
}
