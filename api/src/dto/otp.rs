use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use sn_core::services::otp::{IssuedChallenge, VerifiedChallenge};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(length(min = 1, max = 254))]
    pub identifier: String,
    #[validate(length(min = 1, max = 16))]
    pub channel: String,
    #[validate(length(min = 1, max = 64))]
    pub purpose: String,
    /// Store the challenge under this key instead of the canonical one
    #[serde(default)]
    #[validate(length(max = 256))]
    pub custom_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub key: String,
    pub channel: String,
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

impl From<&IssuedChallenge> for SendOtpResponse {
    fn from(issued: &IssuedChallenge) -> Self {
        let challenge = &issued.challenge;
        Self {
            key: challenge.key.to_string(),
            channel: challenge.channel.to_string(),
            expires_at: challenge.expires_at,
            expires_in: challenge.time_until_expiration().num_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(length(min = 1, max = 254))]
    pub identifier: String,
    #[validate(length(min = 1, max = 16))]
    pub channel: String,
    #[validate(length(min = 1, max = 64))]
    pub purpose: String,
    #[validate(length(min = 1, max = 16))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub verified: bool,
    pub identifier: String,
    pub purpose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl From<VerifiedChallenge> for VerifyOtpResponse {
    fn from(verified: VerifiedChallenge) -> Self {
        Self {
            verified: true,
            identifier: verified.identifier,
            purpose: verified.purpose.to_string(),
            user_id: verified.verified_user,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct KeyQuery {
    #[validate(length(min = 1, max = 256))]
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeekResponse {
    pub identifier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugValueResponse {
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(length(min = 3, max = 254))]
    pub email: String,
}
