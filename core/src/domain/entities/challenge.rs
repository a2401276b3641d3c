//! One-time passcode challenge entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ChallengeKey, Channel, Purpose};
use crate::errors::OtpError;

/// Length of a code unless policy says otherwise
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default validity window for a challenge (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// A pending proof-of-possession challenge.
///
/// Challenges are immutable once created. The store owns their lifetime:
/// they disappear on successful verification, explicit deletion, or TTL
/// expiry, and issuing again under the same key supersedes the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub key: ChallengeKey,

    /// Normalized identifier (E.164 phone or canonical email)
    pub identifier: String,

    pub channel: Channel,

    pub purpose: Purpose,

    /// Fixed-width decimal code
    pub code: String,

    pub created_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

impl Challenge {
    pub fn new(
        key: ChallengeKey,
        identifier: String,
        channel: Channel,
        purpose: Purpose,
        code: String,
        ttl: std::time::Duration,
    ) -> Self {
        let now = Utc::now();
        let ttl = Duration::from_std(ttl)
            .unwrap_or_else(|_| Duration::minutes(DEFAULT_EXPIRATION_MINUTES));
        Self {
            key,
            identifier,
            channel,
            purpose,
            code,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Checks if the challenge has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

/// Tagged value stored under custom and namespaced keys: the identifier
/// (or pending address) the code was sent to, the purpose it was issued
/// for, and the code itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChallengeRecord {
    pub target: String,
    pub purpose: Purpose,
    pub code: String,
}

impl ChallengeRecord {
    pub fn new(target: impl Into<String>, purpose: &Purpose, code: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            purpose: purpose.clone(),
            code: code.into(),
        }
    }

    pub fn encode(&self) -> Result<String, OtpError> {
        serde_json::to_string(self).map_err(|e| OtpError::StoreUnavailable(e.to_string()))
    }

    /// Decode a stored value; anything but exactly this record fails closed
    pub fn decode(key: &str, raw: &str) -> Result<Self, OtpError> {
        let record: Self = serde_json::from_str(raw).map_err(|_| OtpError::CorruptChallengeData {
            key: key.to_string(),
        })?;
        if record.target.is_empty() || record.code.is_empty() {
            return Err(OtpError::CorruptChallengeData {
                key: key.to_string(),
            });
        }
        Ok(record)
    }
}
