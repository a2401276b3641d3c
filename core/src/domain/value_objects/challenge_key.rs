//! Store keys under which challenges live

use std::fmt;

use uuid::Uuid;

use super::Purpose;
use crate::errors::OtpError;

/// Prefixes owned by canonical and email-change keys
const RESERVED_PREFIXES: [&str; 2] = ["otp:", "change_email:"];

/// Key of a challenge in the credential store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChallengeKey(String);

impl ChallengeKey {
    /// `otp:{identifier}:{purpose}`, the key used by Issue and Verify
    pub fn canonical(normalized_identifier: &str, purpose: &Purpose) -> Self {
        Self(format!("otp:{}:{}", normalized_identifier, purpose))
    }

    /// `change_email:{user_id}`, holding the pending address and its code
    pub fn email_change(user_id: Uuid) -> Self {
        Self(format!("{}:{}", Purpose::CHANGE_EMAIL, user_id))
    }

    /// Caller-chosen key, trimmed. `None` when blank.
    ///
    /// Keys inside the canonical or email-change namespaces are refused so a
    /// custom challenge can never stand in for one of theirs.
    pub fn custom(raw: &str) -> Result<Option<Self>, OtpError> {
        let key = raw.trim();
        if key.is_empty() {
            return Ok(None);
        }
        if RESERVED_PREFIXES.iter().any(|prefix| key.starts_with(prefix)) {
            return Err(OtpError::ReservedKey(key.to_string()));
        }
        Ok(Some(Self(key.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChallengeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChallengeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
