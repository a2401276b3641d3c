//! Purpose tag a challenge is bound to

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::OtpError;

/// Free-form tag naming what a code authorizes. A code issued for one
/// purpose never verifies under another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Purpose(String);

impl Purpose {
    /// Marks the identifier as verified on the owning account
    pub const VERIFY: &'static str = "verify";
    pub const FORGOT_PASSWORD: &'static str = "forgot_password";
    pub const CHANGE_EMAIL: &'static str = "change_email";

    /// Accepts any non-empty tag without `:` or whitespace, since the tag is
    /// embedded in colon-separated store keys
    pub fn parse(raw: &str) -> Result<Self, OtpError> {
        let tag = raw.trim();
        if tag.is_empty() || tag.contains(':') || tag.chars().any(char::is_whitespace) {
            return Err(OtpError::InvalidPurpose(raw.to_string()));
        }
        Ok(Self(tag.to_string()))
    }

    pub fn verify() -> Self {
        Self(Self::VERIFY.to_string())
    }

    pub fn forgot_password() -> Self {
        Self(Self::FORGOT_PASSWORD.to_string())
    }

    pub fn change_email() -> Self {
        Self(Self::CHANGE_EMAIL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a successful verification must flag the account as verified
    pub fn marks_identifier_verified(&self) -> bool {
        self.0 == Self::VERIFY
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Purpose {
    type Error = OtpError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Purpose> for String {
    fn from(purpose: Purpose) -> Self {
        purpose.0
    }
}
