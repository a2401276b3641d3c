//! Identifier normalization per channel

use sn_shared::utils::{email, phone};

use crate::domain::value_objects::Channel;
use crate::errors::{OtpError, OtpResult};

/// Canonicalizes identifiers so issue and verify derive the same store key.
/// Normalizing an already-normalized identifier returns it unchanged.
#[derive(Debug, Clone)]
pub struct IdentifierNormalizer {
    country_calling_code: String,
}

impl IdentifierNormalizer {
    pub fn new(country_calling_code: impl Into<String>) -> Self {
        Self {
            country_calling_code: country_calling_code.into(),
        }
    }

    /// Phone numbers become E.164; emails are trimmed and lower-cased.
    pub fn normalize(&self, channel: Channel, raw: &str) -> OtpResult<String> {
        let normalized = match channel {
            Channel::Phone => phone::to_e164(raw, &self.country_calling_code),
            Channel::Email => email::normalize_email(raw),
        };
        normalized.ok_or(OtpError::InvalidIdentifier { channel })
    }
}

/// Identifier rendered safe for logs
pub fn mask_identifier(channel: Channel, identifier: &str) -> String {
    match channel {
        Channel::Phone => phone::mask_phone_number(identifier),
        Channel::Email => email::mask_email(identifier),
    }
}
