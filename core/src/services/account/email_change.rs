//! Email change confirmed by a code sent to the new address

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::challenge::{Challenge, ChallengeRecord};
use crate::domain::entities::user::UserFieldUpdate;
use crate::domain::value_objects::{ChallengeKey, Channel, Purpose};
use crate::errors::{AccountError, DomainResult, OtpError};
use crate::repositories::UserDirectory;
use crate::services::otp::{mask_identifier, IssuedChallenge, OtpEngine, OtpService};

pub const EMAIL_CHANGE_SUBJECT: &str = "Email change verification";

pub struct EmailChangeService {
    otp: Arc<OtpService>,
    users: Arc<dyn UserDirectory>,
}

impl EmailChangeService {
    pub fn new(otp: Arc<OtpService>, users: Arc<dyn UserDirectory>) -> Self {
        Self { otp, users }
    }

    /// Start an email change for `user_id`.
    ///
    /// The user must exist, `old_email` must be their current address and
    /// `new_email` must be unused. The pending address and a fresh code are
    /// stored under `change_email:{user_id}` and the code is mailed to the
    /// new address.
    pub async fn request_email_change(
        &self,
        user_id: Uuid,
        old_email: &str,
        new_email: &str,
    ) -> DomainResult<IssuedChallenge> {
        let normalizer = self.otp.normalizer();
        let old_email = normalizer.normalize(Channel::Email, old_email)?;
        let new_address = normalizer.normalize(Channel::Email, new_email)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let current = user
            .email
            .as_deref()
            .and_then(|email| normalizer.normalize(Channel::Email, email).ok());
        if current.as_deref() != Some(old_email.as_str()) {
            tracing::warn!(user_id = %user_id, event = "email_change_rejected", reason = "mismatch", "Current email does not match");
            return Err(AccountError::EmailMismatch.into());
        }

        if self.users.find_by_email(&new_address).await?.is_some() {
            tracing::warn!(user_id = %user_id, event = "email_change_rejected", reason = "in_use", "New email already registered");
            return Err(AccountError::EmailAlreadyInUse.into());
        }

        let config = self.otp.config();
        let key = ChallengeKey::email_change(user_id);
        let code = self.otp.generate_code();
        let value = ChallengeRecord::new(new_address.as_str(), &Purpose::change_email(), code.as_str()).encode()?;
        self.otp.save_raw(key.as_str(), &value, config.ttl).await?;

        let body = format!(
            "Your email change code is {}. It is valid for {} minutes.",
            code,
            config.ttl_minutes()
        );
        let message_id = self
            .otp
            .send_raw_email(new_email.trim(), EMAIL_CHANGE_SUBJECT, &body)
            .await
            .map_err(|e| match e {
                OtpError::DispatchFailed { channel, reason, .. } => OtpError::DispatchFailed {
                    key: key.to_string(),
                    channel,
                    reason,
                },
                other => other,
            })?;

        tracing::info!(
            user_id = %user_id,
            new_email = %mask_identifier(Channel::Email, &new_address),
            event = "email_change_requested",
            "Email change code sent"
        );

        Ok(IssuedChallenge {
            challenge: Challenge::new(key, new_address, Channel::Email, Purpose::change_email(), code, config.ttl),
            message_id,
        })
    }

    /// Complete a pending change; returns the new address.
    ///
    /// The record is consumed only after the directory update succeeds.
    pub async fn confirm_email_change(&self, user_id: Uuid, code: &str) -> DomainResult<String> {
        let key = ChallengeKey::email_change(user_id);
        let (record, stored) = self
            .otp
            .check_record(key.as_str(), code, Some(&Purpose::change_email()))
            .await?;

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AccountError::UserNotFound.into());
        }

        self.users
            .update_fields(user_id, &UserFieldUpdate::verified_email(record.target.as_str()))
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, event = "email_change_failed", "Failed to update email; code kept");
                OtpError::MutationFailed { reason: e.to_string() }
            })?;

        self.otp.consume(key.as_str(), &stored).await?;

        tracing::info!(user_id = %user_id, event = "email_changed", "Email address changed");
        Ok(record.target)
    }
}
