//! Main passcode service implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use uuid::Uuid;

use crate::domain::entities::challenge::{Challenge, ChallengeRecord};
use crate::domain::entities::user::UserFieldUpdate;
use crate::domain::value_objects::{ChallengeKey, Channel, Purpose};
use crate::errors::{DomainResult, OtpError, OtpResult};
use crate::repositories::UserDirectory;

use super::config::{OtpServiceConfig, OTP_EMAIL_SUBJECT};
use super::dispatch::DispatchGateway;
use super::generator::CodeGenerator;
use super::normalizer::{mask_identifier, IdentifierNormalizer};
use super::traits::{CredentialStore, OtpEngine};
use super::types::{IssuedChallenge, VerifiedChallenge};

/// Passcode lifecycle engine.
///
/// Challenge states per key: no challenge, pending, then verified
/// (consumed), expired (store TTL) or superseded (re-issued). The store is
/// the only shared state; the engine keeps no per-key memory of its own.
pub struct OtpService {
    /// Expiring key/value store holding live challenges
    store: Arc<dyn CredentialStore>,
    /// Email and SMS transports
    dispatch: DispatchGateway,
    /// Accounts flagged as verified on `verify` purposes
    users: Arc<dyn UserDirectory>,
    normalizer: IdentifierNormalizer,
    generator: CodeGenerator,
    config: OtpServiceConfig,
}

impl OtpService {
    /// Create a new passcode service
    ///
    /// # Arguments
    ///
    /// * `store` - Credential store implementation
    /// * `dispatch` - Transports for email and SMS delivery
    /// * `users` - User directory consulted on verification
    /// * `config` - Code length, TTL and phone calling code
    pub fn new(
        store: Arc<dyn CredentialStore>,
        dispatch: DispatchGateway,
        users: Arc<dyn UserDirectory>,
        config: OtpServiceConfig,
    ) -> DomainResult<Self> {
        let generator = CodeGenerator::new(config.code_length)?;
        Ok(Self::with_generator(store, dispatch, users, config, generator))
    }

    /// Same as `new` with an explicit generator, e.g. a seeded one
    pub fn with_generator(
        store: Arc<dyn CredentialStore>,
        dispatch: DispatchGateway,
        users: Arc<dyn UserDirectory>,
        config: OtpServiceConfig,
        generator: CodeGenerator,
    ) -> Self {
        Self {
            store,
            dispatch,
            users,
            normalizer: IdentifierNormalizer::new(config.country_calling_code.clone()),
            generator,
            config,
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &IdentifierNormalizer {
        &self.normalizer
    }

    /// Draw a code at the configured policy length
    pub fn generate_code(&self) -> String {
        self.generator.generate()
    }

    /// Issue a `forgot_password` code over email
    pub async fn send_forgot_password_otp(&self, email: &str) -> OtpResult<IssuedChallenge> {
        self.issue(email, Channel::Email, &Purpose::forgot_password())
            .await
    }

    /// Send an arbitrary email through the configured email transport
    pub async fn send_raw_email(&self, to: &str, subject: &str, body: &str) -> OtpResult<String> {
        self.dispatch
            .send(Channel::Email, to, subject, body)
            .await
            .map_err(|reason| {
                tracing::error!(
                    to = %mask_identifier(Channel::Email, to),
                    error = %reason,
                    event = "raw_email_failed",
                    "Failed to send email"
                );
                OtpError::DispatchFailed {
                    key: String::new(),
                    channel: Channel::Email,
                    reason,
                }
            })
    }

    /// Check `code` against the record under `key` without consuming it.
    /// When `purpose` is given the record must have been issued for it.
    /// Returns the record and the raw stored value for a later `consume`.
    pub async fn check_record(
        &self,
        key: &str,
        code: &str,
        purpose: Option<&Purpose>,
    ) -> OtpResult<(ChallengeRecord, String)> {
        let record_and_raw = self.load_record(key).await?;
        let (record, _) = &record_and_raw;
        if let Some(expected) = purpose {
            if &record.purpose != expected {
                tracing::warn!(
                    key = key,
                    purpose = %record.purpose,
                    expected = %expected,
                    event = "otp_verification_failed",
                    reason = "purpose_mismatch",
                    "Challenge was issued for another purpose"
                );
                return Err(OtpError::InvalidOrExpiredCode);
            }
        }
        if !constant_time_eq(record.code.as_bytes(), code.as_bytes()) {
            tracing::warn!(key = key, event = "otp_verification_failed", "Incorrect code submitted");
            return Err(OtpError::IncorrectCode);
        }
        Ok(record_and_raw)
    }

    /// Delete `key` if it still holds `stored`. Losing the race to another
    /// verifier, or to expiry, reads as an expired code.
    pub async fn consume(&self, key: &str, stored: &str) -> OtpResult<()> {
        let removed = self
            .store
            .delete_if_equals(key, stored)
            .await
            .map_err(|e| self.store_error("consume", key, e))?;
        if !removed {
            tracing::warn!(key = key, event = "otp_consume_lost", "Challenge consumed concurrently or expired");
            return Err(OtpError::InvalidOrExpiredCode);
        }
        Ok(())
    }

    /// Redeem a custom-key challenge: check and consume it, returning the
    /// identifier it was sent to
    pub async fn verify_custom_key(&self, key: &str, code: &str) -> OtpResult<String> {
        let custom = ChallengeKey::custom(key)?.ok_or(OtpError::InvalidOrExpiredCode)?;
        let key = custom.as_str();
        let (record, raw) = self.check_record(key, code, None).await?;
        self.consume(key, &raw).await?;
        tracing::info!(key = key, event = "otp_verified", "Custom-key challenge verified");
        Ok(record.target)
    }

    /// Store `value` under `key`, then deliver the code. A dispatch failure
    /// leaves the stored challenge live.
    async fn store_and_dispatch(
        &self,
        challenge: Challenge,
        value: &str,
        destination: &str,
    ) -> OtpResult<IssuedChallenge> {
        let key = challenge.key.as_str();
        let masked = mask_identifier(challenge.channel, &challenge.identifier);

        self.store
            .set(key, value, self.config.ttl)
            .await
            .map_err(|e| self.store_error("store", key, e))?;

        tracing::info!(
            identifier = %masked,
            channel = %challenge.channel,
            purpose = %challenge.purpose,
            ttl_seconds = self.config.ttl.as_secs(),
            event = "otp_issued",
            "Stored new one-time passcode"
        );

        let message = self.config.otp_message(&challenge.code);
        let message_id = self
            .dispatch
            .send(challenge.channel, destination, OTP_EMAIL_SUBJECT, &message)
            .await
            .map_err(|reason| {
                tracing::error!(
                    identifier = %masked,
                    channel = %challenge.channel,
                    provider = self.dispatch.provider_name(challenge.channel),
                    error = %reason,
                    event = "otp_dispatch_failed",
                    "Failed to deliver passcode; challenge remains valid"
                );
                OtpError::DispatchFailed {
                    key: key.to_string(),
                    channel: challenge.channel,
                    reason,
                }
            })?;

        tracing::debug!(
            identifier = %masked,
            message_id = %message_id,
            event = "otp_dispatched",
            "Passcode delivered to transport"
        );

        Ok(IssuedChallenge {
            challenge,
            message_id,
        })
    }

    /// Email goes to the address as the caller wrote it, SMS to the E.164 form
    fn destination<'a>(channel: Channel, raw: &'a str, normalized: &'a str) -> &'a str {
        match channel {
            Channel::Email => raw.trim(),
            Channel::Phone => normalized,
        }
    }

    /// Flag the account owning `identifier` as verified on `channel`
    async fn mark_identifier_verified(&self, channel: Channel, identifier: &str) -> OtpResult<Uuid> {
        let lookup = match channel {
            Channel::Email => self.users.find_by_email(identifier).await,
            Channel::Phone => self.users.find_by_phone(identifier).await,
        };
        let user = lookup
            .map_err(|e| OtpError::MutationFailed { reason: e.to_string() })?
            .ok_or_else(|| OtpError::MutationFailed {
                reason: format!("no account registered for this {}", channel),
            })?;

        let update = match channel {
            Channel::Email => UserFieldUpdate::email_verified(),
            Channel::Phone => UserFieldUpdate::phone_verified(),
        };
        self.users
            .update_fields(user.id, &update)
            .await
            .map_err(|e| OtpError::MutationFailed { reason: e.to_string() })?;

        Ok(user.id)
    }

    async fn load_record(&self, key: &str) -> OtpResult<(ChallengeRecord, String)> {
        let raw = self.get_raw(key).await?.ok_or(OtpError::InvalidOrExpiredCode)?;
        let record = ChallengeRecord::decode(key, &raw).map_err(|e| {
            tracing::error!(key = key, event = "otp_record_corrupt", "Stored challenge record is corrupt");
            e
        })?;
        Ok((record, raw))
    }

    fn store_error(&self, operation: &str, key: &str, error: String) -> OtpError {
        tracing::error!(
            key = key,
            operation = operation,
            error = %error,
            event = "otp_store_failed",
            "Credential store operation failed"
        );
        OtpError::StoreUnavailable(error)
    }
}

#[async_trait]
impl OtpEngine for OtpService {
    /// Issue a code for `(identifier, purpose)`
    ///
    /// This method:
    /// 1. Normalizes the identifier for the channel
    /// 2. Generates a code at the policy length
    /// 3. Stores it under the canonical key, replacing any previous code
    /// 4. Sends it over the channel
    async fn issue(
        &self,
        identifier: &str,
        channel: Channel,
        purpose: &Purpose,
    ) -> OtpResult<IssuedChallenge> {
        let normalized = self.normalizer.normalize(channel, identifier)?;
        let key = ChallengeKey::canonical(&normalized, purpose);
        let code = self.generator.generate();
        let destination = Self::destination(channel, identifier, &normalized).to_string();

        let challenge = Challenge::new(key, normalized, channel, purpose.clone(), code.clone(), self.config.ttl);
        self.store_and_dispatch(challenge, &code, &destination).await
    }

    /// Verify a submitted code
    ///
    /// The challenge is consumed only after any account update succeeds, so
    /// a failed update can be retried with the same code.
    async fn verify(
        &self,
        identifier: &str,
        channel: Channel,
        purpose: &Purpose,
        code: &str,
    ) -> OtpResult<VerifiedChallenge> {
        let normalized = self.normalizer.normalize(channel, identifier)?;
        let key = ChallengeKey::canonical(&normalized, purpose);
        let masked = mask_identifier(channel, &normalized);

        let stored = self
            .store
            .get(key.as_str())
            .await
            .map_err(|e| self.store_error("get", key.as_str(), e))?
            .ok_or_else(|| {
                tracing::warn!(
                    identifier = %masked,
                    purpose = %purpose,
                    event = "otp_verification_failed",
                    reason = "missing_or_expired",
                    "No live challenge for identifier"
                );
                OtpError::InvalidOrExpiredCode
            })?;

        if !constant_time_eq(stored.as_bytes(), code.as_bytes()) {
            tracing::warn!(
                identifier = %masked,
                purpose = %purpose,
                event = "otp_verification_failed",
                reason = "incorrect_code",
                "Incorrect code submitted"
            );
            return Err(OtpError::IncorrectCode);
        }

        let verified_user = if purpose.marks_identifier_verified() {
            let user_id = self
                .mark_identifier_verified(channel, &normalized)
                .await
                .map_err(|e| {
                    tracing::error!(
                        identifier = %masked,
                        error = %e,
                        event = "otp_mutation_failed",
                        "Code matched but account update failed; challenge kept"
                    );
                    e
                })?;
            Some(user_id)
        } else {
            None
        };

        self.consume(key.as_str(), &stored).await?;

        tracing::info!(
            identifier = %masked,
            channel = %channel,
            purpose = %purpose,
            event = "otp_verified",
            "One-time passcode verified"
        );

        Ok(VerifiedChallenge {
            key,
            identifier: normalized,
            purpose: purpose.clone(),
            verified_user,
        })
    }

    /// Issue a code under a caller-chosen key. A blank key is a plain
    /// `issue`, redeemable with `verify`.
    async fn send_with_custom_key(
        &self,
        identifier: &str,
        channel: Channel,
        purpose: &Purpose,
        custom_key: &str,
    ) -> OtpResult<IssuedChallenge> {
        let Some(key) = ChallengeKey::custom(custom_key)? else {
            return self.issue(identifier, channel, purpose).await;
        };
        let normalized = self.normalizer.normalize(channel, identifier)?;
        let code = self.generator.generate();
        let value = ChallengeRecord::new(normalized.as_str(), purpose, code.as_str()).encode()?;
        let destination = Self::destination(channel, identifier, &normalized).to_string();

        let challenge = Challenge::new(key, normalized, channel, purpose.clone(), code, self.config.ttl);
        self.store_and_dispatch(challenge, &value, &destination).await
    }

    async fn peek_identifier_by_key(&self, key: &str) -> OtpResult<String> {
        let key = ChallengeKey::custom(key)?.ok_or(OtpError::InvalidOrExpiredCode)?;
        let (record, _) = self.load_record(key.as_str()).await?;
        Ok(record.target)
    }

    async fn save_raw(&self, key: &str, value: &str, ttl: Duration) -> OtpResult<()> {
        self.store
            .set(key, value, ttl)
            .await
            .map_err(|e| self.store_error("set", key, e))
    }

    async fn delete_raw(&self, key: &str) -> OtpResult<()> {
        self.store
            .delete(key)
            .await
            .map_err(|e| self.store_error("delete", key, e))
    }

    async fn get_raw(&self, key: &str) -> OtpResult<Option<String>> {
        self.store
            .get(key)
            .await
            .map_err(|e| self.store_error("get", key, e))
    }
}
