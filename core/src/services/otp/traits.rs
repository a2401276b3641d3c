//! Ports the passcode service depends on, and the capability it offers

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::value_objects::{Channel, Purpose};
use crate::errors::OtpResult;

use super::types::{IssuedChallenge, VerifiedChallenge};

/// Key/value store with per-key expiry
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Upsert a value and reset its TTL
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), String>;
    /// `None` both for keys never set and for expired keys
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// No-op when the key is absent
    async fn delete(&self, key: &str) -> Result<(), String>;
    /// Atomically delete `key` only if it still holds `expected`.
    /// Returns whether this call removed it.
    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool, String>;
    /// Reachability check for health reporting
    async fn ping(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Email transport
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send a plain-text email, returning the provider's message id
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String, String>;
    fn provider_name(&self) -> &str;
}

/// SMS transport
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send a text message to an E.164 number, returning the provider's message id
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, String>;
    fn provider_name(&self) -> &str;
}

/// Capabilities of the passcode lifecycle engine
#[async_trait]
pub trait OtpEngine: Send + Sync {
    /// Generate, store under `otp:{identifier}:{purpose}` and deliver a code
    async fn issue(
        &self,
        identifier: &str,
        channel: Channel,
        purpose: &Purpose,
    ) -> OtpResult<IssuedChallenge>;

    /// Check a submitted code and consume the challenge on success
    async fn verify(
        &self,
        identifier: &str,
        channel: Channel,
        purpose: &Purpose,
        code: &str,
    ) -> OtpResult<VerifiedChallenge>;

    /// Like `issue`, but store a `{target, purpose, code}` record under
    /// `custom_key`. A blank key falls back to `issue`; keys in the `otp:`
    /// or `change_email:` namespaces are refused.
    async fn send_with_custom_key(
        &self,
        identifier: &str,
        channel: Channel,
        purpose: &Purpose,
        custom_key: &str,
    ) -> OtpResult<IssuedChallenge>;

    /// Identifier a custom-key challenge was sent to, without consuming it.
    /// Reserved-namespace keys are refused.
    async fn peek_identifier_by_key(&self, key: &str) -> OtpResult<String>;

    async fn save_raw(&self, key: &str, value: &str, ttl: Duration) -> OtpResult<()>;

    async fn delete_raw(&self, key: &str) -> OtpResult<()>;

    async fn get_raw(&self, key: &str) -> OtpResult<Option<String>>;
}
