//! Forgot-password codes

use std::sync::Arc;

use crate::domain::value_objects::{Channel, Purpose};
use crate::errors::{AccountError, DomainResult};
use crate::repositories::UserDirectory;
use crate::services::otp::{IssuedChallenge, OtpEngine, OtpService, VerifiedChallenge};

pub struct PasswordResetService {
    otp: Arc<OtpService>,
    users: Arc<dyn UserDirectory>,
}

impl PasswordResetService {
    pub fn new(otp: Arc<OtpService>, users: Arc<dyn UserDirectory>) -> Self {
        Self { otp, users }
    }

    /// Send a `forgot_password` code to a registered email
    pub async fn send_forgot_password_otp(&self, email: &str) -> DomainResult<IssuedChallenge> {
        let normalized = self.otp.normalizer().normalize(Channel::Email, email)?;
        if self.users.find_by_email(&normalized).await?.is_none() {
            return Err(AccountError::UserNotFound.into());
        }
        Ok(self.otp.send_forgot_password_otp(email).await?)
    }

    /// Redeem a reset code. Setting the new password is the caller's job.
    pub async fn confirm_password_reset_code(
        &self,
        email: &str,
        code: &str,
    ) -> DomainResult<VerifiedChallenge> {
        Ok(self
            .otp
            .verify(email, Channel::Email, &Purpose::forgot_password(), code)
            .await?)
    }
}
