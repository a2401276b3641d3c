//! Error types for passcode issuance, verification and the account flows
//! built on top of them.

use sn_shared::error_codes;
use thiserror::Error;

use crate::domain::value_objects::Channel;

/// Message shared by every "this code does not work" outcome, so callers
/// cannot tell a missing challenge from a wrong or corrupt one
pub const INVALID_OR_EXPIRED_MESSAGE: &str = "Invalid or expired code";

/// Errors of the passcode lifecycle engine
#[derive(Error, Debug)]
pub enum OtpError {
    #[error("Invalid {channel} identifier")]
    InvalidIdentifier { channel: Channel },

    #[error("Invalid channel: {0}")]
    InvalidChannel(String),

    #[error("Invalid purpose: {0:?}")]
    InvalidPurpose(String),

    #[error("Key {0:?} lies in a reserved namespace")]
    ReservedKey(String),

    /// The challenge was stored but could not be delivered; it stays live
    #[error("Failed to deliver code via {channel}: {reason}")]
    DispatchFailed {
        key: String,
        channel: Channel,
        reason: String,
    },

    /// No live challenge: never issued, expired, consumed or superseded
    #[error("Invalid or expired code")]
    InvalidOrExpiredCode,

    #[error("Incorrect code")]
    IncorrectCode,

    /// The code matched but the account update failed; the challenge is kept
    #[error("Failed to apply verification: {reason}")]
    MutationFailed { reason: String },

    #[error("Stored challenge under {key} could not be decoded")]
    CorruptChallengeData { key: String },

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),
}

impl OtpError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            OtpError::InvalidIdentifier { .. } => error_codes::INVALID_IDENTIFIER,
            OtpError::InvalidChannel(_) => error_codes::INVALID_CHANNEL,
            OtpError::InvalidPurpose(_) | OtpError::ReservedKey(_) => error_codes::VALIDATION_ERROR,
            OtpError::DispatchFailed { .. } => error_codes::DISPATCH_FAILED,
            OtpError::InvalidOrExpiredCode
            | OtpError::IncorrectCode
            | OtpError::CorruptChallengeData { .. } => error_codes::INVALID_OR_EXPIRED_CODE,
            OtpError::MutationFailed { .. } => error_codes::VERIFICATION_UPDATE_FAILED,
            OtpError::StoreUnavailable(_) => error_codes::CACHE_ERROR,
        }
    }

    /// Message safe to show to the caller
    pub fn public_message(&self) -> String {
        match self {
            OtpError::InvalidOrExpiredCode
            | OtpError::IncorrectCode
            | OtpError::CorruptChallengeData { .. } => INVALID_OR_EXPIRED_MESSAGE.to_string(),
            OtpError::DispatchFailed { channel, .. } => {
                format!("Could not deliver the code via {}. Please try again later", channel)
            }
            OtpError::MutationFailed { .. } => {
                "Code accepted but the account could not be updated. Please try again".to_string()
            }
            OtpError::StoreUnavailable(_) => "Service temporarily unavailable".to_string(),
            other => other.to_string(),
        }
    }

    /// Rejected input; nothing was stored or sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            OtpError::InvalidIdentifier { .. }
                | OtpError::InvalidChannel(_)
                | OtpError::InvalidPurpose(_)
                | OtpError::ReservedKey(_)
        )
    }

    /// A submitted code did not authenticate
    pub fn is_rejected_code(&self) -> bool {
        matches!(
            self,
            OtpError::InvalidOrExpiredCode
                | OtpError::IncorrectCode
                | OtpError::CorruptChallengeData { .. }
        )
    }
}

pub type OtpResult<T> = Result<T, OtpError>;

/// Preconditions of the account flows layered on the engine
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("User not found")]
    UserNotFound,

    #[error("Current email does not match")]
    EmailMismatch,

    #[error("Email already in use")]
    EmailAlreadyInUse,
}

impl AccountError {
    pub fn code(&self) -> &'static str {
        match self {
            AccountError::UserNotFound => error_codes::USER_NOT_FOUND,
            AccountError::EmailMismatch => error_codes::EMAIL_MISMATCH,
            AccountError::EmailAlreadyInUse => error_codes::EMAIL_IN_USE,
        }
    }
}
