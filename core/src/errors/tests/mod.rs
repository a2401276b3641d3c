//! Unit tests for domain error types

use crate::domain::value_objects::Channel;
use crate::errors::{AccountError, DomainError, OtpError, INVALID_OR_EXPIRED_MESSAGE};

#[test]
fn test_rejected_codes_share_one_public_message() {
    let rejected = [
        OtpError::InvalidOrExpiredCode,
        OtpError::IncorrectCode,
        OtpError::CorruptChallengeData { key: "otp:x:verify".to_string() },
    ];
    for error in rejected {
        assert!(error.is_rejected_code());
        assert_eq!(error.public_message(), INVALID_OR_EXPIRED_MESSAGE);
        assert_eq!(error.code(), "INVALID_OR_EXPIRED_CODE");
    }
}

#[test]
fn test_corrupt_data_key_not_in_public_message() {
    let error = OtpError::CorruptChallengeData { key: "change_email:secret".to_string() };
    assert!(error.to_string().contains("change_email:secret"));
    assert!(!error.public_message().contains("change_email"));
}

#[test]
fn test_validation_classification() {
    assert!(OtpError::InvalidIdentifier { channel: Channel::Phone }.is_validation());
    assert!(OtpError::InvalidChannel("fax".to_string()).is_validation());
    assert!(!OtpError::IncorrectCode.is_validation());
    assert!(!OtpError::StoreUnavailable("down".to_string()).is_validation());
}

#[test]
fn test_dispatch_failed_message_names_channel() {
    let error = OtpError::DispatchFailed {
        key: "otp:+84912345678:verify".to_string(),
        channel: Channel::Phone,
        reason: "HTTP 503".to_string(),
    };
    assert_eq!(error.code(), "DISPATCH_FAILED");
    assert!(error.public_message().contains("phone"));
    assert!(!error.public_message().contains("503"));
}

#[test]
fn test_domain_error_bridges() {
    let error: DomainError = OtpError::IncorrectCode.into();
    assert!(matches!(error, DomainError::Otp(OtpError::IncorrectCode)));
    assert_eq!(error.to_string(), "Incorrect code");

    let error: DomainError = AccountError::EmailAlreadyInUse.into();
    assert!(matches!(error, DomainError::Account(AccountError::EmailAlreadyInUse)));
}
