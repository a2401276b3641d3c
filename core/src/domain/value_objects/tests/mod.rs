use std::str::FromStr;

use uuid::Uuid;

use crate::domain::value_objects::{ChallengeKey, Channel, Purpose};
use crate::errors::OtpError;

#[test]
fn test_channel_parsing() {
    assert_eq!(Channel::from_str("email").unwrap(), Channel::Email);
    assert_eq!(Channel::from_str(" Phone ").unwrap(), Channel::Phone);
    assert_eq!(Channel::from_str("sms").unwrap(), Channel::Phone);
    assert!(matches!(
        Channel::from_str("pigeon"),
        Err(OtpError::InvalidChannel(ref c)) if c == "pigeon"
    ));
}

#[test]
fn test_channel_serde_is_lowercase() {
    assert_eq!(serde_json::to_string(&Channel::Phone).unwrap(), "\"phone\"");
    let parsed: Channel = serde_json::from_str("\"email\"").unwrap();
    assert_eq!(parsed, Channel::Email);
}

#[test]
fn test_purpose_accepts_arbitrary_tags() {
    assert_eq!(Purpose::parse("verify").unwrap(), Purpose::verify());
    assert_eq!(Purpose::parse("login_2fa").unwrap().as_str(), "login_2fa");
    assert!(Purpose::verify().marks_identifier_verified());
    assert!(!Purpose::forgot_password().marks_identifier_verified());
}

#[test]
fn test_purpose_rejects_key_breaking_tags() {
    for raw in ["", "   ", "a:b", "two words"] {
        assert!(matches!(Purpose::parse(raw), Err(OtpError::InvalidPurpose(_))), "{raw:?}");
    }
}

#[test]
fn test_purpose_deserialization_validates() {
    let ok: Purpose = serde_json::from_str("\"forgot_password\"").unwrap();
    assert_eq!(ok, Purpose::forgot_password());
    assert!(serde_json::from_str::<Purpose>("\"bad:tag\"").is_err());
}

#[test]
fn test_canonical_key_format() {
    let key = ChallengeKey::canonical("user@example.com", &Purpose::verify());
    assert_eq!(key.as_str(), "otp:user@example.com:verify");

    let key = ChallengeKey::canonical("+84912345678", &Purpose::forgot_password());
    assert_eq!(key.as_str(), "otp:+84912345678:forgot_password");
}

#[test]
fn test_email_change_key_format() {
    let id = Uuid::new_v4();
    assert_eq!(ChallengeKey::email_change(id).as_str(), format!("change_email:{}", id));
}

#[test]
fn test_custom_key() {
    assert_eq!(ChallengeKey::custom(" signup:abc ").unwrap().unwrap().as_str(), "signup:abc");
    assert!(ChallengeKey::custom("  ").unwrap().is_none());
    // Only the exact namespace prefix is reserved
    assert!(ChallengeKey::custom("otpx:1").unwrap().is_some());
}

#[test]
fn test_custom_key_rejects_reserved_namespaces() {
    let id = Uuid::new_v4();
    for raw in [
        format!("change_email:{}", id),
        " change_email:x".to_string(),
        "otp:user@example.com:verify".to_string(),
    ] {
        let err = ChallengeKey::custom(&raw).unwrap_err();
        assert!(matches!(err, OtpError::ReservedKey(_)), "{raw:?} should be reserved");
        assert!(err.is_validation());
    }
}
