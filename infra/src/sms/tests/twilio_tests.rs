//! Unit tests for the Twilio transport that need no network

use sn_core::services::otp::SmsSender;
use sn_shared::config::{SmsConfig, SmsProvider};

use crate::sms::TwilioSmsSender;
use crate::InfrastructureError;

fn twilio_config() -> SmsConfig {
    SmsConfig {
        provider: SmsProvider::Twilio,
        account_sid: Some("ACtest_account_sid".to_string()),
        auth_token: Some("test_auth_token".to_string()),
        from_number: Some("+15551234567".to_string()),
        api_base_url: "https://api.twilio.com/2010-04-01/".to_string(),
        timeout_seconds: 2,
    }
}

#[test]
fn test_messages_url() {
    let sender = TwilioSmsSender::new(&twilio_config()).unwrap();
    assert_eq!(
        sender.messages_url(),
        "https://api.twilio.com/2010-04-01/Accounts/ACtest_account_sid/Messages.json"
    );
    assert_eq!(sender.provider_name(), "twilio");
}

#[test]
fn test_missing_credentials() {
    let config = SmsConfig {
        auth_token: None,
        ..twilio_config()
    };
    let result = TwilioSmsSender::new(&config);
    assert!(matches!(result, Err(InfrastructureError::Config(msg)) if msg.contains("TWILIO_AUTH_TOKEN")));
}

#[test]
fn test_from_number_must_be_e164() {
    let config = SmsConfig {
        from_number: Some("5551234567".to_string()),
        ..twilio_config()
    };
    assert!(TwilioSmsSender::new(&config).is_err());
}

#[tokio::test]
async fn test_rejects_non_e164_destination() {
    let sender = TwilioSmsSender::new(&twilio_config()).unwrap();
    let err = sender.send_sms("0912345678", "hello").await.unwrap_err();
    assert!(err.contains("Invalid phone number"));
}

#[tokio::test]
async fn test_unreachable_api_is_an_error() {
    let config = SmsConfig {
        api_base_url: "http://127.0.0.1:9".to_string(),
        ..twilio_config()
    };
    let sender = TwilioSmsSender::new(&config).unwrap();
    assert!(sender.send_sms("+84912345678", "hello").await.is_err());
}
