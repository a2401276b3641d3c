//! Unit tests for forgot-password codes

use crate::domain::entities::user::User;
use crate::domain::value_objects::Purpose;
use crate::errors::{AccountError, DomainError, OtpError};
use crate::services::account::PasswordResetService;
use crate::services::otp::tests::mocks::TestHarness;

fn flow(h: &TestHarness) -> PasswordResetService {
    PasswordResetService::new(h.service.clone(), h.users.clone())
}

#[tokio::test]
async fn test_send_requires_registered_email() {
    let h = TestHarness::new();

    let err = flow(&h).send_forgot_password_otp("nobody@example.com").await.unwrap_err();

    assert!(matches!(err, DomainError::Account(AccountError::UserNotFound)));
    assert!(h.email.sent().is_empty());
}

#[tokio::test]
async fn test_send_and_confirm() {
    let h = TestHarness::new();
    h.users.add(User::new(Some("user@example.com".to_string()), None));
    let service = flow(&h);

    let issued = service.send_forgot_password_otp("User@example.com").await.unwrap();
    assert_eq!(issued.challenge.purpose, Purpose::forgot_password());
    assert!(h.store.value("otp:user@example.com:forgot_password").is_some());

    let verified = service
        .confirm_password_reset_code("user@example.com", &issued.challenge.code)
        .await
        .unwrap();
    assert_eq!(verified.identifier, "user@example.com");
    // Reset codes never flip verification flags
    assert!(h.users.updates().is_empty());
}

#[tokio::test]
async fn test_confirm_rejects_unknown_code() {
    let h = TestHarness::new();
    let err = flow(&h)
        .confirm_password_reset_code("user@example.com", "123456")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Otp(OtpError::InvalidOrExpiredCode)));
}
