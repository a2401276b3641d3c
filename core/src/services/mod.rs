//! Business services containing domain logic and use cases.

pub mod account;
pub mod otp;

// Re-export commonly used types
pub use account::{EmailChangeService, PasswordResetService};
pub use otp::{
    CredentialStore, DispatchGateway, EmailSender, IssuedChallenge, OtpEngine, OtpService,
    OtpServiceConfig, SmsSender, VerifiedChallenge,
};
