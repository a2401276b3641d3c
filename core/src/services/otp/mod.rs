//! One-time passcode service module
//!
//! This module provides the passcode lifecycle:
//! - Identifier normalization per channel
//! - Code generation from a once-seeded RNG
//! - Storage in an expiring credential store
//! - Delivery over email or SMS
//! - Single-use verification bound to identifier and purpose

mod config;
mod dispatch;
mod generator;
mod normalizer;
mod service;
mod traits;
mod types;


pub use config::{OtpServiceConfig, OTP_EMAIL_SUBJECT};
pub use dispatch::DispatchGateway;
pub use generator::CodeGenerator;
pub use normalizer::{mask_identifier, IdentifierNormalizer};
pub use service::OtpService;
pub use traits::{CredentialStore, EmailSender, OtpEngine, SmsSender};
pub use types::{IssuedChallenge, VerifiedChallenge};
