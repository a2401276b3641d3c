//! Email transports
//!
//! - **Mock**: records messages in memory
//! - **Http**: JSON mail-relay API with bearer authentication

pub mod http_email;
pub mod mock_email;


use std::sync::Arc;

use sn_core::services::otp::EmailSender;
use sn_shared::config::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

pub use http_email::HttpEmailSender;
pub use mock_email::MockEmailSender;

/// Create the email transport selected by `config.provider`
pub fn create_email_sender(
    config: &EmailConfig,
) -> Result<Arc<dyn EmailSender>, InfrastructureError> {
    match config.provider {
        EmailProvider::Mock => {
            tracing::info!("Using mock email transport");
            Ok(Arc::new(MockEmailSender::new()))
        }
        EmailProvider::Http => Ok(Arc::new(HttpEmailSender::new(config)?)),
    }
}
