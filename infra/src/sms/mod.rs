//! SMS transports
//!
//! - **Mock**: records messages in memory and logs them with masked numbers
//! - **Twilio**: Messages REST API over reqwest

pub mod mock_sms;
pub mod twilio;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use sn_core::services::otp::SmsSender;
use sn_shared::config::{SmsConfig, SmsProvider};

use crate::InfrastructureError;

pub use mock_sms::MockSmsSender;
pub use twilio::TwilioSmsSender;

/// Create the SMS transport selected by `config.provider`
pub fn create_sms_sender(config: &SmsConfig) -> Result<Arc<dyn SmsSender>, InfrastructureError> {
    match config.provider {
        SmsProvider::Mock => {
            tracing::info!("Using mock SMS transport");
            Ok(Arc::new(MockSmsSender::new()))
        }
        SmsProvider::Twilio => Ok(Arc::new(TwilioSmsSender::new(config)?)),
    }
}
