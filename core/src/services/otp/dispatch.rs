//! Delivery of rendered messages over the configured transports

use std::sync::Arc;

use crate::domain::value_objects::Channel;

use super::traits::{EmailSender, SmsSender};

/// Routes a message to the email or SMS transport. Failures are returned
/// as-is; nothing here retries.
#[derive(Clone)]
pub struct DispatchGateway {
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
}

impl DispatchGateway {
    pub fn new(email: Arc<dyn EmailSender>, sms: Arc<dyn SmsSender>) -> Self {
        Self { email, sms }
    }

    /// Deliver `body` to `destination`; `subject` is ignored for SMS
    pub async fn send(
        &self,
        channel: Channel,
        destination: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, String> {
        match channel {
            Channel::Email => self.email.send_email(destination, subject, body).await,
            Channel::Phone => self.sms.send_sms(destination, body).await,
        }
    }

    pub fn provider_name(&self, channel: Channel) -> &str {
        match channel {
            Channel::Email => self.email.provider_name(),
            Channel::Phone => self.sms.provider_name(),
        }
    }
}
