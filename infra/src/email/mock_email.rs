//! Mock email transport for development

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use sn_core::services::otp::EmailSender;
use sn_shared::utils::email::{is_valid_email, mask_email};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEmail {
    pub message_id: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Default, Clone)]
pub struct MockEmailSender {
    outbox: Arc<Mutex<Vec<RecordedEmail>>>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    pub fn outbox(&self) -> Vec<RecordedEmail> {
        match self.outbox.lock() {
            Ok(outbox) => outbox.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Most recent message sent to `to`
    pub fn last_to(&self, to: &str) -> Option<RecordedEmail> {
        self.outbox().into_iter().rev().find(|m| m.to == to)
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        if !is_valid_email(to) {
            return Err(format!("Invalid email address: {}", mask_email(to)));
        }
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err("simulated email failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        info!(
            event = "email_sent",
            provider = "mock",
            to = %mask_email(to),
            message_id = %message_id,
            "Mock email accepted"
        );

        let record = RecordedEmail {
            message_id: message_id.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };
        match self.outbox.lock() {
            Ok(mut outbox) => outbox.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
