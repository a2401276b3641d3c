//! Mock SMS transport for development

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use sn_core::services::otp::SmsSender;
use sn_shared::utils::phone::{is_valid_e164, mask_phone_number};

/// One recorded message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSms {
    pub message_id: String,
    pub to: String,
    pub body: String,
}

/// Keeps every accepted message; never leaves the process
#[derive(Debug, Default, Clone)]
pub struct MockSmsSender {
    messages: Arc<Mutex<Vec<RecordedSms>>>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    pub fn messages(&self) -> Vec<RecordedSms> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn message_count(&self) -> usize {
        self.messages().len()
    }
}

#[async_trait]
impl SmsSender for MockSmsSender {
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, String> {
        if !is_valid_e164(to) {
            return Err(format!("Invalid phone number: {}", mask_phone_number(to)));
        }
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(to = %mask_phone_number(to), "Mock SMS failure");
            return Err("simulated SMS failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        info!(
            event = "sms_sent",
            provider = "mock",
            to = %mask_phone_number(to),
            message_id = %message_id,
            "Mock SMS accepted"
        );

        let record = RecordedSms {
            message_id: message_id.clone(),
            to: to.to_string(),
            body: body.to_string(),
        };
        match self.messages.lock() {
            Ok(mut messages) => messages.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
