//! Twilio SMS transport
//!
//! Posts to the Messages resource with HTTP basic auth. One attempt per
//! call; a failed send surfaces to the caller.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use sn_core::services::otp::SmsSender;
use sn_shared::config::SmsConfig;
use sn_shared::utils::phone::{is_valid_e164, mask_phone_number};

use crate::InfrastructureError;

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

pub struct TwilioSmsSender {
    client: Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    api_base_url: String,
}

impl TwilioSmsSender {
    pub fn new(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        let required = |value: &Option<String>, name: &str| {
            value
                .clone()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| InfrastructureError::Config(format!("{} not set", name)))
        };
        let account_sid = required(&config.account_sid, "TWILIO_ACCOUNT_SID")?;
        let auth_token = required(&config.auth_token, "TWILIO_AUTH_TOKEN")?;
        let from_number = required(&config.from_number, "TWILIO_FROM_NUMBER")?;

        if !is_valid_e164(&from_number) {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        info!(
            "Twilio SMS transport initialized with from number: {}",
            mask_phone_number(&from_number)
        );

        Ok(Self {
            client,
            account_sid,
            auth_token,
            from_number,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.api_base_url, self.account_sid
        )
    }

    async fn post_message(&self, to: &str, body: &str) -> Result<String, InfrastructureError> {
        let mut form: HashMap<&str, &str> = HashMap::new();
        form.insert("To", to);
        form.insert("From", &self.from_number);
        form.insert("Body", body);

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|e| e.message.map(|m| format!("{} ({})", m, e.code.unwrap_or_default())))
                .unwrap_or(text);
            return Err(InfrastructureError::Sms(format!(
                "Twilio returned {}: {}",
                status, detail
            )));
        }

        let message: MessageResponse = response.json().await?;
        info!(
            event = "sms_sent",
            provider = "twilio",
            to = %mask_phone_number(to),
            sid = %message.sid,
            status = message.status.as_deref().unwrap_or("unknown"),
            "SMS accepted by Twilio"
        );
        Ok(message.sid)
    }
}

#[async_trait]
impl SmsSender for TwilioSmsSender {
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, String> {
        if !is_valid_e164(to) {
            return Err(format!("Invalid phone number: {}", mask_phone_number(to)));
        }
        self.post_message(to, body).await.map_err(|e| {
            error!(to = %mask_phone_number(to), "Failed to send SMS: {}", e);
            e.to_string()
        })
    }

    fn provider_name(&self) -> &str {
        "twilio"
    }
}
