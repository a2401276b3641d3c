//! HTTP mail-relay transport
//!
//! Sends `{from, to, subject, text}` as JSON to the configured endpoint and
//! reads the relay's message id back from `id` or `message_id`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use sn_core::services::otp::EmailSender;
use sn_shared::config::EmailConfig;
use sn_shared::utils::email::mask_email;

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
pub(crate) struct OutgoingEmail<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub subject: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
    #[serde(default, alias = "message_id")]
    id: Option<String>,
}

pub struct HttpEmailSender {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    from_address: String,
}

impl HttpEmailSender {
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let api_url = config
            .api_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| InfrastructureError::Config("EMAIL_API_URL not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_url,
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
        })
    }

    async fn post(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError> {
        let payload = OutgoingEmail {
            from: &self.from_address,
            to,
            subject,
            text: body,
        };

        let mut request = self.client.post(&self.api_url).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Email(format!(
                "relay returned {}: {}",
                status, text
            )));
        }

        // Relays that return no body still count as accepted
        let text = response.text().await.unwrap_or_default();
        let message_id = serde_json::from_str::<RelayResponse>(&text)
            .ok()
            .and_then(|r| r.id)
            .unwrap_or_else(|| format!("http_{}", uuid::Uuid::new_v4()));
        Ok(message_id)
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        match self.post(to, subject, body).await {
            Ok(message_id) => {
                info!(
                    event = "email_sent",
                    provider = "http",
                    to = %mask_email(to),
                    message_id = %message_id,
                    "Email accepted by relay"
                );
                Ok(message_id)
            }
            Err(e) => {
                error!(to = %mask_email(to), "Failed to send email: {}", e);
                Err(e.to_string())
            }
        }
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}
