//! Application wired to in-memory adapters

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use sn_api::AppState;
use sn_core::domain::entities::user::User;
use sn_infra::cache::MemoryCredentialStore;
use sn_infra::database::InMemoryUserDirectory;
use sn_infra::email::MockEmailSender;
use sn_infra::sms::MockSmsSender;
use sn_shared::config::{Environment, OtpConfig};

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub users: Arc<InMemoryUserDirectory>,
    pub email: MockEmailSender,
    pub sms: MockSmsSender,
}

impl TestContext {
    pub fn new() -> Self {
        Self::for_environment(Environment::Development)
    }

    pub fn for_environment(environment: Environment) -> Self {
        let users = Arc::new(InMemoryUserDirectory::new());
        let email = MockEmailSender::new();
        let sms = MockSmsSender::new();

        let state = AppState::new(
            Arc::new(MemoryCredentialStore::new()),
            users.clone(),
            Arc::new(email.clone()),
            Arc::new(sms.clone()),
            &OtpConfig::default(),
            environment,
        )
        .expect("default OTP policy is valid");

        Self {
            state: web::Data::new(state),
            users,
            email,
            sms,
        }
    }

    pub async fn add_user(&self, email: Option<&str>, phone: Option<&str>) -> User {
        let user = User::new(email.map(String::from), phone.map(String::from));
        self.users.insert(user.clone()).await;
        user
    }

    /// Code from the most recent email sent to `to`
    pub fn email_code(&self, to: &str) -> String {
        let sent = self.email.last_to(to).expect("no email sent to address");
        extract_code(&sent.body)
    }

    /// Code from the most recent SMS
    pub fn sms_code(&self) -> String {
        let sent = self.sms.messages().pop().expect("no SMS sent");
        extract_code(&sent.body)
    }
}

pub fn extract_code(body: &str) -> String {
    body.split_whitespace()
        .map(|word| word.trim_end_matches('.'))
        .find(|word| word.len() >= 4 && word.chars().all(|c| c.is_ascii_digit()))
        .expect("message carries a code")
        .to_string()
}
