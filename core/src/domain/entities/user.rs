//! User entity as seen by the passcode subsystem.
//!
//! Accounts are owned by the user directory; this subsystem only reads
//! them and flips verification flags or swaps the email address.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    pub email: Option<String>,

    /// E.164 phone number
    pub phone: Option<String>,

    pub email_verified: bool,

    pub phone_verified: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: Option<String>, phone: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            phone,
            email_verified: false,
            phone_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a field update in place, bumping `updated_at`
    pub fn apply(&mut self, update: &UserFieldUpdate) {
        if let Some(email) = &update.email {
            self.email = Some(email.clone());
        }
        if let Some(verified) = update.email_verified {
            self.email_verified = verified;
        }
        if let Some(verified) = update.phone_verified {
            self.phone_verified = verified;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update of the fields this subsystem is allowed to write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFieldUpdate {
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub phone_verified: Option<bool>,
}

impl UserFieldUpdate {
    pub fn email_verified() -> Self {
        Self {
            email_verified: Some(true),
            ..Default::default()
        }
    }

    pub fn phone_verified() -> Self {
        Self {
            phone_verified: Some(true),
            ..Default::default()
        }
    }

    /// New address, verified by the code that was sent to it
    pub fn verified_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            email_verified: Some(true),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.email_verified.is_none() && self.phone_verified.is_none()
    }
}
