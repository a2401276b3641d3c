//! Process-local user directory

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use sn_core::domain::entities::user::{User, UserFieldUpdate};
use sn_core::errors::DomainError;
use sn_core::repositories::UserDirectory;
use sn_shared::utils::email::canonical_email;

fn same_email(stored: Option<&str>, wanted: &str) -> bool {
    stored.map_or(false, |email| canonical_email(email) == canonical_email(wanted))
}

/// Users keyed by id. Email and phone lookups scan; fine for the sizes
/// this is meant for. Emails compare case-insensitively, as the MySQL
/// collation does.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| same_email(u.email.as_deref(), email))
            .cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.phone.as_deref() == Some(phone))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn update_fields(&self, id: Uuid, update: &UserFieldUpdate) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        if let Some(email) = &update.email {
            let taken = users
                .values()
                .any(|u| u.id != id && same_email(u.email.as_deref(), email));
            if taken {
                return Err(DomainError::Conflict {
                    message: "email already belongs to another user".to_string(),
                });
            }
        }

        let user = users.get_mut(&id).ok_or_else(|| DomainError::NotFound {
            resource: format!("user {}", id),
        })?;
        user.apply(update);
        Ok(())
    }
}
