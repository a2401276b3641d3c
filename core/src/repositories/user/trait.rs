//! User directory trait: the slice of user persistence the passcode
//! subsystem consumes.
//!
//! Account CRUD lives elsewhere; implementations only need to look users
//! up by their identifiers and apply partial field updates.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::{User, UserFieldUpdate};
use crate::errors::DomainError;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by canonical (trimmed, lower-cased) email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user has this email
    /// * `Err(DomainError)` - Backend failure
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by E.164 phone number
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Apply `update` to the user and bump `updated_at`
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No user with this id
    /// * `Err(DomainError::Conflict)` - The new email belongs to someone else
    async fn update_fields(&self, id: Uuid, update: &UserFieldUpdate) -> Result<(), DomainError>;

    /// Round-trip to the backing store, for readiness checks
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
