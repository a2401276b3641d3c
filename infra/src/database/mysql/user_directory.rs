//! MySQL implementation of the UserDirectory trait.
//!
//! Expects a `users` table with `id CHAR(36)`, unique nullable `email` and
//! `phone` columns, the two verification flags, and DATETIME timestamps.
//! The `email` column needs a case-insensitive collation (the MySQL
//! default) so lookups match however the address was stored.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use sn_core::domain::entities::user::{User, UserFieldUpdate};
use sn_core::errors::DomainError;
use sn_core::repositories::UserDirectory;

const SELECT_USER: &str = r#"
    SELECT id, email, phone, email_verified, phone_verified, created_at, updated_at
    FROM users
"#;

pub struct MySqlUserDirectory {
    pool: MySqlPool,
}

impl MySqlUserDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database(format!("Failed to get id: {}", e)))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Database(format!("Invalid UUID: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::Database(format!("Failed to get email: {}", e)))?,
            phone: row
                .try_get("phone")
                .map_err(|e| DomainError::Database(format!("Failed to get phone: {}", e)))?,
            email_verified: row
                .try_get("email_verified")
                .map_err(|e| DomainError::Database(format!("Failed to get email_verified: {}", e)))?,
            phone_verified: row
                .try_get("phone_verified")
                .map_err(|e| DomainError::Database(format!("Failed to get phone_verified: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database(format!("Failed to get updated_at: {}", e)))?,
        })
    }

    async fn find_one(&self, column: &str, value: String) -> Result<Option<User>, DomainError> {
        let query = format!("{SELECT_USER} WHERE {column} = ? LIMIT 1");

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    /// Insert a user row; account creation proper belongs to the account
    /// service, this exists for seeding and integration tests.
    pub async fn insert(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, phone, email_verified, phone_verified, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(user.email.clone())
        .bind(user.phone.clone())
        .bind(user.email_verified)
        .bind(user.phone_verified)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;
        Ok(())
    }
}

fn map_write_error(e: sqlx::Error) -> DomainError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::Conflict {
            message: "email or phone already belongs to another user".to_string(),
        },
        _ => DomainError::Database(format!("Database write failed: {}", e)),
    }
}

#[async_trait]
impl UserDirectory for MySqlUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email.to_string()).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        self.find_one("phone", phone.to_string()).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id", id.to_string()).await
    }

    async fn update_fields(&self, id: Uuid, update: &UserFieldUpdate) -> Result<(), DomainError> {
        let mut builder = QueryBuilder::<MySql>::new("UPDATE users SET updated_at = ");
        builder.push_bind(Utc::now());
        if let Some(email) = &update.email {
            builder.push(", email = ").push_bind(email.clone());
        }
        if let Some(verified) = update.email_verified {
            builder.push(", email_verified = ").push_bind(verified);
        }
        if let Some(verified) = update.phone_verified {
            builder.push(", phone_verified = ").push_bind(verified);
        }
        builder.push(" WHERE id = ").push_bind(id.to_string());

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        // MySQL reports matched-but-unchanged rows as unaffected
        if result.rows_affected() == 0 && self.find_by_id(id).await?.is_none() {
            return Err(DomainError::NotFound {
                resource: format!("user {}", id),
            });
        }

        tracing::debug!(user_id = %id, "User fields updated");
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database ping failed: {}", e)))?;
        Ok(())
    }
}
