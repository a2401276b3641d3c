//! Database module - user directory implementations
//!
//! - Connection pool management (MySQL via SQLx)
//! - MySQL-backed user directory
//! - In-memory user directory for development and tests

pub mod connection;
pub mod memory;
pub mod mysql;


use std::sync::Arc;

use sn_core::repositories::UserDirectory;
use sn_shared::config::DatabaseConfig;

use crate::InfrastructureError;

pub use connection::DatabasePool;
pub use memory::InMemoryUserDirectory;
pub use mysql::MySqlUserDirectory;

/// MySQL when `DATABASE_URL` is configured, otherwise an empty in-memory directory
pub async fn create_user_directory(
    config: &DatabaseConfig,
) -> Result<Arc<dyn UserDirectory>, InfrastructureError> {
    if config.url.is_none() {
        tracing::warn!("DATABASE_URL not set; using in-memory user directory");
        return Ok(Arc::new(InMemoryUserDirectory::new()));
    }
    let pool = DatabasePool::new(config.clone()).await?;
    Ok(Arc::new(MySqlUserDirectory::new(pool.get_pool().clone())))
}
