//! Credential stores for passcode challenges
//!
//! Redis backs production deployments; the in-memory store serves local
//! development and tests. Both give per-key atomic compare-and-delete.

pub mod memory_store;
pub mod otp_store;
pub mod redis_client;


use std::sync::Arc;

use sn_core::services::otp::CredentialStore;
use sn_shared::config::{CacheBackend, CacheConfig};

use crate::InfrastructureError;

pub use memory_store::MemoryCredentialStore;
pub use otp_store::RedisCredentialStore;
pub use redis_client::RedisClient;

/// Build the credential store selected by `config.backend`
pub async fn create_credential_store(
    config: &CacheConfig,
) -> Result<Arc<dyn CredentialStore>, InfrastructureError> {
    match config.backend {
        CacheBackend::Redis => {
            let client = RedisClient::new(config.clone()).await?;
            Ok(Arc::new(RedisCredentialStore::new(client)))
        }
        CacheBackend::Memory => {
            tracing::warn!("Using in-memory credential store; challenges are lost on restart");
            Ok(Arc::new(MemoryCredentialStore::new()))
        }
    }
}
