//! Redis-backed credential store

use std::time::Duration;

use async_trait::async_trait;

use sn_core::services::otp::CredentialStore;

use super::redis_client::RedisClient;

/// Passcode challenges in Redis. Expiry is Redis' own TTL, and
/// compare-and-delete runs as a single Lua script.
#[derive(Clone)]
pub struct RedisCredentialStore {
    client: RedisClient,
}

impl RedisCredentialStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl CredentialStore for RedisCredentialStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), String> {
        self.client
            .set_with_expiry(key, value, ttl)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.client.get(key).await.map_err(|e| e.to_string())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.client
            .delete(key)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool, String> {
        self.client
            .compare_and_delete(key, expected)
            .await
            .map_err(|e| e.to_string())
    }

    async fn ping(&self) -> Result<(), String> {
        match self.client.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("unexpected PING response".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}
