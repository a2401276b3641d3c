//! Redis cache client implementation
//!
//! Wraps a multiplexed async connection with the handful of commands the
//! credential store needs. Connection establishment is retried with
//! exponential backoff; individual commands are not.

use once_cell::sync::Lazy;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client, Script};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use sn_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Deletes KEYS[1] only while it still holds ARGV[1]; returns 1 if deleted
static COMPARE_AND_DELETE: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r#"
        if redis.call('GET', KEYS[1]) == ARGV[1] then
            return redis.call('DEL', KEYS[1])
        end
        return 0
        "#,
    )
});

/// Base delay before the first reconnect attempt
const RETRY_DELAY_MS: u64 = 100;

/// Redis cache client
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Connect using `config.url`, retrying up to `config.connect_retries` times
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(client, config.connect_retries.max(1)).await?;

        info!("Redis client created successfully");
        Ok(Self { connection, config })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = RETRY_DELAY_MS;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Prefixed key as stored in Redis
    pub fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    /// SET with a millisecond expiry, replacing any previous value and TTL
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), InfrastructureError> {
        let mut conn = self.connection.clone();
        let millis = ttl.as_millis().max(1) as u64;
        debug!(key = key, ttl_ms = millis, "Setting key with expiry");

        redis::cmd("SET")
            .arg(self.key(key))
            .arg(value)
            .arg("PX")
            .arg(millis)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| {
                error!(key = key, "Failed to set key: {}", e);
                InfrastructureError::Cache(e)
            })
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let mut conn = self.connection.clone();
        conn.get::<_, Option<String>>(self.key(key)).await.map_err(|e| {
            error!(key = key, "Failed to get key: {}", e);
            InfrastructureError::Cache(e)
        })
    }

    /// Returns whether a key was removed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let deleted = conn.del::<_, u32>(self.key(key)).await.map_err(|e| {
            error!(key = key, "Failed to delete key: {}", e);
            InfrastructureError::Cache(e)
        })?;
        Ok(deleted > 0)
    }

    /// Atomically delete `key` if its value equals `expected`
    pub async fn compare_and_delete(
        &self,
        key: &str,
        expected: &str,
    ) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let deleted: i64 = COMPARE_AND_DELETE
            .key(self.key(key))
            .arg(expected)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| {
                error!(key = key, "Compare-and-delete failed: {}", e);
                InfrastructureError::Cache(e)
            })?;
        Ok(deleted == 1)
    }

    /// Remaining TTL; `None` if the key is missing or has no expiry
    pub async fn ttl(&self, key: &str) -> Result<Option<Duration>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let millis: i64 = redis::cmd("PTTL")
            .arg(self.key(key))
            .query_async(&mut conn)
            .await
            .map_err(InfrastructureError::Cache)?;
        Ok((millis >= 0).then(|| Duration::from_millis(millis as u64)))
    }

    /// PING the server
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        match redis::cmd("PING").query_async::<_, String>(&mut conn).await {
            Ok(response) if response == "PONG" => Ok(true),
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
