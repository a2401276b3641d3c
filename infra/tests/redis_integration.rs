//! Integration tests for the Redis credential store
//!
//! These tests require Redis to be running locally on port 6379.
//! Run with: cargo test --test redis_integration -- --ignored

use std::sync::Arc;
use std::time::Duration;

use sn_core::services::otp::CredentialStore;
use sn_infra::cache::{RedisClient, RedisCredentialStore};
use sn_shared::config::CacheConfig;

async fn store() -> RedisCredentialStore {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let config = CacheConfig::new(url).with_prefix(format!("sn_test_{}", rand::random::<u32>()));
    let client = RedisClient::new(config)
        .await
        .expect("Failed to create Redis client");
    RedisCredentialStore::new(client)
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_set_get_delete() {
    let store = store().await;

    store.set("otp:a@example.com:verify", "123456", Duration::from_secs(60)).await.unwrap();
    assert_eq!(
        store.get("otp:a@example.com:verify").await.unwrap().as_deref(),
        Some("123456")
    );

    store.delete("otp:a@example.com:verify").await.unwrap();
    assert_eq!(store.get("otp:a@example.com:verify").await.unwrap(), None);
    store.delete("otp:a@example.com:verify").await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_set_resets_ttl() {
    let store = store().await;

    store.set("k", "1", Duration::from_secs(600)).await.unwrap();
    store.set("k", "2", Duration::from_secs(5)).await.unwrap();

    let ttl = store.client().ttl("k").await.unwrap().unwrap();
    assert!(ttl <= Duration::from_secs(5));
    store.delete("k").await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_value_expires() {
    let store = store().await;

    store.set("short", "1", Duration::from_millis(200)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(store.get("short").await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_compare_and_delete() {
    let store = store().await;
    store.set("cad", "123456", Duration::from_secs(60)).await.unwrap();

    assert!(!store.delete_if_equals("cad", "000000").await.unwrap());
    assert!(store.get("cad").await.unwrap().is_some());
    assert!(store.delete_if_equals("cad", "123456").await.unwrap());
    assert!(!store.delete_if_equals("cad", "123456").await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_concurrent_compare_and_delete_has_one_winner() {
    let store = Arc::new(store().await);
    store.set("race", "654321", Duration::from_secs(60)).await.unwrap();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.delete_if_equals("race", "654321").await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_ping() {
    let store = store().await;
    assert!(store.ping().await.is_ok());
}
