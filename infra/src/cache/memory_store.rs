//! Process-local credential store

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use sn_core::services::otp::CredentialStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Minimum time between sweeps of expired entries triggered by `set`
const SWEEP_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
struct Entries {
    map: HashMap<String, Entry>,
    last_sweep: Instant,
}

impl Entries {
    fn sweep(&mut self, now: Instant) -> usize {
        let before = self.map.len();
        self.map.retain(|_, entry| entry.is_live(now));
        self.last_sweep = now;
        before - self.map.len()
    }
}

/// In-memory store with lazy expiry. Reads ignore expired entries; writes
/// sweep them out at most once per `SWEEP_INTERVAL`. Every operation takes
/// the lock once, which makes compare-and-delete atomic per key.
#[derive(Debug)]
pub struct MemoryCredentialStore {
    entries: RwLock<Entries>,
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Entries {
                map: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .map
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Entries held, expired or not
    pub async fn resident(&self) -> usize {
        self.entries.read().await.map.len()
    }

    /// Drop expired entries, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        self.entries.write().await.sweep(Instant::now())
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), String> {
        let now = Instant::now();
        let entry = Entry {
            value: value.to_string(),
            expires_at: now + ttl,
        };
        let mut entries = self.entries.write().await;
        if now.duration_since(entries.last_sweep) >= SWEEP_INTERVAL {
            let removed = entries.sweep(now);
            if removed > 0 {
                tracing::debug!(removed = removed, event = "memory_store_swept", "Dropped expired entries");
            }
        }
        entries.map.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .map
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.entries.write().await.map.remove(key);
        Ok(())
    }

    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool, String> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let matches = entries
            .map
            .get(key)
            .map(|entry| entry.is_live(now) && entry.value == expected)
            .unwrap_or(false);
        if matches {
            entries.map.remove(key);
        }
        Ok(matches)
    }
}
