use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::TransactionCache;
use crate::CacheError;

/// In-memory cache implementation for testing.
///
/// Supports failure injection for reads and writes, direct eviction and
/// call counters so tests can observe which path a request took.
#[derive(Clone, Default)]
pub struct InMemoryTransactionCache {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    fail_on_get: Arc<AtomicBool>,
    fail_on_set: Arc<AtomicBool>,
    gets: Arc<AtomicUsize>,
    sets: Arc<AtomicUsize>,
}

impl InMemoryTransactionCache {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures reads to fail.
    pub fn set_fail_on_get(&self, fail: bool) {
        self.fail_on_get.store(fail, Ordering::SeqCst);
    }

    /// Configures writes to fail.
    pub fn set_fail_on_set(&self, fail: bool) {
        self.fail_on_set.store(fail, Ordering::SeqCst);
    }

    /// Removes an entry, simulating eviction by the backing store.
    pub async fn evict(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.write().await.remove(key)
    }

    /// Writes a raw payload, bypassing failure injection.
    pub async fn put_raw(&self, key: &str, payload: Vec<u8>) {
        self.entries.write().await.insert(key.to_string(), payload);
    }

    /// Reads a raw payload, bypassing failure injection and counters.
    pub async fn peek(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().await.get(key).cloned()
    }

    /// Returns true if nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Number of `get` calls served so far.
    pub fn get_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `set` calls served so far.
    pub fn set_calls(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionCache for InMemoryTransactionCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_get.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("cache read failed".to_string()));
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, payload: Vec<u8>) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_set.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("cache write failed".to_string()));
        }
        self.entries.write().await.insert(key.to_string(), payload);
        Ok(())
    }
}
