//! Key-value cache holding serialized transactions.

mod memory;
mod redis;

pub use self::memory::InMemoryTransactionCache;
pub use self::redis::RedisTransactionCache;

use std::sync::Arc;

use async_trait::async_trait;

use crate::CacheError;

/// Key-value cache with opaque byte payloads.
///
/// No expiry semantics are assumed: an entry stays until it is overwritten
/// or evicted by the backing store.
#[async_trait]
pub trait TransactionCache: Send + Sync {
    /// Reads the payload stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `payload` under `key`, replacing any previous value.
    async fn set(&self, key: &str, payload: Vec<u8>) -> Result<(), CacheError>;
}

#[async_trait]
impl<T: TransactionCache + ?Sized> TransactionCache for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, payload: Vec<u8>) -> Result<(), CacheError> {
        (**self).set(key, payload).await
    }
}
