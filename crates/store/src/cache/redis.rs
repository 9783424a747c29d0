use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use super::TransactionCache;
use crate::CacheError;

/// Redis-backed cache.
///
/// Uses a [`ConnectionManager`], which multiplexes commands over a single
/// connection and reconnects transparently after failures.
#[derive(Clone)]
pub struct RedisTransactionCache {
    connection: ConnectionManager,
}

impl RedisTransactionCache {
    /// Connects to the Redis server at `url` (e.g. `redis://127.0.0.1:6379`).
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    /// Wraps an existing connection manager.
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl TransactionCache for RedisTransactionCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.connection.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, payload: Vec<u8>) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        let _: () = conn.set(key, payload).await?;
        Ok(())
    }
}
