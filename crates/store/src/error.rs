use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when interacting with the durable store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row could not be mapped back to a transaction.
    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),

    /// The store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store did not answer within the configured limit.
    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for durable store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur when interacting with the cache store.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A Redis command or connection failed.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// The cache could not be reached.
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// The cache did not answer within the configured limit.
    #[error("Cache operation timed out after {0:?}")]
    Timeout(Duration),
}
