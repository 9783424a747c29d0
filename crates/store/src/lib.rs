//! Persistence adapters for the transaction service.
//!
//! - [`TransactionStore`]: the durable store (PostgreSQL in production)
//! - [`TransactionCache`]: the key-value cache (Redis in production)
//!
//! Both come with in-memory implementations for tests.

pub mod cache;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use cache::{InMemoryTransactionCache, RedisTransactionCache, TransactionCache};
pub use error::{CacheError, Result, StoreError};
pub use memory::InMemoryTransactionStore;
pub use postgres::PostgresTransactionStore;
pub use store::TransactionStore;
