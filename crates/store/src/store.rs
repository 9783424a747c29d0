use std::sync::Arc;

use async_trait::async_trait;
use common::TransactionId;
use domain::{PricedTransaction, Transaction};

use crate::Result;

/// Durable store for transactions.
///
/// The store is the authority for transaction records: it assigns the id and
/// creation timestamp on insert and answers point lookups by id.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Inserts a priced transaction and returns the persisted record,
    /// including the store-assigned `id` and `created_at`.
    async fn insert(&self, transaction: PricedTransaction) -> Result<Transaction>;

    /// Looks up a transaction by id.
    ///
    /// Returns None if no such transaction exists.
    async fn get(&self, id: &TransactionId) -> Result<Option<Transaction>>;

    /// Returns the number of persisted transactions.
    async fn count(&self) -> Result<u64>;
}

#[async_trait]
impl<T: TransactionStore + ?Sized> TransactionStore for Arc<T> {
    async fn insert(&self, transaction: PricedTransaction) -> Result<Transaction> {
        (**self).insert(transaction).await
    }

    async fn get(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        (**self).get(id).await
    }

    async fn count(&self) -> Result<u64> {
        (**self).count().await
    }
}
