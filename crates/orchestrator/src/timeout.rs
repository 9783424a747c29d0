//! Bounded waits around every outbound call.
//!
//! [`Timed`] wraps a collaborator and implements the same trait, failing the
//! call with the collaborator's own timeout error once the limit elapses.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use catalog::{CustomerDirectory, LookupError, ProductCatalog};
use common::{CustomerId, ProductId, TransactionId};
use domain::{Customer, PricedTransaction, Product, Transaction};
use store::{CacheError, StoreError, TransactionCache, TransactionStore};

/// A collaborator whose calls are bounded by `limit`.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    inner: T,
    limit: Duration,
}

impl<T> Timed<T> {
    pub fn new(inner: T, limit: Duration) -> Self {
        Self { inner, limit }
    }

    /// Returns the wrapped collaborator.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    async fn bounded<R, E>(
        &self,
        call: impl Future<Output = Result<R, E>>,
        on_elapsed: impl FnOnce(Duration) -> E,
    ) -> Result<R, E> {
        match tokio::time::timeout(self.limit, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(limit = ?self.limit, "outbound call timed out");
                Err(on_elapsed(self.limit))
            }
        }
    }
}

#[async_trait]
impl<T: TransactionStore> TransactionStore for Timed<T> {
    async fn insert(&self, transaction: PricedTransaction) -> store::Result<Transaction> {
        self.bounded(self.inner.insert(transaction), StoreError::Timeout)
            .await
    }

    async fn get(&self, id: &TransactionId) -> store::Result<Option<Transaction>> {
        self.bounded(self.inner.get(id), StoreError::Timeout).await
    }

    async fn count(&self) -> store::Result<u64> {
        self.bounded(self.inner.count(), StoreError::Timeout).await
    }
}

#[async_trait]
impl<T: TransactionCache> TransactionCache for Timed<T> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.bounded(self.inner.get(key), CacheError::Timeout).await
    }

    async fn set(&self, key: &str, payload: Vec<u8>) -> Result<(), CacheError> {
        self.bounded(self.inner.set(key, payload), CacheError::Timeout)
            .await
    }
}

#[async_trait]
impl<T: CustomerDirectory> CustomerDirectory for Timed<T> {
    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, LookupError> {
        self.bounded(self.inner.get_customer(id), |after| LookupError::Timeout {
            entity: catalog::customer::ENTITY,
            after,
        })
        .await
    }
}

#[async_trait]
impl<T: ProductCatalog> ProductCatalog for Timed<T> {
    async fn get_product(&self, id: &ProductId) -> Result<Product, LookupError> {
        self.bounded(self.inner.get_product(id), |after| LookupError::Timeout {
            entity: catalog::product::ENTITY,
            after,
        })
        .await
    }
}
