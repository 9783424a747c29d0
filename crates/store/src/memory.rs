use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use common::TransactionId;
use domain::{PricedTransaction, Transaction};
use tokio::sync::RwLock;

use crate::{Result, StoreError, store::TransactionStore};

/// In-memory transaction store implementation for testing.
///
/// Assigns UUID string ids and microsecond-precision timestamps, the same
/// shape the PostgreSQL implementation produces.
#[derive(Clone, Default)]
pub struct InMemoryTransactionStore {
    records: Arc<RwLock<HashMap<TransactionId, Transaction>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryTransactionStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with [`StoreError::Unavailable`]
    /// until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store switched off".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, transaction: PricedTransaction) -> Result<Transaction> {
        self.check_available()?;

        let id = TransactionId::new(uuid::Uuid::new_v4().to_string());
        let created_at = Utc::now().trunc_subsecs(6);
        let record = transaction.into_transaction(id.clone(), created_at);

        self.records.write().await.insert(id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        self.check_available()?;
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn count(&self) -> Result<u64> {
        self.check_available()?;
        Ok(self.records.read().await.len() as u64)
    }
}
