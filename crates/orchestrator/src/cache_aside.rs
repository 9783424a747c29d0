//! Cache-aside persistence policy.
//!
//! Written only against the [`TransactionStore`] and [`TransactionCache`]
//! capabilities so it can be exercised without a database or Redis.
//!
//! - Creation is write-through: insert durably, then mirror the persisted
//!   record into the cache.
//! - Lookup is read-through: serve from the cache when possible, otherwise
//!   read the durable store and backfill the cache.
//!
//! The durable write and the cache write are independent steps. A cache
//! failure after a successful durable write is never rolled back; the
//! [`CacheWritePolicy`] only decides whether the caller sees it.

use common::TransactionId;
use domain::{PricedTransaction, Transaction, cache_key};
use store::{TransactionCache, TransactionStore};

use crate::error::{OrchestratorError, Result};
use crate::options::CacheWritePolicy;

/// Persists a priced transaction and writes the persisted record to the cache.
pub async fn write_through<S, C>(
    store: &S,
    cache: &C,
    transaction: PricedTransaction,
    policy: CacheWritePolicy,
) -> Result<Transaction>
where
    S: TransactionStore + ?Sized,
    C: TransactionCache + ?Sized,
{
    let record = store.insert(transaction).await?;
    tracing::debug!(transaction_id = %record.id, "transaction persisted");

    cache_record(cache, &record, policy).await?;
    Ok(record)
}

/// Looks up a transaction, preferring the cache.
///
/// Returns `Ok(None)` when neither the cache nor the durable store knows the id.
pub async fn read_through<S, C>(
    store: &S,
    cache: &C,
    id: &TransactionId,
    policy: CacheWritePolicy,
) -> Result<Option<Transaction>>
where
    S: TransactionStore + ?Sized,
    C: TransactionCache + ?Sized,
{
    let key = cache_key(id);

    match cache.get(&key).await {
        Ok(Some(payload)) if !payload.is_empty() => {
            match Transaction::from_cache_payload(&payload) {
                Ok(record) => {
                    metrics::counter!("transaction_cache_hits_total").increment(1);
                    tracing::debug!(%key, "cache hit");
                    return Ok(Some(record));
                }
                Err(e) => {
                    // Overwritten by the backfill below.
                    tracing::warn!(%key, error = %e, "discarding undecodable cache entry");
                }
            }
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(%key, error = %e, "cache read failed, falling back to store");
        }
    }

    metrics::counter!("transaction_cache_misses_total").increment(1);

    let Some(record) = store.get(id).await? else {
        return Ok(None);
    };

    cache_record(cache, &record, policy).await?;
    Ok(Some(record))
}

async fn cache_record<C>(cache: &C, record: &Transaction, policy: CacheWritePolicy) -> Result<()>
where
    C: TransactionCache + ?Sized,
{
    let key = record.cache_key();
    let payload = record.to_cache_payload()?;

    match cache.set(&key, payload).await {
        Ok(()) => Ok(()),
        Err(e) => {
            metrics::counter!("transaction_cache_write_failures_total").increment(1);
            match policy {
                CacheWritePolicy::Strict => {
                    tracing::error!(%key, error = %e, "cache write failed");
                    Err(OrchestratorError::Cache(e))
                }
                CacheWritePolicy::BestEffort => {
                    tracing::warn!(%key, error = %e, "cache write failed, record remains in store");
                    Ok(())
                }
            }
        }
    }
}
