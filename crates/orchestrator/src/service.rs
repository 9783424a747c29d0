//! Transaction orchestrator: the creation and lookup flows.

use std::sync::Arc;

use catalog::{CustomerDirectory, ProductCatalog};
use common::TransactionId;
use domain::{DomainError, NewTransaction, Transaction};
use store::{TransactionCache, TransactionStore};

use crate::cache_aside;
use crate::error::{OrchestratorError, Result};
use crate::options::{CacheWritePolicy, OrchestratorOptions};
use crate::timeout::Timed;
use crate::validator::Validator;

/// Orchestrator over type-erased collaborators, as held by the HTTP layer.
pub type DynOrchestrator = TransactionOrchestrator<
    Arc<dyn TransactionStore>,
    Arc<dyn TransactionCache>,
    Arc<dyn CustomerDirectory>,
    Arc<dyn ProductCatalog>,
>;

/// Creates and looks up transactions.
///
/// Creation validates the customer, then the product, prices the request
/// and writes it through to the durable store and the cache. There is no
/// compensation: once the durable insert succeeded the row stays, whatever
/// happens to the cache write.
///
/// Every collaborator call is bounded by the configured timeouts.
pub struct TransactionOrchestrator<S, C, Cu, P> {
    store: Timed<S>,
    cache: Timed<C>,
    validator: Validator<Timed<Cu>, Timed<P>>,
    cache_write_policy: CacheWritePolicy,
}

impl<S, C, Cu, P> TransactionOrchestrator<S, C, Cu, P>
where
    S: TransactionStore,
    C: TransactionCache,
    Cu: CustomerDirectory,
    P: ProductCatalog,
{
    /// Creates a new orchestrator.
    pub fn new(store: S, cache: C, customers: Cu, products: P, options: OrchestratorOptions) -> Self {
        let timeouts = options.timeouts;
        Self {
            store: Timed::new(store, timeouts.store),
            cache: Timed::new(cache, timeouts.cache),
            validator: Validator::new(
                Timed::new(customers, timeouts.lookup),
                Timed::new(products, timeouts.lookup),
            ),
            cache_write_policy: options.cache_write_policy,
        }
    }

    /// Creates a transaction.
    ///
    /// Nothing is written unless both the customer and the product resolve.
    #[tracing::instrument(
        skip(self, request),
        fields(
            customer_id = %request.customer_id,
            product_id = %request.product_id,
            quantity = %request.quantity
        )
    )]
    pub async fn create_transaction(&self, request: NewTransaction) -> Result<Transaction> {
        let start = std::time::Instant::now();

        let (_customer, product) = self
            .validator
            .validate(&request.customer_id, &request.product_id)
            .await?;

        let priced = request.price(&product)?;
        let record =
            cache_aside::write_through(&self.store, &self.cache, priced, self.cache_write_policy)
                .await?;

        metrics::counter!("transactions_created_total").increment(1);
        metrics::histogram!("transaction_create_duration_seconds")
            .record(start.elapsed().as_secs_f64());
        tracing::info!(
            transaction_id = %record.id,
            total_price = record.total_price,
            "transaction created"
        );

        Ok(record)
    }

    /// Looks up a transaction by id, from the cache when possible.
    #[tracing::instrument(skip(self))]
    pub async fn get_transaction(&self, id: &TransactionId) -> Result<Transaction> {
        if id.is_blank() {
            return Err(DomainError::TransactionIdRequired.into());
        }

        cache_aside::read_through(&self.store, &self.cache, id, self.cache_write_policy)
            .await?
            .ok_or_else(|| OrchestratorError::TransactionNotFound(id.clone()))
    }
}
