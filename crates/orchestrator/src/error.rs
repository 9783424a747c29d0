//! Orchestrator error types.

use catalog::LookupError;
use common::TransactionId;
use domain::DomainError;
use store::{CacheError, StoreError};
use thiserror::Error;

/// Errors that can occur while creating or looking up a transaction.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Caller input failed validation.
    #[error("Invalid request: {0}")]
    InvalidInput(#[from] DomainError),

    /// The customer service reported the customer as absent.
    #[error("Customer not found: {0}")]
    CustomerNotFound(LookupError),

    /// The product service reported the product as absent.
    #[error("Product not found: {0}")]
    ProductNotFound(LookupError),

    /// The customer service could not be asked.
    #[error("Customer lookup failed: {0}")]
    CustomerLookup(LookupError),

    /// The product service could not be asked.
    #[error("Product lookup failed: {0}")]
    ProductLookup(LookupError),

    /// No transaction with this id exists in the cache or the durable store.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Durable store error.
    #[error("Transaction store error: {0}")]
    Store(#[from] StoreError),

    /// Cache store error.
    #[error("Failed to cache transaction: {0}")]
    Cache(#[from] CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OrchestratorError {
    pub(crate) fn customer_lookup(err: LookupError) -> Self {
        if err.is_not_found() {
            OrchestratorError::CustomerNotFound(err)
        } else {
            OrchestratorError::CustomerLookup(err)
        }
    }

    pub(crate) fn product_lookup(err: LookupError) -> Self {
        if err.is_not_found() {
            OrchestratorError::ProductNotFound(err)
        } else {
            OrchestratorError::ProductLookup(err)
        }
    }

    /// Returns true if a caller-supplied id does not resolve in a collaborator.
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            OrchestratorError::CustomerNotFound(_) | OrchestratorError::ProductNotFound(_)
        )
    }
}

/// Convenience type alias for orchestrator results.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
