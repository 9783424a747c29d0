//! Transaction record, creation input and cache representation.

mod value_objects;

pub use value_objects::Quantity;

use chrono::{DateTime, Utc};
use common::{CustomerId, ProductId, TransactionId};
use serde::{Deserialize, Serialize};

use crate::{DomainError, Product, compute_total};

/// Prefix of every transaction key in the cache store.
pub const CACHE_KEY_PREFIX: &str = "transaction-";

/// Returns the cache key for a transaction id (`"transaction-" + id`).
pub fn cache_key(id: &TransactionId) -> String {
    format!("{CACHE_KEY_PREFIX}{id}")
}

/// A persisted transaction.
///
/// `id` and `created_at` are assigned by the durable store; `total_price`
/// is fixed at creation time and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "transaction_id")]
    pub id: TransactionId,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Returns the key this transaction is cached under.
    pub fn cache_key(&self) -> String {
        cache_key(&self.id)
    }

    /// Serializes the record into the JSON payload stored in the cache.
    pub fn to_cache_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decodes a cache payload written by [`Transaction::to_cache_payload`].
    pub fn from_cache_payload(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}

/// Validated input for creating a transaction, before pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: Quantity,
}

impl NewTransaction {
    /// Validates caller input.
    ///
    /// Blank ids and quantities outside `1..=Quantity::MAX` are rejected.
    pub fn new(
        customer_id: impl Into<CustomerId>,
        product_id: impl Into<ProductId>,
        quantity: i64,
    ) -> Result<Self, DomainError> {
        let customer_id = customer_id.into();
        if customer_id.is_blank() {
            return Err(DomainError::CustomerIdRequired);
        }

        let product_id = product_id.into();
        if product_id.is_blank() {
            return Err(DomainError::ProductIdRequired);
        }

        Ok(Self {
            customer_id,
            product_id,
            quantity: Quantity::new(quantity)?,
        })
    }

    /// Prices the transaction against the product observed during validation.
    pub fn price(self, product: &Product) -> Result<PricedTransaction, DomainError> {
        let total_price = compute_total(product, self.quantity)?;
        Ok(PricedTransaction {
            customer_id: self.customer_id,
            product_id: self.product_id,
            quantity: self.quantity,
            total_price,
        })
    }
}

/// A validated, priced transaction ready to be inserted into the durable store.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedTransaction {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub total_price: f64,
}

impl PricedTransaction {
    /// Completes the record with the store-assigned id and timestamp.
    pub fn into_transaction(self, id: TransactionId, created_at: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            customer_id: self.customer_id,
            product_id: self.product_id,
            quantity: self.quantity,
            total_price: self.total_price,
            created_at,
        }
    }
}
