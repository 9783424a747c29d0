//! Domain layer for the transaction service.
//!
//! This crate provides:
//! - The persisted [`Transaction`] record and its cache representation
//! - [`NewTransaction`], the validated creation input
//! - Read-only [`Customer`] and [`Product`] projections of the lookup services
//! - The pricing rule ([`compute_total`])

pub mod error;
pub mod pricing;
pub mod reference;
pub mod transaction;

pub use common::{CustomerId, ProductId, TransactionId};
pub use error::DomainError;
pub use pricing::compute_total;
pub use reference::{Customer, Product};
pub use transaction::{
    CACHE_KEY_PREFIX, NewTransaction, PricedTransaction, Quantity, Transaction, cache_key,
};
