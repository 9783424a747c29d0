//! Shared identifier types used across the transaction service crates.

pub mod types;

pub use types::{CustomerId, ProductId, TransactionId};
