//! Domain error types.

use thiserror::Error;

/// Errors raised while validating caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The customer id is missing or blank.
    #[error("customer_id is required")]
    CustomerIdRequired,

    /// The product id is missing or blank.
    #[error("product_id is required")]
    ProductIdRequired,

    /// The quantity is missing.
    #[error("quantity is required")]
    QuantityRequired,

    /// The quantity is zero, negative or too large to store.
    #[error("Invalid quantity: {quantity} (must be between 1 and {max})")]
    InvalidQuantity { quantity: i64, max: i32 },

    /// Price times quantity is not a finite number.
    #[error("Total price out of range for {quantity} x {product_id}")]
    TotalOutOfRange { product_id: String, quantity: i32 },

    /// The transaction id path parameter is missing or blank.
    #[error("Missing id parameter")]
    TransactionIdRequired,
}
