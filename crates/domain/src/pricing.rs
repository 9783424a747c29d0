//! Pricing rule for new transactions.

use crate::{DomainError, Product, Quantity};

/// Computes the total price of `quantity` units of `product`.
///
/// Plain floating-point multiplication; no rounding is applied. Fails when
/// the product is not finite, which JSON cannot carry.
pub fn compute_total(product: &Product, quantity: Quantity) -> Result<f64, DomainError> {
    let total = product.price * quantity.as_f64();
    if !total.is_finite() {
        return Err(DomainError::TotalOutOfRange {
            product_id: product.product_id.to_string(),
            quantity: quantity.get(),
        });
    }
    Ok(total)
}
