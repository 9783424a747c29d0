//! Cross-service validation of the ids on a creation request.

use catalog::{CustomerDirectory, ProductCatalog};
use common::{CustomerId, ProductId};
use domain::{Customer, Product};

use crate::error::{OrchestratorError, Result};

/// Resolves the customer and product of a request against their services.
///
/// The customer is always checked first; if it fails the product service is
/// never called.
pub struct Validator<C, P> {
    customers: C,
    products: P,
}

impl<C, P> Validator<C, P>
where
    C: CustomerDirectory,
    P: ProductCatalog,
{
    pub fn new(customers: C, products: P) -> Self {
        Self {
            customers,
            products,
        }
    }

    /// Looks up the customer.
    #[tracing::instrument(skip(self))]
    pub async fn validate_customer(&self, customer_id: &CustomerId) -> Result<Customer> {
        self.customers
            .get_customer(customer_id)
            .await
            .map_err(|e| {
                record_failure("customer", &e);
                OrchestratorError::customer_lookup(e)
            })
    }

    /// Looks up the product, including its unit price.
    #[tracing::instrument(skip(self))]
    pub async fn validate_product(&self, product_id: &ProductId) -> Result<Product> {
        self.products
            .get_product(product_id)
            .await
            .map_err(|e| {
                record_failure("product", &e);
                OrchestratorError::product_lookup(e)
            })
    }

    /// Validates both ids, customer first, stopping at the first failure.
    pub async fn validate(
        &self,
        customer_id: &CustomerId,
        product_id: &ProductId,
    ) -> Result<(Customer, Product)> {
        let customer = self.validate_customer(customer_id).await?;
        let product = self.validate_product(product_id).await?;
        Ok((customer, product))
    }
}

fn record_failure(reference: &'static str, err: &catalog::LookupError) {
    let reason = if err.is_not_found() {
        "not_found"
    } else {
        "unavailable"
    };
    metrics::counter!(
        "transaction_validation_failures_total",
        "reference" => reference,
        "reason" => reason
    )
    .increment(1);
    tracing::info!(reference, error = %err, "validation failed");
}
