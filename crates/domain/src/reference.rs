//! Read-only projections of the customer and product services.
//!
//! These records are owned by their respective services; the transaction
//! service only reads them during validation and pricing.

use common::{CustomerId, ProductId};
use serde::{Deserialize, Serialize};

/// A customer as returned by `GET /customer/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Customer {
    pub fn new(customer_id: impl Into<CustomerId>, name: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// A product as returned by `GET /product/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price used for pricing new transactions.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl Product {
    pub fn new(product_id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            stock: None,
        }
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_decodes_service_payload() {
        let json = r#"{"customer_id":"C1","name":"Alice","email":"alice@example.com"}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.customer_id.as_str(), "C1");
        assert_eq!(customer.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn customer_email_is_optional() {
        let customer: Customer = serde_json::from_str(r#"{"customer_id":"C1","name":"A"}"#).unwrap();
        assert!(customer.email.is_none());
    }

    #[test]
    fn product_decodes_service_payload() {
        let json = r#"{"product_id":"P1","name":"Widget","price":10.5,"stock":7}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, 10.5);
        assert_eq!(product.stock, Some(7));
    }

    #[test]
    fn product_without_price_is_rejected() {
        let result: Result<Product, _> =
            serde_json::from_str(r#"{"product_id":"P1","name":"Widget"}"#);
        assert!(result.is_err());
    }
}
