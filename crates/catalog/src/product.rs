//! Product lookup trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use common::ProductId;
use domain::Product;

use crate::error::LookupError;

/// Entity name used in product lookup errors.
pub const ENTITY: &str = "Product";

/// Read-only access to the product service.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetches a product, including its unit price, by id.
    async fn get_product(&self, id: &ProductId) -> Result<Product, LookupError>;
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for Arc<T> {
    async fn get_product(&self, id: &ProductId) -> Result<Product, LookupError> {
        (**self).get_product(id).await
    }
}

/// In-memory product catalog for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductCatalog {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    unavailable: Arc<AtomicBool>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryProductCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a product.
    pub fn insert(&self, product: Product) {
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product.product_id.clone(), product);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_product(self, product: Product) -> Self {
        self.insert(product);
        self
    }

    /// Makes lookups fail as if the service were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of lookups served so far, including failed ones.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn get_product(&self, id: &ProductId) -> Result<Product, LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LookupError::Unavailable {
                entity: ENTITY,
                reason: "connection refused".to_string(),
            });
        }

        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })
    }
}
