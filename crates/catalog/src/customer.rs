//! Customer lookup trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use common::CustomerId;
use domain::Customer;

use crate::error::LookupError;

/// Entity name used in customer lookup errors.
pub const ENTITY: &str = "Customer";

/// Read-only access to the customer service.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// Fetches a customer by id.
    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, LookupError>;
}

#[async_trait]
impl<T: CustomerDirectory + ?Sized> CustomerDirectory for Arc<T> {
    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, LookupError> {
        (**self).get_customer(id).await
    }
}

/// In-memory customer directory for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerDirectory {
    customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
    unavailable: Arc<AtomicBool>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryCustomerDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a customer.
    pub fn insert(&self, customer: Customer) {
        self.customers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(customer.customer_id.clone(), customer);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_customer(self, customer: Customer) -> Self {
        self.insert(customer);
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
impl CustomerDirectory for InMemoryCustomerDirectory {
    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LookupError::Unavailable {
                entity: ENTITY,
                reason: "connection refused".to_string(),
            });
        }

        self.customers
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
