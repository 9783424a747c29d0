//! Lookup clients for the services that own customers and products.
//!
//! The transaction service never writes to these services; it only asks
//! whether an id exists and, for products, what the unit price is.
//!
//! - [`CustomerDirectory`] / [`ProductCatalog`]: lookup traits
//! - [`HttpCustomerDirectory`] / [`HttpProductCatalog`]: HTTP clients
//! - In-memory implementations with failure injection for tests

pub mod customer;
pub mod error;
pub mod http;
pub mod product;

pub use customer::{CustomerDirectory, InMemoryCustomerDirectory};
pub use error::LookupError;
pub use http::{HttpCustomerDirectory, HttpLookupClient, HttpProductCatalog};
pub use product::{InMemoryProductCatalog, ProductCatalog};
