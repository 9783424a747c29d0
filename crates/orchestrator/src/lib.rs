//! Transaction orchestration for the transaction service.
//!
//! Creating a transaction runs three steps in order:
//! 1. Validate: resolve the customer, then the product, in their services
//! 2. Price: `quantity * product.price`
//! 3. Persist: insert durably, then write the record through to the cache
//!
//! Lookups read the cache first and fall back to the durable store,
//! backfilling the cache on a miss.
//!
//! There is no distributed transaction: a failure after the durable insert
//! is not compensated.

pub mod cache_aside;
pub mod error;
pub mod options;
pub mod service;
pub mod timeout;
pub mod validator;

pub use error::{OrchestratorError, Result};
pub use options::{CacheWritePolicy, OrchestratorOptions, Timeouts};
pub use service::{DynOrchestrator, TransactionOrchestrator};
pub use timeout::Timed;
pub use validator::Validator;
