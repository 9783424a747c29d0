//! HTTP route handlers.

pub mod system;
pub mod transactions;
