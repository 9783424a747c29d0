//! Lookup error types.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by the customer and product lookups.
///
/// `NotFound` means the service answered and the entity is definitely
/// absent. Every other variant means existence could not be determined.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The service reported that the entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The service could not be reached or answered with an unexpected status.
    #[error("{entity} service unavailable: {reason}")]
    Unavailable { entity: &'static str, reason: String },

    /// The service did not answer within the configured limit.
    #[error("{entity} service timed out after {after:?}")]
    Timeout { entity: &'static str, after: Duration },

    /// The service answered with a body that could not be decoded.
    #[error("{entity} service returned an invalid response: {reason}")]
    InvalidResponse { entity: &'static str, reason: String },

    /// The client was configured with an unusable base URL.
    #[error("Invalid lookup client configuration: {0}")]
    Configuration(String),
}

impl LookupError {
    /// Returns true if the entity is definitely absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }
}
