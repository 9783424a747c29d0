//! Transaction create and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::TransactionId;
use domain::{DomainError, NewTransaction, Transaction};
use orchestrator::DynOrchestrator;
use serde::Deserialize;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub orchestrator: DynOrchestrator,
}

/// Body of `POST /transaction`.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error rather than a decode failure.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub customer_id: Option<String>,
    pub product_id: Option<String>,
    #[serde(alias = "qty")]
    pub quantity: Option<i64>,
}

impl CreateTransactionRequest {
    fn into_new_transaction(self) -> Result<NewTransaction, DomainError> {
        let customer_id = self.customer_id.ok_or(DomainError::CustomerIdRequired)?;
        let product_id = self.product_id.ok_or(DomainError::ProductIdRequired)?;
        let quantity = self.quantity.ok_or(DomainError::QuantityRequired)?;
        NewTransaction::new(customer_id, product_id, quantity)
    }
}

/// POST /transaction
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let Json(request) = payload?;
    let new_transaction = request.into_new_transaction()?;

    let record = state.orchestrator.create_transaction(new_transaction).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /transaction/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    let record = state
        .orchestrator
        .get_transaction(&TransactionId::new(id))
        .await?;
    Ok(Json(record))
}

/// GET /transaction/ with no id segment.
pub async fn missing_id() -> ApiError {
    DomainError::TransactionIdRequired.into()
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
