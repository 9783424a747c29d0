//! HTTP API for the transaction service.
//!
//! Exposes `POST /transaction` and `GET /transaction/{id}` over the
//! [`orchestrator`] crate, plus `/health` and a Prometheus `/metrics`
//! endpoint.

pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use catalog::{CustomerDirectory, HttpCustomerDirectory, HttpProductCatalog, ProductCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use orchestrator::{OrchestratorOptions, TransactionOrchestrator};
use sqlx::postgres::PgPoolOptions;
use store::{PostgresTransactionStore, RedisTransactionCache, TransactionCache, TransactionStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use error::StartupError;
use routes::transactions::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::system::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/transaction", post(routes::transactions::create))
        .route("/transaction/", get(routes::transactions::missing_id))
        .route("/transaction/{id}", get(routes::transactions::get))
        .with_state(state)
        .merge(metrics_router)
        .route_layer(middleware::from_fn(telemetry::track_metrics))
        .fallback(routes::transactions::not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wraps arbitrary collaborators into application state.
pub fn create_state(
    store: Arc<dyn TransactionStore>,
    cache: Arc<dyn TransactionCache>,
    customers: Arc<dyn CustomerDirectory>,
    products: Arc<dyn ProductCatalog>,
    options: OrchestratorOptions,
) -> Arc<AppState> {
    Arc::new(AppState {
        orchestrator: TransactionOrchestrator::new(store, cache, customers, products, options),
    })
}

/// Connects to PostgreSQL, Redis and the lookup services described by `config`.
pub async fn connect(config: &Config) -> Result<Arc<AppState>, StartupError> {
    let timeouts = config.orchestrator.timeouts;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(timeouts.store)
        .connect_with(config.database.connect_options()?)
        .await?;
    let store = PostgresTransactionStore::new(pool);
    if config.database.run_migrations {
        store.run_migrations().await?;
        tracing::info!("database migrations applied");
    }

    let cache = RedisTransactionCache::connect(&config.redis_url).await?;
    let customers = HttpCustomerDirectory::new(&config.customer_service_url, timeouts.lookup)?;
    let products = HttpProductCatalog::new(&config.product_service_url, timeouts.lookup)?;

    tracing::info!(
        customer_service = %config.customer_service_url,
        product_service = %config.product_service_url,
        cache_write_policy = %config.orchestrator.cache_write_policy,
        "dependencies initialised"
    );

    Ok(create_state(
        Arc::new(store),
        Arc::new(cache),
        Arc::new(customers),
        Arc::new(products),
        config.orchestrator,
    ))
}
