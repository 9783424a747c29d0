//! Integration tests for transaction creation and lookup.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use catalog::{
    CustomerDirectory, InMemoryCustomerDirectory, InMemoryProductCatalog, LookupError,
    ProductCatalog,
};
use common::{ProductId, TransactionId};
use domain::{Customer, DomainError, NewTransaction, PricedTransaction, Product, Transaction};
use orchestrator::{
    CacheWritePolicy, DynOrchestrator, OrchestratorError, OrchestratorOptions, Timeouts,
    TransactionOrchestrator,
};
use store::{
    CacheError, InMemoryTransactionCache, InMemoryTransactionStore, StoreError, TransactionCache,
    TransactionStore,
};

type TestOrchestrator = TransactionOrchestrator<
    InMemoryTransactionStore,
    InMemoryTransactionCache,
    InMemoryCustomerDirectory,
    InMemoryProductCatalog,
>;

struct TestHarness {
    orchestrator: TestOrchestrator,
    store: InMemoryTransactionStore,
    cache: InMemoryTransactionCache,
    customers: InMemoryCustomerDirectory,
    products: InMemoryProductCatalog,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_policy(CacheWritePolicy::BestEffort)
    }

    fn with_policy(cache_write_policy: CacheWritePolicy) -> Self {
        let store = InMemoryTransactionStore::new();
        let cache = InMemoryTransactionCache::new();
        let customers = InMemoryCustomerDirectory::new()
            .with_customer(Customer::new("C1", "Alice").with_email("alice@example.com"));
        let products = InMemoryProductCatalog::new()
            .with_product(Product::new("P1", "Widget", 10.0).with_stock(100))
            .with_product(Product::new("P2", "Gadget", 2.5));

        let orchestrator = TransactionOrchestrator::new(
            store.clone(),
            cache.clone(),
            customers.clone(),
            products.clone(),
            OrchestratorOptions {
                cache_write_policy,
                ..OrchestratorOptions::default()
            },
        );

        Self {
            orchestrator,
            store,
            cache,
            customers,
            products,
        }
    }

    fn request(customer: &str, product: &str, quantity: i64) -> NewTransaction {
        NewTransaction::new(customer, product, quantity).unwrap()
    }
}

#[tokio::test]
async fn test_create_prices_and_persists() {
    let h = TestHarness::new();

    let txn = h
        .orchestrator
        .create_transaction(TestHarness::request("C1", "P1", 3))
        .await
        .unwrap();

    assert_eq!(txn.total_price, 30.0);
    assert_eq!(txn.quantity.get(), 3);
    assert_eq!(txn.customer_id.as_str(), "C1");
    assert_eq!(txn.product_id.as_str(), "P1");
    assert_eq!(h.store.count().await.unwrap(), 1);
    assert_eq!(
        h.cache.peek(&txn.cache_key()).await,
        Some(txn.to_cache_payload().unwrap())
    );
}

#[tokio::test]
async fn test_create_then_get_returns_equal_record() {
    let h = TestHarness::new();

    for (product, quantity) in [("P1", 1), ("P1", 7), ("P2", 3), ("P2", 1000)] {
        let created = h
            .orchestrator
            .create_transaction(TestHarness::request("C1", product, quantity))
            .await
            .unwrap();

        let price = if product == "P1" { 10.0 } else { 2.5 };
        assert_eq!(created.total_price, quantity as f64 * price);

        let loaded = h.orchestrator.get_transaction(&created.id).await.unwrap();
        assert_eq!(loaded, created);
    }
}

#[tokio::test]
async fn test_unknown_customer_writes_nothing() {
    let h = TestHarness::new();

    let err = h
        .orchestrator
        .create_transaction(TestHarness::request("ghost", "P1", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::CustomerNotFound(_)));
    assert_eq!(h.store.count().await.unwrap(), 0);
    assert_eq!(h.cache.set_calls(), 0);
    assert_eq!(h.products.lookup_count(), 0);
}

#[tokio::test]
async fn test_unknown_product_writes_nothing() {
    let h = TestHarness::new();

    let err = h
        .orchestrator
        .create_transaction(TestHarness::request("C1", "does-not-exist", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::ProductNotFound(_)));
    assert!(err.to_string().contains("does-not-exist"));
    assert_eq!(h.store.count().await.unwrap(), 0);
    assert_eq!(h.cache.set_calls(), 0);
    assert_eq!(h.customers.lookup_count(), 1);
}

#[tokio::test]
async fn test_lookup_service_down_is_not_reference_error() {
    let h = TestHarness::new();
    h.products.set_unavailable(true);

    let err = h
        .orchestrator
        .create_transaction(TestHarness::request("C1", "P1", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::ProductLookup(_)));
    assert!(!err.is_reference_error());
    assert_eq!(h.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_store_failure_aborts_before_cache() {
    let h = TestHarness::new();
    h.store.set_unavailable(true);

    let err = h
        .orchestrator
        .create_transaction(TestHarness::request("C1", "P1", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::Store(_)));
    assert_eq!(h.cache.set_calls(), 0);
}

#[tokio::test]
async fn test_strict_policy_fails_request_but_keeps_row() {
    let h = TestHarness::with_policy(CacheWritePolicy::Strict);
    h.cache.set_fail_on_set(true);

    let err = h
        .orchestrator
        .create_transaction(TestHarness::request("C1", "P1", 2))
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::Cache(_)));
    // Not compensated: the durable record exists.
    assert_eq!(h.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_best_effort_policy_succeeds_without_cache() {
    let h = TestHarness::new();
    h.cache.set_fail_on_set(true);

    let txn = h
        .orchestrator
        .create_transaction(TestHarness::request("C1", "P1", 2))
        .await
        .unwrap();

    assert!(h.cache.is_empty().await);

    // Later lookups recover through the store once the cache is healthy.
    h.cache.set_fail_on_set(false);
    let loaded = h.orchestrator.get_transaction(&txn.id).await.unwrap();
    assert_eq!(loaded, txn);
    assert!(h.cache.peek(&txn.cache_key()).await.is_some());
}

#[tokio::test]
async fn test_repeated_reads_are_identical() {
    let h = TestHarness::new();
    let txn = h
        .orchestrator
        .create_transaction(TestHarness::request("C1", "P2", 4))
        .await
        .unwrap();

    let first = serde_json::to_vec(&h.orchestrator.get_transaction(&txn.id).await.unwrap()).unwrap();
    for _ in 0..5 {
        let again =
            serde_json::to_vec(&h.orchestrator.get_transaction(&txn.id).await.unwrap()).unwrap();
        assert_eq!(again, first);
    }
}

#[tokio::test]
async fn test_eviction_falls_back_and_repopulates() {
    let h = TestHarness::new();
    let txn = h
        .orchestrator
        .create_transaction(TestHarness::request("C1", "P1", 3))
        .await
        .unwrap();

    assert!(h.cache.evict(&txn.cache_key()).await.is_some());

    let loaded = h.orchestrator.get_transaction(&txn.id).await.unwrap();
    assert_eq!(loaded, txn);

    // The backfill is enough to answer with the store switched off.
    h.store.set_unavailable(true);
    let cached = h.orchestrator.get_transaction(&txn.id).await.unwrap();
    assert_eq!(cached, txn);
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let h = TestHarness::new();

    let err = h
        .orchestrator
        .get_transaction(&TransactionId::new("never-created"))
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::TransactionNotFound(_)));
}

#[tokio::test]
async fn test_get_blank_id_is_input_error() {
    let h = TestHarness::new();

    let err = h
        .orchestrator
        .get_transaction(&TransactionId::new("  "))
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::InvalidInput(_)));
    assert_eq!(h.cache.get_calls(), 0);
}

#[tokio::test]
async fn test_get_store_failure_on_miss() {
    let h = TestHarness::new();
    h.store.set_unavailable(true);

    let err = h
        .orchestrator
        .get_transaction(&TransactionId::new("abc"))
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::Store(_)));
}

#[tokio::test]
async fn test_price_is_fixed_at_creation() {
    let h = TestHarness::new();
    let txn = h
        .orchestrator
        .create_transaction(TestHarness::request("C1", "P1", 3))
        .await
        .unwrap();

    h.products.insert(Product::new("P1", "Widget", 99.0));
    h.cache.evict(&txn.cache_key()).await;

    let loaded = h.orchestrator.get_transaction(&txn.id).await.unwrap();
    assert_eq!(loaded.total_price, 30.0);
}

#[tokio::test]
async fn test_overflowing_total_is_rejected_before_insert() {
    let h = TestHarness::new();
    h.products.insert(Product::new("P9", "Yacht", f64::MAX));

    let err = h
        .orchestrator
        .create_transaction(TestHarness::request("C1", "P9", 2))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::InvalidInput(DomainError::TotalOutOfRange { .. })
    ));
    assert_eq!(h.store.count().await.unwrap(), 0);
    assert_eq!(h.cache.set_calls(), 0);
}

struct HangingCatalog;

#[async_trait]
impl ProductCatalog for HangingCatalog {
    async fn get_product(&self, _id: &ProductId) -> Result<Product, LookupError> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn test_hanging_lookup_times_out() {
    let store = InMemoryTransactionStore::new();
    let customers = InMemoryCustomerDirectory::new().with_customer(Customer::new("C1", "Alice"));

    let orchestrator: DynOrchestrator = TransactionOrchestrator::new(
        Arc::new(store.clone()) as Arc<dyn TransactionStore>,
        Arc::new(InMemoryTransactionCache::new()) as Arc<dyn TransactionCache>,
        Arc::new(customers) as Arc<dyn CustomerDirectory>,
        Arc::new(HangingCatalog) as Arc<dyn ProductCatalog>,
        OrchestratorOptions {
            timeouts: Timeouts {
                lookup: Duration::from_millis(250),
                ..Timeouts::default()
            },
            ..OrchestratorOptions::default()
        },
    );

    let err = orchestrator
        .create_transaction(TestHarness::request("C1", "P1", 1))
        .await
        .unwrap_err();

    match err {
        OrchestratorError::ProductLookup(LookupError::Timeout { after, .. }) => {
            assert_eq!(after, Duration::from_millis(250));
        }
        other => panic!("expected product lookup timeout, got {other:?}"),
    }
    assert_eq!(store.count().await.unwrap(), 0);
}

/// Store whose reads and writes never complete.
struct HangingStore;

#[async_trait]
impl TransactionStore for HangingStore {
    async fn insert(&self, _transaction: PricedTransaction) -> store::Result<Transaction> {
        std::future::pending().await
    }

    async fn get(&self, _id: &TransactionId) -> store::Result<Option<Transaction>> {
        std::future::pending().await
    }

    async fn count(&self) -> store::Result<u64> {
        std::future::pending().await
    }
}

/// Cache that hangs on the selected operations and otherwise delegates.
struct HangingCache {
    inner: InMemoryTransactionCache,
    hang_on_get: bool,
    hang_on_set: bool,
}

#[async_trait]
impl TransactionCache for HangingCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        if self.hang_on_get {
            std::future::pending::<()>().await;
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, payload: Vec<u8>) -> Result<(), CacheError> {
        if self.hang_on_set {
            std::future::pending::<()>().await;
        }
        self.inner.set(key, payload).await
    }
}

fn orchestrator_with(
    store: Arc<dyn TransactionStore>,
    cache: Arc<dyn TransactionCache>,
    cache_write_policy: CacheWritePolicy,
) -> DynOrchestrator {
    let customers = InMemoryCustomerDirectory::new().with_customer(Customer::new("C1", "Alice"));
    let products = InMemoryProductCatalog::new().with_product(Product::new("P1", "Widget", 10.0));

    TransactionOrchestrator::new(
        store,
        cache,
        Arc::new(customers) as Arc<dyn CustomerDirectory>,
        Arc::new(products) as Arc<dyn ProductCatalog>,
        OrchestratorOptions {
            timeouts: Timeouts {
                store: Duration::from_millis(300),
                cache: Duration::from_millis(100),
                ..Timeouts::default()
            },
            cache_write_policy,
        },
    )
}

#[tokio::test(start_paused = true)]
async fn test_hanging_insert_times_out_without_caching() {
    let cache = InMemoryTransactionCache::new();
    let orchestrator = orchestrator_with(
        Arc::new(HangingStore),
        Arc::new(cache.clone()),
        CacheWritePolicy::BestEffort,
    );

    let err = orchestrator
        .create_transaction(TestHarness::request("C1", "P1", 1))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::Store(StoreError::Timeout(after)) if after == Duration::from_millis(300)
    ));
    assert_eq!(cache.set_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_hanging_store_read_on_miss_times_out() {
    let orchestrator = orchestrator_with(
        Arc::new(HangingStore),
        Arc::new(InMemoryTransactionCache::new()),
        CacheWritePolicy::BestEffort,
    );

    let err = orchestrator
        .get_transaction(&TransactionId::new("abc"))
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::Store(StoreError::Timeout(_))));
}

#[tokio::test(start_paused = true)]
async fn test_hanging_cache_read_falls_back_to_store() {
    let store = InMemoryTransactionStore::new();
    let record = store
        .insert(
            TestHarness::request("C1", "P1", 3)
                .price(&Product::new("P1", "Widget", 10.0))
                .unwrap(),
        )
        .await
        .unwrap();
    let inner = InMemoryTransactionCache::new();
    let orchestrator = orchestrator_with(
        Arc::new(store),
        Arc::new(HangingCache {
            inner: inner.clone(),
            hang_on_get: true,
            hang_on_set: false,
        }),
        CacheWritePolicy::Strict,
    );

    let loaded = orchestrator.get_transaction(&record.id).await.unwrap();

    assert_eq!(loaded, record);
    assert_eq!(
        inner.peek(&record.cache_key()).await,
        Some(record.to_cache_payload().unwrap())
    );
}

#[tokio::test(start_paused = true)]
async fn test_hanging_cache_write_is_ignored_when_best_effort() {
    let store = InMemoryTransactionStore::new();
    let orchestrator = orchestrator_with(
        Arc::new(store.clone()),
        Arc::new(HangingCache {
            inner: InMemoryTransactionCache::new(),
            hang_on_get: false,
            hang_on_set: true,
        }),
        CacheWritePolicy::BestEffort,
    );

    let txn = orchestrator
        .create_transaction(TestHarness::request("C1", "P1", 2))
        .await
        .unwrap();

    assert_eq!(txn.total_price, 20.0);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_hanging_cache_write_fails_request_when_strict() {
    let store = InMemoryTransactionStore::new();
    let orchestrator = orchestrator_with(
        Arc::new(store.clone()),
        Arc::new(HangingCache {
            inner: InMemoryTransactionCache::new(),
            hang_on_get: false,
            hang_on_set: true,
        }),
        CacheWritePolicy::Strict,
    );

    let err = orchestrator
        .create_transaction(TestHarness::request("C1", "P1", 2))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::Cache(CacheError::Timeout(after)) if after == Duration::from_millis(100)
    ));
    // The durable row is kept.
    assert_eq!(store.count().await.unwrap(), 1);
}
