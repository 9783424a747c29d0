use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{CustomerId, ProductId, TransactionId};
use domain::{PricedTransaction, Quantity, Transaction};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{Result, StoreError, store::TransactionStore};

/// PostgreSQL-backed transaction store.
#[derive(Clone)]
pub struct PostgresTransactionStore {
    pool: PgPool,
}

impl PostgresTransactionStore {
    /// Creates a new PostgreSQL transaction store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_transaction(row: PgRow) -> Result<Transaction> {
        let quantity: i32 = row.try_get("quantity")?;
        let quantity = Quantity::new(i64::from(quantity))
            .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;

        Ok(Transaction {
            id: TransactionId::new(row.try_get::<String, _>("transaction_id")?),
            customer_id: CustomerId::new(row.try_get::<String, _>("customer_id")?),
            product_id: ProductId::new(row.try_get::<String, _>("product_id")?),
            quantity,
            total_price: row.try_get("total_price")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }
}

#[async_trait]
impl TransactionStore for PostgresTransactionStore {
    #[tracing::instrument(skip(self, transaction), fields(customer_id = %transaction.customer_id, product_id = %transaction.product_id))]
    async fn insert(&self, transaction: PricedTransaction) -> Result<Transaction> {
        let row = sqlx::query(
            r#"
            INSERT INTO transactions (customer_id, product_id, quantity, total_price, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING transaction_id, created_at
            "#,
        )
        .bind(transaction.customer_id.as_str())
        .bind(transaction.product_id.as_str())
        .bind(transaction.quantity.get())
        .bind(transaction.total_price)
        .fetch_one(&self.pool)
        .await?;

        let id: String = row.try_get("transaction_id")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        Ok(transaction.into_transaction(TransactionId::new(id), created_at))
    }

    async fn get(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT transaction_id, customer_id, product_id, quantity, total_price, created_at
            FROM transactions
            WHERE transaction_id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_transaction).transpose()
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }
}
