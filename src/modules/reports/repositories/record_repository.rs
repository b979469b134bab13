use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::reports::models::{RecordSet, TransactionRecord};

/// Source of the flattened transaction/payment/user rows
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Fetch every row of the report view in a single query.
    ///
    /// Rows come back ordered by payment date so "first record per user"
    /// means earliest payment.
    async fn fetch_all(&self) -> Result<RecordSet>;

    /// Check that the source can answer queries
    async fn ping(&self) -> Result<()>;
}

/// SQL type amounts are read as. Ten fractional digits keep sub-cent
/// commissions intact and 28 total digits fit `rust_decimal::Decimal`.
const AMOUNT_SQL_TYPE: &str = "DECIMAL(28, 10)";

pub struct MySqlRecordRepository {
    pool: MySqlPool,
    source_table: String,
}

impl MySqlRecordRepository {
    /// Create a repository reading from `source_table`
    ///
    /// `source_table` must be a validated identifier (see `ReportConfig::validate`);
    /// it is quoted segment by segment before being placed in the query.
    pub fn new(pool: MySqlPool, source_table: impl Into<String>) -> Self {
        Self {
            pool,
            source_table: source_table.into(),
        }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    fn select_sql(&self) -> String {
        let table = self
            .source_table
            .split('.')
            .map(|part| format!("`{}`", part))
            .collect::<Vec<_>>()
            .join(".");

        format!(
            r#"
            SELECT
                CAST(merchant_id AS CHAR) AS merchant_id,
                CAST(user_id AS CHAR) AS user_id,
                CAST(state AS CHAR) AS state,
                payment_date,
                CAST(COALESCE(paid_amount, 0) AS {amount}) AS paid_amount,
                CAST(COALESCE(fee, 0) AS {amount}) AS fee,
                CAST(COALESCE(commission_amount, 0) AS {amount}) AS commission_amount,
                CAST(COALESCE(status, 'unknown') AS CHAR) AS status
            FROM {}
            WHERE merchant_id IS NOT NULL
              AND user_id IS NOT NULL
              AND payment_date IS NOT NULL
            ORDER BY payment_date ASC
            "#,
            table,
            amount = AMOUNT_SQL_TYPE
        )
    }
}

#[async_trait]
impl RecordRepository for MySqlRecordRepository {
    async fn fetch_all(&self) -> Result<RecordSet> {
        let sql = self.select_sql();

        let records = sqlx::query_as::<_, TransactionRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(table = %self.source_table, "Failed to fetch report rows: {}", e);
                AppError::Database(e)
            })?;

        tracing::debug!(rows = records.len(), table = %self.source_table, "Fetched report rows");

        Ok(RecordSet::new(records))
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
