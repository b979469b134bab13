// Test Data Factory
//
// Builds transaction rows relative to the current time so they fall inside
// the default 30 day window.

use chrono::{Duration, NaiveDateTime, Utc};
use merchant_report::reports::models::TransactionRecord;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Builder for a single transaction row
pub struct RecordBuilder {
    record: TransactionRecord,
}

impl RecordBuilder {
    /// A successful $100.00 payment made one day ago from California
    pub fn new(merchant_id: &str, user_id: &str) -> Self {
        Self {
            record: TransactionRecord {
                merchant_id: merchant_id.to_string(),
                user_id: user_id.to_string(),
                state: Some("CA".to_string()),
                payment_date: days_ago(1),
                paid_amount: dec!(100.00),
                fee: dec!(2.50),
                commission_amount: dec!(1.50),
                status: "success".to_string(),
            },
        }
    }

    pub fn state(mut self, state: Option<&str>) -> Self {
        self.record.state = state.map(str::to_string);
        self
    }

    pub fn days_ago(mut self, days: i64) -> Self {
        self.record.payment_date = days_ago(days);
        self
    }

    pub fn at(mut self, payment_date: NaiveDateTime) -> Self {
        self.record.payment_date = payment_date;
        self
    }

    pub fn paid(mut self, amount: Decimal) -> Self {
        self.record.paid_amount = amount;
        self
    }

    pub fn fee(mut self, fee: Decimal) -> Self {
        self.record.fee = fee;
        self
    }

    pub fn commission(mut self, commission: Decimal) -> Self {
        self.record.commission_amount = commission;
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.record.status = status.to_string();
        self
    }

    pub fn build(self) -> TransactionRecord {
        self.record
    }
}

/// Timestamp `days` days before now, at the current time of day
pub fn days_ago(days: i64) -> NaiveDateTime {
    Utc::now().naive_utc() - Duration::days(days)
}

/// Test data factory for generating unique test data
pub struct TestDataFactory;

impl TestDataFactory {
    /// Unique merchant id with TEST prefix
    pub fn random_merchant_id() -> String {
        format!("TEST-{}", Uuid::new_v4())
    }

    /// Five payments from three users spread over three dates
    pub fn five_transactions_on_three_days(merchant_id: &str) -> Vec<TransactionRecord> {
        vec![
            RecordBuilder::new(merchant_id, "u1").days_ago(3).paid(dec!(120.00)).build(),
            RecordBuilder::new(merchant_id, "u2").days_ago(3).paid(dec!(80.00)).state(Some("NY")).build(),
            RecordBuilder::new(merchant_id, "u1").days_ago(2).paid(dec!(45.50)).status("failed").build(),
            RecordBuilder::new(merchant_id, "u3").days_ago(1).paid(dec!(300.00)).state(Some("TX")).build(),
            RecordBuilder::new(merchant_id, "u2").days_ago(1).paid(dec!(19.99)).state(Some("NY")).build(),
        ]
    }

    /// `rows` rows in total, of which the merchant's cycle through `merchant_users` users.
    ///
    /// The remaining rows belong to another merchant.
    pub fn platform_rows(
        merchant_id: &str,
        merchant_rows: usize,
        merchant_users: usize,
        rows: usize,
    ) -> Vec<TransactionRecord> {
        let mut records: Vec<TransactionRecord> = (0..merchant_rows)
            .map(|i| {
                RecordBuilder::new(merchant_id, &format!("user-{}", i % merchant_users))
                    .days_ago((i % 20) as i64 + 1)
                    .build()
            })
            .collect();

        records.extend((merchant_rows..rows).map(|i| {
            RecordBuilder::new("other-merchant", &format!("other-{}", i))
                .days_ago(5)
                .build()
        }));

        records
    }
}
