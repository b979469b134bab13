use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One payment event from the flattened transaction/payment/user view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TransactionRecord {
    /// Merchant the payment was made to
    pub merchant_id: String,

    /// Paying user
    pub user_id: String,

    /// Geographic state code of the user, when known
    pub state: Option<String>,

    /// Payment timestamp (UTC)
    pub payment_date: NaiveDateTime,

    /// Amount paid by the user
    pub paid_amount: Decimal,

    /// Processing fee
    pub fee: Decimal,

    /// Platform commission
    pub commission_amount: Decimal,

    /// Payment status (success, failed, pending, ...)
    pub status: String,
}

impl TransactionRecord {
    /// Net revenue kept by the merchant: paid − fee − commission
    pub fn net_revenue(&self) -> Decimal {
        self.paid_amount - self.fee - self.commission_amount
    }

    /// Calendar date of the payment
    pub fn payment_day(&self) -> NaiveDate {
        self.payment_date.date()
    }
}

/// All rows fetched for a single report request.
///
/// Read once per request and never mutated; every metric receives it by
/// reference and applies its own filters.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<TransactionRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    /// Total number of rows, across every merchant
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter()
    }

    /// Rows belonging to `merchant_id`, in record-set order
    pub fn for_merchant<'a>(
        &'a self,
        merchant_id: &'a str,
    ) -> impl Iterator<Item = &'a TransactionRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.merchant_id == merchant_id)
    }

    pub fn contains_merchant(&self, merchant_id: &str) -> bool {
        self.for_merchant(merchant_id).next().is_some()
    }
}

impl From<Vec<TransactionRecord>> for RecordSet {
    fn from(records: Vec<TransactionRecord>) -> Self {
        Self::new(records)
    }
}
