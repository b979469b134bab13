pub mod merchant_metrics;
pub mod merchant_report;
pub mod report_window;
pub mod transaction_record;

pub use merchant_metrics::{
    CountMetrics, DailyValue, GeographicDistribution, InsufficientData, MetricKind,
    MetricOutcome, RevenueMetrics, StateCount, StatusCount, StatusMetrics, UserMetrics,
};
pub use merchant_report::MerchantReport;
pub use report_window::ReportWindow;
pub use transaction_record::{RecordSet, TransactionRecord};
