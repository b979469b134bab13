use chrono::{DateTime, Utc};
use serde::Serialize;

use super::merchant_metrics::{
    CountMetrics, GeographicDistribution, MetricKind, MetricOutcome, RevenueMetrics,
    StatusMetrics, UserMetrics,
};
use super::report_window::ReportWindow;

/// Every metric computed for one merchant, ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct MerchantReport {
    pub merchant_id: String,
    pub window: ReportWindow,
    pub generated_at: DateTime<Utc>,
    pub revenue: MetricOutcome<RevenueMetrics>,
    pub counts: MetricOutcome<CountMetrics>,
    pub status: MetricOutcome<StatusMetrics>,
    pub users: MetricOutcome<UserMetrics>,
    pub geography: MetricOutcome<GeographicDistribution>,
}

impl MerchantReport {
    /// Metric kinds that could not be computed, in page order
    pub fn insufficient_metrics(&self) -> Vec<MetricKind> {
        let computed = [
            self.revenue.is_computed(),
            self.counts.is_computed(),
            self.status.is_computed(),
            self.users.is_computed(),
            self.geography.is_computed(),
        ];

        MetricKind::ALL
            .iter()
            .zip(computed)
            .filter(|(_, is_computed)| !is_computed)
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// True when no metric has any data
    pub fn is_empty(&self) -> bool {
        self.insufficient_metrics().len() == MetricKind::ALL.len()
    }
}
