use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// The five metric groups of a merchant report, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Revenue,
    Count,
    Status,
    Users,
    Geography,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Revenue,
        MetricKind::Count,
        MetricKind::Status,
        MetricKind::Users,
        MetricKind::Geography,
    ];

    /// Page banner title for a window of `window_days` days
    pub fn title(&self, window_days: i64) -> String {
        let subject = match self {
            MetricKind::Revenue => "Payment Analysis",
            MetricKind::Count => "Transaction Count Analysis",
            MetricKind::Status => "Transaction Status Analysis",
            MetricKind::Users => "User Metrics Analysis",
            // Geography covers the merchant's whole history
            MetricKind::Geography => return "User Distribution Analysis - All Time".to_string(),
        };
        format!("{} - Last {} Days", subject, window_days)
    }

    /// File name of the chart image for this metric
    pub fn artifact_file_name(&self) -> &'static str {
        match self {
            MetricKind::Revenue => "payment_analysis_last_month.png",
            MetricKind::Count => "transaction_count_analysis_last_month.png",
            MetricKind::Status => "financial_performance_analysis.png",
            MetricKind::Users => "daily_user_metrics.png",
            MetricKind::Geography => "user_state_distribution.png",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Revenue => write!(f, "revenue"),
            MetricKind::Count => write!(f, "count"),
            MetricKind::Status => write!(f, "status"),
            MetricKind::Users => write!(f, "users"),
            MetricKind::Geography => write!(f, "geography"),
        }
    }
}

/// Why a metric could not be computed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsufficientData {
    pub metric: MetricKind,
    pub reason: String,
}

/// Result of one metric computation.
///
/// Empty filter windows are an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MetricOutcome<T> {
    Computed(T),
    InsufficientData(InsufficientData),
}

impl<T> MetricOutcome<T> {
    pub fn insufficient(metric: MetricKind, reason: impl Into<String>) -> Self {
        MetricOutcome::InsufficientData(InsufficientData {
            metric,
            reason: reason.into(),
        })
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, MetricOutcome::Computed(_))
    }

    pub fn computed(&self) -> Option<&T> {
        match self {
            MetricOutcome::Computed(value) => Some(value),
            MetricOutcome::InsufficientData(_) => None,
        }
    }

    pub fn insufficient_data(&self) -> Option<&InsufficientData> {
        match self {
            MetricOutcome::Computed(_) => None,
            MetricOutcome::InsufficientData(reason) => Some(reason),
        }
    }
}

/// A value aggregated over one calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyValue<T> {
    pub date: NaiveDate,
    pub value: T,
}

impl<T> DailyValue<T> {
    pub fn new(date: NaiveDate, value: T) -> Self {
        Self { date, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueMetrics {
    pub total_paid: Decimal,
    /// Mean of the per-date totals (days without payments are not counted)
    pub average_daily_paid: Decimal,
    /// Date with the highest paid total; earliest date on ties
    pub peak_day: DailyValue<Decimal>,
    /// Paid totals per date, ascending
    pub daily: Vec<DailyValue<Decimal>>,
    /// 7-entry trailing mean aligned with `daily`; empty unless there are more than 7 dates
    pub moving_average: Vec<Option<Decimal>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountMetrics {
    pub total_transactions: usize,
    pub average_daily: Decimal,
    /// Earliest date on ties
    pub busiest_day: DailyValue<usize>,
    /// Earliest date on ties
    pub slowest_day: DailyValue<usize>,
    pub daily: Vec<DailyValue<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusMetrics {
    /// Count per status, most frequent first, ties by status name
    pub statuses: Vec<StatusCount>,
    pub total_transactions: usize,
    pub total_paid: Decimal,
    pub total_net_revenue: Decimal,
    pub total_fee: Decimal,
    pub total_commission: Decimal,
}

impl StatusMetrics {
    /// Bars of the financial breakdown chart, in display order
    pub fn financial_breakdown(&self) -> [(&'static str, Decimal); 4] {
        [
            ("Paid Amount", self.total_paid),
            ("Net Revenue", self.total_net_revenue),
            ("Fee", self.total_fee),
            ("Commission", self.total_commission),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserMetrics {
    /// Distinct users that ever paid the merchant
    pub total_users: usize,
    /// Distinct users active within the window
    pub new_users: usize,
    /// total_users ÷ platform row count × 100
    pub market_share: Decimal,
    /// Row count of the whole record set, the market share denominator
    pub platform_rows: usize,
    /// Distinct active users per date within the window, ascending
    pub daily_active_users: Vec<DailyValue<usize>>,
    /// 7-entry trailing mean aligned with `daily_active_users`
    pub moving_average: Vec<Option<Decimal>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateCount {
    pub state: String,
    pub users: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeographicDistribution {
    /// At most 10 states, by user count descending, ties by state code
    pub top_states: Vec<StateCount>,
    /// Users with a known first-seen state, across all states
    pub users_with_state: usize,
}
