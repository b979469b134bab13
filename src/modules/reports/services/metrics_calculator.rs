use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::modules::reports::models::{
    CountMetrics, DailyValue, GeographicDistribution, MerchantReport, MetricKind, MetricOutcome,
    RecordSet, ReportWindow, RevenueMetrics, StateCount, StatusCount, StatusMetrics,
    TransactionRecord, UserMetrics,
};

/// Number of states kept in the geographic distribution
pub const TOP_STATES_LIMIT: usize = 10;

/// Span of the trailing moving average drawn over daily series
pub const MOVING_AVERAGE_SPAN: usize = 7;

/// Computes the five per-merchant metric groups.
///
/// Each metric takes the full record set and applies its own merchant and
/// window filters; nothing is shared between them except the record set.
#[derive(Debug, Clone, Copy)]
pub struct MetricsCalculator {
    window: ReportWindow,
}

impl MetricsCalculator {
    pub fn new(window: ReportWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &ReportWindow {
        &self.window
    }

    /// Compute every metric for `merchant_id`
    pub fn merchant_report(&self, records: &RecordSet, merchant_id: &str) -> MerchantReport {
        MerchantReport {
            merchant_id: merchant_id.to_string(),
            window: self.window,
            generated_at: Utc::now(),
            revenue: self.revenue_metrics(records, merchant_id),
            counts: self.count_metrics(records, merchant_id),
            status: self.status_metrics(records, merchant_id),
            users: self.user_metrics(records, merchant_id),
            geography: self.geographic_distribution(records, merchant_id),
        }
    }

    /// Total paid, average daily paid and the peak date within the window
    pub fn revenue_metrics(
        &self,
        records: &RecordSet,
        merchant_id: &str,
    ) -> MetricOutcome<RevenueMetrics> {
        let mut per_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        let mut total_paid = Decimal::ZERO;

        for record in self.windowed(records, merchant_id) {
            *per_day.entry(record.payment_day()).or_insert(Decimal::ZERO) += record.paid_amount;
            total_paid += record.paid_amount;
        }

        let daily: Vec<DailyValue<Decimal>> = per_day
            .into_iter()
            .map(|(date, paid)| DailyValue::new(date, paid))
            .collect();

        let Some(peak_day) = earliest_max(&daily) else {
            return self.no_window_data(MetricKind::Revenue, merchant_id);
        };

        let values: Vec<Decimal> = daily.iter().map(|day| day.value).collect();
        let moving_average = if daily.len() > MOVING_AVERAGE_SPAN {
            trailing_mean(&values, MOVING_AVERAGE_SPAN)
        } else {
            Vec::new()
        };

        MetricOutcome::Computed(RevenueMetrics {
            total_paid,
            average_daily_paid: total_paid / Decimal::from(daily.len()),
            peak_day,
            daily,
            moving_average,
        })
    }

    /// Transaction count, average daily count, busiest and slowest dates within the window
    pub fn count_metrics(
        &self,
        records: &RecordSet,
        merchant_id: &str,
    ) -> MetricOutcome<CountMetrics> {
        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        let mut total_transactions = 0usize;

        for record in self.windowed(records, merchant_id) {
            *per_day.entry(record.payment_day()).or_insert(0) += 1;
            total_transactions += 1;
        }

        let daily: Vec<DailyValue<usize>> = per_day
            .into_iter()
            .map(|(date, count)| DailyValue::new(date, count))
            .collect();

        let (Some(busiest_day), Some(slowest_day)) = (earliest_max(&daily), earliest_min(&daily))
        else {
            return self.no_window_data(MetricKind::Count, merchant_id);
        };

        MetricOutcome::Computed(CountMetrics {
            total_transactions,
            average_daily: Decimal::from(total_transactions) / Decimal::from(daily.len()),
            busiest_day,
            slowest_day,
            daily,
        })
    }

    /// Status mix and financial breakdown within the window
    pub fn status_metrics(
        &self,
        records: &RecordSet,
        merchant_id: &str,
    ) -> MetricOutcome<StatusMetrics> {
        let mut per_status: HashMap<&str, usize> = HashMap::new();
        let mut total_transactions = 0usize;
        let mut total_paid = Decimal::ZERO;
        let mut total_net_revenue = Decimal::ZERO;
        let mut total_fee = Decimal::ZERO;
        let mut total_commission = Decimal::ZERO;

        for record in self.windowed(records, merchant_id) {
            *per_status.entry(record.status.as_str()).or_insert(0) += 1;
            total_transactions += 1;
            total_paid += record.paid_amount;
            total_net_revenue += record.net_revenue();
            total_fee += record.fee;
            total_commission += record.commission_amount;
        }

        if total_transactions == 0 {
            return self.no_window_data(MetricKind::Status, merchant_id);
        }

        let mut statuses: Vec<StatusCount> = per_status
            .into_iter()
            .map(|(status, count)| StatusCount {
                status: status.to_string(),
                count,
            })
            .collect();
        statuses.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));

        MetricOutcome::Computed(StatusMetrics {
            statuses,
            total_transactions,
            total_paid,
            total_net_revenue,
            total_fee,
            total_commission,
        })
    }

    /// All-time and in-window distinct users, plus market share.
    ///
    /// Market share divides the merchant's all-time distinct users by the
    /// row count of the entire record set, not by the platform's distinct users.
    pub fn user_metrics(&self, records: &RecordSet, merchant_id: &str) -> MetricOutcome<UserMetrics> {
        let mut all_users: HashSet<&str> = HashSet::new();
        let mut window_users: HashSet<&str> = HashSet::new();
        let mut per_day: BTreeMap<NaiveDate, HashSet<&str>> = BTreeMap::new();

        for record in records.for_merchant(merchant_id) {
            all_users.insert(record.user_id.as_str());

            if self.window.contains(record.payment_date) {
                window_users.insert(record.user_id.as_str());
                per_day
                    .entry(record.payment_day())
                    .or_default()
                    .insert(record.user_id.as_str());
            }
        }

        if all_users.is_empty() {
            return MetricOutcome::insufficient(
                MetricKind::Users,
                format!("merchant {} has no transactions", merchant_id),
            );
        }

        let platform_rows = records.len();
        let market_share =
            Decimal::from(all_users.len()) * Decimal::from(100) / Decimal::from(platform_rows);

        let daily_active_users: Vec<DailyValue<usize>> = per_day
            .into_iter()
            .map(|(date, users)| DailyValue::new(date, users.len()))
            .collect();
        let values: Vec<Decimal> = daily_active_users
            .iter()
            .map(|day| Decimal::from(day.value))
            .collect();

        MetricOutcome::Computed(UserMetrics {
            total_users: all_users.len(),
            new_users: window_users.len(),
            market_share,
            platform_rows,
            daily_active_users,
            moving_average: trailing_mean(&values, MOVING_AVERAGE_SPAN),
        })
    }

    /// Top states by number of users, using each user's first-seen state (all-time)
    pub fn geographic_distribution(
        &self,
        records: &RecordSet,
        merchant_id: &str,
    ) -> MetricOutcome<GeographicDistribution> {
        let mut first_state: HashMap<&str, &str> = HashMap::new();
        let mut has_rows = false;

        for record in records.for_merchant(merchant_id) {
            has_rows = true;
            let state = record
                .state
                .as_deref()
                .map(str::trim)
                .filter(|state| !state.is_empty());

            if let Some(state) = state {
                first_state.entry(record.user_id.as_str()).or_insert(state);
            }
        }

        if first_state.is_empty() {
            let reason = if has_rows {
                format!("no state recorded for users of merchant {}", merchant_id)
            } else {
                format!("merchant {} has no transactions", merchant_id)
            };
            return MetricOutcome::insufficient(MetricKind::Geography, reason);
        }

        let mut users_per_state: HashMap<&str, usize> = HashMap::new();
        for state in first_state.values() {
            *users_per_state.entry(*state).or_insert(0) += 1;
        }

        let mut top_states: Vec<StateCount> = users_per_state
            .into_iter()
            .map(|(state, users)| StateCount {
                state: state.to_string(),
                users,
            })
            .collect();
        top_states.sort_by(|a, b| b.users.cmp(&a.users).then_with(|| a.state.cmp(&b.state)));
        top_states.truncate(TOP_STATES_LIMIT);

        MetricOutcome::Computed(GeographicDistribution {
            top_states,
            users_with_state: first_state.len(),
        })
    }

    fn windowed<'a>(
        &'a self,
        records: &'a RecordSet,
        merchant_id: &'a str,
    ) -> impl Iterator<Item = &'a TransactionRecord> + 'a {
        records
            .for_merchant(merchant_id)
            .filter(move |record| self.window.contains(record.payment_date))
    }

    fn no_window_data<T>(&self, metric: MetricKind, merchant_id: &str) -> MetricOutcome<T> {
        MetricOutcome::insufficient(
            metric,
            format!(
                "no transactions for merchant {} in the last {} days",
                merchant_id,
                self.window.days()
            ),
        )
    }
}

/// Highest value; the earliest date wins ties
fn earliest_max<T: PartialOrd + Copy>(daily: &[DailyValue<T>]) -> Option<DailyValue<T>> {
    daily
        .iter()
        .copied()
        .reduce(|best, day| if day.value > best.value { day } else { best })
}

/// Lowest value; the earliest date wins ties
fn earliest_min<T: PartialOrd + Copy>(daily: &[DailyValue<T>]) -> Option<DailyValue<T>> {
    daily
        .iter()
        .copied()
        .reduce(|best, day| if day.value < best.value { day } else { best })
}

/// Mean over the last `span` entries; `None` until `span` entries are available
pub fn trailing_mean(values: &[Decimal], span: usize) -> Vec<Option<Decimal>> {
    if span == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < span {
                return None;
            }
            let sum: Decimal = values[i + 1 - span..=i].iter().copied().sum();
            Some(sum / Decimal::from(span))
        })
        .collect()
}
