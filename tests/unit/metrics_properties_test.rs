use chrono::{Duration, NaiveDate, NaiveDateTime};
use merchant_report::reports::models::{
    MetricOutcome, RecordSet, ReportWindow, TransactionRecord,
};
use merchant_report::reports::services::TOP_STATES_LIMIT;
use merchant_report::reports::MetricsCalculator;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

/// Property-based tests for the merchant metrics
///
/// Validates:
/// - totals equal the sum of their daily aggregates
/// - net revenue is paid − fee − commission exactly
/// - top states are bounded, sorted and unique
/// - market share stays within [0, 100]
/// - unknown merchants yield insufficient data for every metric

const MERCHANTS: [&str; 3] = ["m-1", "m-2", "m-3"];
const STATES: [&str; 14] = [
    "CA", "NY", "TX", "FL", "WA", "OR", "NV", "AZ", "UT", "CO", "IL", "OH", "GA", "MA",
];
const STATUSES: [&str; 3] = ["success", "failed", "pending"];

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 30)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn calculator() -> MetricsCalculator {
    MetricsCalculator::new(ReportWindow::trailing_days(now(), 30))
}

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

prop_compose! {
    fn arb_record()(
        merchant in 0usize..MERCHANTS.len(),
        user in 0usize..12,
        state in proptest::option::of(0usize..STATES.len()),
        hours_ago in 0i64..(60 * 24),
        paid in 0i64..1_000_000,
        fee in 0i64..50_000,
        commission in 0i64..50_000,
        status in 0usize..STATUSES.len(),
    ) -> TransactionRecord {
        TransactionRecord {
            merchant_id: MERCHANTS[merchant].to_string(),
            user_id: format!("user-{}", user),
            state: state.map(|s| STATES[s].to_string()),
            payment_date: now() - Duration::hours(hours_ago),
            paid_amount: cents(paid),
            fee: cents(fee),
            commission_amount: cents(commission),
            status: STATUSES[status].to_string(),
        }
    }
}

fn arb_record_set() -> impl Strategy<Value = RecordSet> {
    proptest::collection::vec(arb_record(), 1..120).prop_map(RecordSet::new)
}

#[cfg(test)]
mod metrics_properties_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_revenue_total_equals_sum_of_days(records in arb_record_set()) {
            for merchant in MERCHANTS {
                if let MetricOutcome::Computed(revenue) = calculator().revenue_metrics(&records, merchant) {
                    let daily_sum: Decimal = revenue.daily.iter().map(|d| d.value).sum();
                    prop_assert_eq!(revenue.total_paid, daily_sum);
                    prop_assert!(revenue.daily.iter().all(|d| d.value <= revenue.peak_day.value));
                }
            }
        }

        #[test]
        fn test_count_total_equals_sum_of_days(records in arb_record_set()) {
            for merchant in MERCHANTS {
                if let MetricOutcome::Computed(counts) = calculator().count_metrics(&records, merchant) {
                    let daily_sum: usize = counts.daily.iter().map(|d| d.value).sum();
                    prop_assert_eq!(counts.total_transactions, daily_sum);
                    prop_assert!(counts.slowest_day.value <= counts.busiest_day.value);
                }
            }
        }

        #[test]
        fn test_net_revenue_is_exact(
            paid in -1_000_000i64..1_000_000,
            fee in -100_000i64..100_000,
            commission in -100_000i64..100_000,
        ) {
            let record = TransactionRecord {
                merchant_id: "m-1".to_string(),
                user_id: "u".to_string(),
                state: None,
                payment_date: now(),
                paid_amount: cents(paid),
                fee: cents(fee),
                commission_amount: cents(commission),
                status: "success".to_string(),
            };

            prop_assert_eq!(record.net_revenue(), cents(paid - fee - commission));
        }

        #[test]
        fn test_status_net_revenue_matches_components(records in arb_record_set()) {
            for merchant in MERCHANTS {
                if let MetricOutcome::Computed(status) = calculator().status_metrics(&records, merchant) {
                    prop_assert_eq!(
                        status.total_net_revenue,
                        status.total_paid - status.total_fee - status.total_commission
                    );
                    let counted: usize = status.statuses.iter().map(|s| s.count).sum();
                    prop_assert_eq!(counted, status.total_transactions);
                }
            }
        }

        #[test]
        fn test_top_states_bounded_sorted_unique(records in arb_record_set()) {
            for merchant in MERCHANTS {
                if let MetricOutcome::Computed(geo) = calculator().geographic_distribution(&records, merchant) {
                    prop_assert!(geo.top_states.len() <= TOP_STATES_LIMIT);
                    prop_assert!(geo.top_states.windows(2).all(|w| w[0].users >= w[1].users));

                    let unique: HashSet<&str> = geo.top_states.iter().map(|s| s.state.as_str()).collect();
                    prop_assert_eq!(unique.len(), geo.top_states.len());
                }
            }
        }

        #[test]
        fn test_market_share_within_bounds(records in arb_record_set()) {
            for merchant in MERCHANTS {
                if let MetricOutcome::Computed(users) = calculator().user_metrics(&records, merchant) {
                    prop_assert!(users.market_share >= Decimal::ZERO);
                    prop_assert!(users.market_share <= dec!(100));
                    prop_assert!(users.new_users <= users.total_users);
                }
            }
        }

        #[test]
        fn test_unknown_merchant_is_insufficient_everywhere(records in arb_record_set()) {
            let report = calculator().merchant_report(&records, "not-a-merchant");

            prop_assert!(report.is_empty());
            prop_assert_eq!(report.insufficient_metrics().len(), 5);
        }
    }

    #[test]
    fn test_market_share_of_ten_users_in_hundred_rows() {
        let mut records: Vec<TransactionRecord> = (0..40)
            .map(|i| TransactionRecord {
                merchant_id: "m-1".to_string(),
                user_id: format!("user-{}", i % 10),
                state: Some("CA".to_string()),
                payment_date: now() - Duration::days(1),
                paid_amount: dec!(10),
                fee: dec!(1),
                commission_amount: dec!(0.5),
                status: "success".to_string(),
            })
            .collect();
        records.extend((40..100).map(|i| TransactionRecord {
            merchant_id: "m-2".to_string(),
            user_id: format!("other-{}", i),
            state: None,
            payment_date: now() - Duration::days(2),
            paid_amount: dec!(10),
            fee: dec!(1),
            commission_amount: dec!(0.5),
            status: "success".to_string(),
        }));

        let users = calculator()
            .user_metrics(&RecordSet::new(records), "m-1")
            .computed()
            .cloned()
            .unwrap();

        assert_eq!(users.total_users, 10);
        assert_eq!(users.platform_rows, 100);
        assert_eq!(users.market_share, dec!(10));
    }
}
