use chrono::{Duration, NaiveDate, NaiveDateTime};
use merchant_report::reports::models::{MetricKind, RecordSet, ReportWindow, TransactionRecord};
use merchant_report::reports::MetricsCalculator;
use rust_decimal_macros::dec;

/// Window boundary behaviour of the trailing N-day filter

fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn record(payment_date: NaiveDateTime) -> TransactionRecord {
    TransactionRecord {
        merchant_id: "m-1".to_string(),
        user_id: "u-1".to_string(),
        state: Some("CA".to_string()),
        payment_date,
        paid_amount: dec!(50),
        fee: dec!(1),
        commission_amount: dec!(1),
        status: "success".to_string(),
    }
}

#[cfg(test)]
mod report_window_tests {
    use super::*;

    #[test]
    fn test_start_is_inclusive() {
        let window = ReportWindow::trailing_days(at(3, 31, 12), 30);

        assert!(window.contains(at(3, 1, 12)));
        assert!(!window.contains(at(3, 1, 12) - Duration::seconds(1)));
    }

    #[test]
    fn test_future_rows_are_inside_the_window() {
        let window = ReportWindow::trailing_days(at(3, 31, 12), 30);
        assert!(window.contains(at(4, 15, 0)));
    }

    #[test]
    fn test_window_crosses_month_boundaries() {
        let window = ReportWindow::trailing_days(at(3, 10, 0), 30);
        assert_eq!(window.start(), at(2, 8, 0));
    }

    #[test]
    fn test_old_rows_only_feed_all_time_metrics() {
        let now = at(6, 30, 12);
        let records = RecordSet::new(vec![record(now - Duration::days(45))]);
        let report = MetricsCalculator::new(ReportWindow::trailing_days(now, 30))
            .merchant_report(&records, "m-1");

        assert_eq!(
            report.insufficient_metrics(),
            vec![MetricKind::Revenue, MetricKind::Count, MetricKind::Status]
        );

        let users = report.users.computed().unwrap();
        assert_eq!(users.total_users, 1);
        assert_eq!(users.new_users, 0);
        assert!(users.daily_active_users.is_empty());

        assert!(report.geography.is_computed());
    }

    #[test]
    fn test_wider_window_includes_older_rows() {
        let now = at(6, 30, 12);
        let records = RecordSet::new(vec![record(now - Duration::days(45))]);
        let report = MetricsCalculator::new(ReportWindow::trailing_days(now, 60))
            .merchant_report(&records, "m-1");

        assert!(report.insufficient_metrics().is_empty());
        assert_eq!(MetricKind::Revenue.title(60), "Payment Analysis - Last 60 Days");
    }
}
