use chrono::{Duration, NaiveDateTime, Utc};
use serde::Serialize;

/// Trailing time window: "the last N days from now".
///
/// Not aligned to calendar months. A timestamp belongs to the window when it
/// is at or after `now − N days`; there is no upper bound, so rows dated
/// after `now` still count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportWindow {
    now: NaiveDateTime,
    days: i64,
}

impl ReportWindow {
    /// Window of `days` days ending at `now`
    pub fn trailing_days(now: NaiveDateTime, days: i64) -> Self {
        Self { now, days }
    }

    /// Window of `days` days ending at the current UTC wall-clock time
    pub fn ending_now(days: i64) -> Self {
        Self::trailing_days(Utc::now().naive_utc(), days)
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    /// Inclusive lower bound of the window, saturating at the earliest
    /// representable timestamp
    pub fn start(&self) -> NaiveDateTime {
        Duration::try_days(self.days)
            .and_then(|span| self.now.checked_sub_signed(span))
            .unwrap_or(NaiveDateTime::MIN)
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.start()
    }
}
