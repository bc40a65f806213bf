//! Calendar-day canonicalization and window helpers.
//!
//! The unit of completion tracking is a calendar day in the viewer's local
//! time zone, not a timestamp: two instants on the same local day must map
//! to the same day key. Streak and statistics functions take `today` as an
//! explicit parameter so they stay deterministic under test; only the CLI
//! reads the clock, through [`today`].

use chrono::{DateTime, Days, Local, NaiveDate};

/// Format an instant as its local calendar-day key (`YYYY-MM-DD`).
pub fn day_key(instant: DateTime<Local>) -> String {
    instant.date_naive().format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` day key.
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// The current local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The calendar day `n` days before `today`.
pub fn days_ago(today: NaiveDate, n: u64) -> NaiveDate {
    today - Days::new(n)
}

/// Whether two instants fall on the same local calendar day.
pub fn is_same_calendar_day(a: DateTime<Local>, b: DateTime<Local>) -> bool {
    a.date_naive() == b.date_naive()
}
