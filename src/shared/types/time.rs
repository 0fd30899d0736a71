//! Epoch-millisecond helpers.
//!
//! Clients exchange every timestamp as Unix epoch milliseconds, so the
//! domain stores them as plain `i64`.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Milliseconds since the Unix epoch for the current instant.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Converts epoch millis to a UTC timestamp, `None` when out of range.
pub fn millis_to_utc(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Whether `millis` falls on the same local calendar day as `reference`.
pub fn same_local_day(millis: i64, reference: DateTime<Local>) -> bool {
    match Local.timestamp_millis_opt(millis).single() {
        Some(ts) => ts.date_naive() == reference.date_naive(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn round_trips_current_instant() {
        let now = now_millis();
        let ts = millis_to_utc(now).unwrap();
        assert_eq!(ts.timestamp_millis(), now);
    }

    #[test]
    fn same_local_day_rejects_yesterday() {
        let now = Local::now();
        let yesterday = (now - Duration::days(1)).timestamp_millis();
        assert!(same_local_day(now.timestamp_millis(), now));
        assert!(!same_local_day(yesterday, now));
    }
}
