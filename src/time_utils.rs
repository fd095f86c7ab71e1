// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Calendar day label (`YYYY-MM-DD`) of a UTC timestamp.
///
/// This is the date prefix of the RFC3339 form, so two timestamps share a
/// label exactly when their serialized forms share a date prefix.
pub fn day_label(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns true if both timestamps fall on the same UTC calendar day.
pub fn same_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_label_matches_rfc3339_prefix() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 59).unwrap();
        assert_eq!(day_label(date), "2024-01-15");
        assert!(format_utc_rfc3339(date).starts_with(&day_label(date)));
    }

    #[test]
    fn test_same_day_boundaries() {
        let morning = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 59).unwrap();
        let next = Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap();

        assert!(same_day(morning, night));
        assert!(!same_day(night, next));
    }
}
