//! Tests for the date guard, coverage periods and timezone handling

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};
use core_kernel::temporal::{CoveragePeriod, DateGuard, TemporalError, Timezone};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod date_guard {
    use super::*;

    #[test]
    fn test_rejects_dates_before_1900() {
        let guard = DateGuard::default();
        let err = guard.check(date(1899, 12, 31), date(2024, 6, 1)).unwrap_err();

        assert!(matches!(err, TemporalError::InvalidDateRange { .. }));
        assert!(err.reason().contains("1900"));
    }

    #[test]
    fn test_rejects_dates_more_than_ten_years_ahead() {
        let guard = DateGuard::default();
        let today = date(2024, 6, 1);
        let err = guard.check(date(2035, 6, 1), today).unwrap_err();

        assert!(err.reason().contains("10 years"));
    }

    #[test]
    fn test_accepts_exact_upper_bound() {
        let guard = DateGuard::default();
        let today = date(2024, 6, 1);

        assert_eq!(guard.check(date(2034, 6, 1), today), Ok(date(2034, 6, 1)));
    }

    #[test]
    fn test_leap_day_upper_bound_clamps_to_month_end() {
        let guard = DateGuard::default();
        assert_eq!(guard.latest(date(2024, 2, 29)), date(2034, 2, 28));
    }

    #[test]
    fn test_custom_bounds() {
        let guard = DateGuard::new(2000, 1);
        let today = date(2024, 1, 1);

        assert!(guard.check(date(1999, 12, 31), today).unwrap_err().reason().contains("2000"));
        assert!(guard.check(date(2026, 1, 1), today).unwrap_err().reason().contains("1 years"));
        assert!(guard.check(date(2025, 1, 1), today).is_ok());
    }

    #[test]
    fn test_lower_bound_checked_before_upper() {
        let guard = DateGuard::default();
        // A reference day far in the past does not change the lower bound
        let err = guard.check(date(1850, 1, 1), date(1800, 1, 1)).unwrap_err();
        assert!(err.reason().contains("1900"));
    }
}

mod coverage_period {
    use super::*;

    #[test]
    fn test_bounded_period_is_inclusive_at_both_ends() {
        let period = CoveragePeriod::bounded(date(2024, 1, 1), date(2024, 12, 31));

        assert!(period.contains(date(2024, 1, 1)));
        assert!(period.contains(date(2024, 12, 31)));
        assert!(!period.contains(date(2025, 1, 1)));
        assert!(!period.is_open_ended());
    }

    #[test]
    fn test_open_ended_period_covers_any_later_date() {
        let period = CoveragePeriod::open(date(2020, 1, 1));

        assert!(period.is_open_ended());
        assert!(period.contains(date(2099, 12, 31)));
        assert!(!period.contains(date(2019, 12, 31)));
    }

    #[test]
    fn test_inverted_period_covers_nothing() {
        let period = CoveragePeriod::bounded(date(2024, 12, 31), date(2024, 1, 1));
        assert!(!period.contains(date(2024, 6, 1)));
    }
}

mod timezone {
    use super::*;

    #[test]
    fn test_default_is_utc() {
        assert_eq!(Timezone::default().name(), "UTC");
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let result = "Mars/Olympus_Mons".parse::<Timezone>();
        assert!(matches!(result, Err(TemporalError::UnknownTimezone(_))));
    }

    #[test]
    fn test_date_of_behind_utc() {
        let tz: Timezone = "America/New_York".parse().unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 2, 0, 0).unwrap();

        assert_eq!(tz.date_of(instant), date(2024, 5, 31));
    }

    #[test]
    fn test_serde_round_trip_uses_name() {
        let tz: Timezone = "Europe/Bucharest".parse().unwrap();
        let json = serde_json::to_string(&tz).unwrap();
        assert_eq!(json, "\"Europe/Bucharest\"");
    }
}

proptest! {
    #[test]
    fn prop_guard_accepts_every_date_in_range(offset in 0i64..(365 * 134)) {
        let today = date(2024, 6, 1);
        let candidate = date(1900, 1, 1) + Duration::days(offset);
        prop_assert!(DateGuard::default().check(candidate, today).is_ok());
    }

    #[test]
    fn prop_guard_rejects_every_date_past_upper_bound(extra in 1i64..20_000) {
        let today = date(2024, 6, 1);
        let guard = DateGuard::default();
        let candidate = guard.latest(today) + Duration::days(extra);
        prop_assert!(guard.check(candidate, today).is_err());
    }

    #[test]
    fn prop_guard_rejects_every_date_before_1900(back in 1i64..50_000) {
        let candidate = date(1900, 1, 1) - Duration::days(back);
        prop_assert!(candidate.year() < 1900);
        prop_assert!(DateGuard::default().check(candidate, date(2024, 6, 1)).is_err());
    }
}

#[test]
fn test_invalid_range_displays_reason_only() {
    let error = TemporalError::invalid_range("Date is before 1900-01-01");
    assert_eq!(error.to_string(), "Date is before 1900-01-01");
}
