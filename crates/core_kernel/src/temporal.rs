//! Date handling for coverage decisions
//!
//! This module provides:
//! - `Timezone`: which calendar day "now" falls on for the business
//! - `DateGuard`: the accepted range for dates supplied by callers
//! - `CoveragePeriod`: an inclusive date interval a policy is active for

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use std::str::FromStr;

/// Timezone wrapper for the business calendar
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for Timezone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s)
            .map(Timezone)
            .map_err(|_| TemporalError::UnknownTimezone(s.to_string()))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Returns the calendar date of `instant` in this timezone
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.0).date_naive()
    }

    /// Returns today's date in this timezone
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    /// A caller-supplied date fell outside the accepted range
    #[error("{reason}")]
    InvalidDateRange {
        reason: String,
    },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

impl TemporalError {
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        TemporalError::InvalidDateRange {
            reason: reason.into(),
        }
    }

    /// Human-readable reason for a range violation
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// Bounds the dates callers may ask about
///
/// The earliest accepted date is January 1st of `earliest_year`; the latest is
/// `max_years_ahead` calendar years after the reference day. Both bounds are
/// inclusive.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use core_kernel::DateGuard;
///
/// let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let guard = DateGuard::default();
///
/// assert!(guard.check(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), today).is_ok());
/// assert!(guard.check(NaiveDate::from_ymd_opt(1899, 12, 31).unwrap(), today).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateGuard {
    earliest_year: i32,
    max_years_ahead: u32,
}

impl DateGuard {
    pub const EARLIEST_YEAR: i32 = 1900;
    pub const MAX_YEARS_AHEAD: u32 = 10;

    pub fn new(earliest_year: i32, max_years_ahead: u32) -> Self {
        Self {
            earliest_year,
            max_years_ahead,
        }
    }

    /// Latest accepted date relative to `today`
    ///
    /// Month arithmetic clamps to the last day of the month, so Feb 29 plus
    /// ten years lands on Feb 28.
    pub fn latest(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_months(Months::new(self.max_years_ahead.saturating_mul(12)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Accepts `date` when it lies within the guard's range
    ///
    /// # Errors
    ///
    /// Returns `TemporalError::InvalidDateRange` naming the violated bound
    pub fn check(&self, date: NaiveDate, today: NaiveDate) -> Result<NaiveDate, TemporalError> {
        if date.year() < self.earliest_year {
            return Err(TemporalError::invalid_range(format!(
                "Date {} is before the earliest supported date {}-01-01",
                date, self.earliest_year
            )));
        }

        let latest = self.latest(today);
        if date > latest {
            return Err(TemporalError::invalid_range(format!(
                "Date {} is more than {} years in the future (latest allowed is {})",
                date, self.max_years_ahead, latest
            )));
        }

        Ok(date)
    }
}

impl Default for DateGuard {
    fn default() -> Self {
        Self::new(Self::EARLIEST_YEAR, Self::MAX_YEARS_AHEAD)
    }
}

/// An inclusive date interval during which coverage is active
///
/// `end` of `None` means open-ended: any date on or after `start` is covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveragePeriod {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl CoveragePeriod {
    /// Bounded period `[start, end]`
    pub fn bounded(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Open-ended period starting at `start`
    pub fn open(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    /// Returns true if `date` lies within the period, both ends inclusive
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && self.end.map_or(true, |end| date <= end)
    }

    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_guard_bounds_are_inclusive() {
        let guard = DateGuard::default();
        let today = date(2025, 1, 15);

        assert!(guard.check(date(1900, 1, 1), today).is_ok());
        assert!(guard.check(date(2035, 1, 15), today).is_ok());
        assert!(guard.check(date(2035, 1, 16), today).is_err());
    }

    #[test]
    fn test_coverage_period_contains() {
        let period = CoveragePeriod::bounded(date(2024, 1, 1), date(2024, 12, 31));
        assert!(period.contains(date(2024, 6, 1)));
        assert!(period.contains(date(2024, 12, 31)));
        assert!(!period.contains(date(2023, 12, 31)));
    }

    #[test]
    fn test_timezone_date_of_crosses_midnight() {
        let tz: Timezone = "Asia/Tokyo".parse().unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap();

        assert_eq!(Timezone::default().date_of(instant), date(2024, 6, 1));
        assert_eq!(tz.date_of(instant), date(2024, 6, 2));
    }
}
