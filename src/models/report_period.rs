//! Reporting window model.
//!
//! This module contains the [`ReportPeriod`] type used to select shifts by
//! the calendar date on which they started.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar dates (UTC).
///
/// # Example
///
/// ```
/// use shift_engine::models::ReportPeriod;
/// use chrono::NaiveDate;
///
/// // Reversed bounds are swapped.
/// let period = ReportPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
/// );
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 26).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// The first date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl ReportPeriod {
    /// Creates a period, swapping the bounds if they are reversed.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        if start_date > end_date {
            Self {
                start_date: end_date,
                end_date: start_date,
            }
        } else {
            Self {
                start_date,
                end_date,
            }
        }
    }

    /// A period covering a single day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Checks if a given date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Midnight UTC at the start of the period.
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.start_date.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// Midnight UTC after the last day; the window is half-open at this end.
    pub fn end_instant_exclusive(&self) -> DateTime<Utc> {
        self.end_date
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDate::MAX)
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
    }
}
