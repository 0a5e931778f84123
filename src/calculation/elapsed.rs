//! Elapsed wall-clock time between two instants.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Milliseconds in one hour.
pub const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Milliseconds in one minute.
pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// Milliseconds from `start` to `end`, clamped at zero.
///
/// A negative interval (clock skew, corrupted data) yields zero instead of
/// an error.
pub fn elapsed_millis(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_milliseconds().max(0)
}

/// Hours from `start` to `end`, unrounded and never negative.
///
/// # Examples
///
/// ```
/// use shift_engine::calculation::elapsed_hours;
/// use chrono::{Duration, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
/// assert_eq!(elapsed_hours(start, start + Duration::minutes(90)), Decimal::new(15, 1));
/// assert_eq!(elapsed_hours(start, start - Duration::hours(1)), Decimal::ZERO);
/// ```
pub fn elapsed_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> Decimal {
    Decimal::from(elapsed_millis(start, end)) / Decimal::from(MILLIS_PER_HOUR)
}
