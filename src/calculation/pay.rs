//! Effective hours, storage rounding, and earnings.
//!
//! These functions turn elapsed time and accumulated break minutes into the
//! figures stored on a completed shift and used by reporting.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::elapsed::elapsed_hours;

/// Minutes in one hour.
const MINUTES_PER_HOUR: i64 = 60;

/// Hours worked once break time is removed, never negative.
///
/// Negative break minutes are treated as zero, so the result never exceeds
/// `raw_hours`.
///
/// # Examples
///
/// ```
/// use shift_engine::calculation::effective_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(effective_hours(Decimal::from(2), 30), Decimal::new(15, 1));
/// assert_eq!(effective_hours(Decimal::from(1), 90), Decimal::ZERO);
/// ```
pub fn effective_hours(raw_hours: Decimal, break_minutes: i64) -> Decimal {
    let break_hours = Decimal::from(break_minutes.max(0)) / Decimal::from(MINUTES_PER_HOUR);
    (raw_hours - break_hours).max(Decimal::ZERO)
}

/// Rounds to two decimal places, halves away from zero.
///
/// The result always carries a scale of 2, so `2` becomes `2.00`.
///
/// # Examples
///
/// ```
/// use shift_engine::calculation::round2;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round2(Decimal::from_str("1.8333").unwrap()).to_string(), "1.83");
/// assert_eq!(round2(Decimal::from_str("0.125").unwrap()).to_string(), "0.13");
/// assert_eq!(round2(Decimal::from(2)).to_string(), "2.00");
/// ```
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Pay for `effective_hours` at `hourly_rate`.
///
/// No rounding is applied; currency formatting is the display layer's job.
pub fn earnings(effective_hours: Decimal, hourly_rate: Decimal) -> Decimal {
    effective_hours * hourly_rate
}

/// The rounded hour figures stored on a completed shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftHours {
    /// Elapsed hours, rounded to 2 places.
    pub raw_hours: Decimal,
    /// Elapsed hours minus break hours, clamped at zero, rounded to 2 places.
    pub effective_hours: Decimal,
}

/// Computes the stored hour figures for a shift ending at `end`.
///
/// Effective hours are derived from the unrounded raw hours; both values are
/// rounded only at the end.
///
/// # Examples
///
/// ```
/// use shift_engine::calculation::settle_hours;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
/// let hours = settle_hours(start, start + Duration::hours(2), 10);
/// assert_eq!(hours.raw_hours.to_string(), "2.00");
/// assert_eq!(hours.effective_hours.to_string(), "1.83");
/// ```
pub fn settle_hours(start: DateTime<Utc>, end: DateTime<Utc>, break_minutes: i64) -> ShiftHours {
    let raw = elapsed_hours(start, end);
    let effective = effective_hours(raw, break_minutes);
    ShiftHours {
        raw_hours: round2(raw),
        effective_hours: round2(effective),
    }
}
