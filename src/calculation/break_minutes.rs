//! Break segment length in whole minutes.
//!
//! A shift may hold several break segments; each one is converted to whole
//! minutes when it closes and added to the shift's running total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::elapsed::{MILLIS_PER_MINUTE, elapsed_millis};

/// How a break segment is converted to whole minutes.
///
/// The engine holds exactly one policy and uses it for every break it
/// closes, whether by ending the break or by clocking out during it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakRounding {
    /// Round to the nearest minute, halves rounding up.
    #[default]
    Nearest,
    /// Drop any partial minute.
    Floor,
}

/// Length of the segment from `start` to `end` in whole minutes.
///
/// Negative segments count as zero.
///
/// # Examples
///
/// ```
/// use shift_engine::calculation::{BreakRounding, break_segment_minutes};
/// use chrono::{Duration, TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
/// let end = start + Duration::seconds(90);
/// assert_eq!(break_segment_minutes(start, end, BreakRounding::Nearest), 2);
/// assert_eq!(break_segment_minutes(start, end, BreakRounding::Floor), 1);
/// ```
pub fn break_segment_minutes(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    rounding: BreakRounding,
) -> i64 {
    let millis = elapsed_millis(start, end);
    match rounding {
        BreakRounding::Nearest => (millis + MILLIS_PER_MINUTE / 2) / MILLIS_PER_MINUTE,
        BreakRounding::Floor => millis / MILLIS_PER_MINUTE,
    }
}
