//! Shift model and related types.
//!
//! This module defines the persisted [`Shift`] record, its [`ShiftStatus`],
//! and the tagged [`ShiftUpdate`] each transition writes back.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// The lifecycle status of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Clocked in and working.
    Active,
    /// Clocked in and currently on a break.
    OnBreak,
    /// Clocked out. Terminal.
    Completed,
    /// Voided by an administrator. Terminal.
    Cancelled,
}

impl ShiftStatus {
    /// Returns the stored string form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Active => "active",
            ShiftStatus::OnBreak => "on_break",
            ShiftStatus::Completed => "completed",
            ShiftStatus::Cancelled => "cancelled",
        }
    }

    /// Returns true for `active` and `on_break`.
    pub fn is_open(&self) -> bool {
        matches!(self, ShiftStatus::Active | ShiftStatus::OnBreak)
    }

    /// Returns true for `completed` and `cancelled`.
    pub fn is_ended(&self) -> bool {
        !self.is_open()
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One worker's clock-in-to-clock-out work period.
///
/// # Examples
///
/// ```
/// use shift_engine::models::{Shift, ShiftStatus};
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
/// let shift = Shift {
///     id: 1,
///     worker_id: "worker_001".to_string(),
///     date: start.date_naive(),
///     start_time: start,
///     end_time: None,
///     status: ShiftStatus::Active,
///     break_start: None,
///     break_end: None,
///     break_duration_minutes: 0,
///     raw_hours: None,
///     effective_hours: None,
/// };
/// assert!(shift.is_open());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier assigned by the store.
    pub id: i64,
    /// The owning worker.
    pub worker_id: String,
    /// Calendar date (UTC) on which the shift began.
    pub date: NaiveDate,
    /// Clock-in instant. Never changes.
    pub start_time: DateTime<Utc>,
    /// Clock-out instant.
    pub end_time: Option<DateTime<Utc>>,
    /// Current lifecycle status.
    pub status: ShiftStatus,
    /// Start of the current (or most recent) break segment.
    pub break_start: Option<DateTime<Utc>>,
    /// End of the most recent closed break segment.
    pub break_end: Option<DateTime<Utc>>,
    /// Total minutes of every closed break segment.
    ///
    /// Older records may carry `null` here; it reads as zero.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub break_duration_minutes: i64,
    /// Elapsed hours from start to end, 2 decimal places.
    pub raw_hours: Option<Decimal>,
    /// Raw hours minus break hours, clamped at zero, 2 decimal places.
    pub effective_hours: Option<Decimal>,
}

impl Shift {
    /// Returns true if the shift is active or on break.
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Writes the fields of a transition onto the record in one step.
    ///
    /// Stores call this while holding whatever guard makes the write atomic.
    pub fn apply(&mut self, update: &ShiftUpdate) {
        match update {
            ShiftUpdate::StartBreak { break_start } => {
                self.break_start = Some(*break_start);
            }
            ShiftUpdate::EndBreak {
                break_end,
                break_duration_minutes,
            } => {
                self.break_end = Some(*break_end);
                self.break_duration_minutes = *break_duration_minutes;
            }
            ShiftUpdate::Complete {
                end_time,
                raw_hours,
                effective_hours,
                closed_break,
            } => {
                if let Some(closed) = closed_break {
                    self.break_end = Some(closed.break_end);
                    self.break_duration_minutes = closed.break_duration_minutes;
                }
                self.end_time = Some(*end_time);
                self.raw_hours = Some(*raw_hours);
                self.effective_hours = Some(*effective_hours);
            }
        }
        self.status = update.resulting_status();
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fields for a shift created by clock-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShift {
    /// The owning worker.
    pub worker_id: String,
    /// Calendar date of `start_time`.
    pub date: NaiveDate,
    /// Clock-in instant.
    pub start_time: DateTime<Utc>,
}

impl NewShift {
    /// Builds the fields for a shift starting at `start_time`.
    pub fn starting_at(worker_id: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            worker_id: worker_id.into(),
            date: start_time.date_naive(),
            start_time,
        }
    }

    /// Turns the fields into a full active record with the given id.
    pub fn into_shift(self, id: i64) -> Shift {
        Shift {
            id,
            worker_id: self.worker_id,
            date: self.date,
            start_time: self.start_time,
            end_time: None,
            status: ShiftStatus::Active,
            break_start: None,
            break_end: None,
            break_duration_minutes: 0,
            raw_hours: None,
            effective_hours: None,
        }
    }
}

/// A break segment closed as part of clock-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedBreak {
    /// The instant the segment closed.
    pub break_end: DateTime<Utc>,
    /// Running total including the closed segment.
    pub break_duration_minutes: i64,
}

/// The fields a single transition writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftUpdate {
    /// `active` to `on_break`.
    StartBreak {
        /// Start of the new segment.
        break_start: DateTime<Utc>,
    },
    /// `on_break` to `active`.
    EndBreak {
        /// End of the closed segment.
        break_end: DateTime<Utc>,
        /// Running total including the closed segment.
        break_duration_minutes: i64,
    },
    /// Any open status to `completed`.
    Complete {
        /// Clock-out instant.
        end_time: DateTime<Utc>,
        /// Rounded raw hours.
        raw_hours: Decimal,
        /// Rounded effective hours.
        effective_hours: Decimal,
        /// Present only if the shift was on break at clock-out.
        closed_break: Option<ClosedBreak>,
    },
}

impl ShiftUpdate {
    /// The status the shift holds once the update is applied.
    pub fn resulting_status(&self) -> ShiftStatus {
        match self {
            ShiftUpdate::StartBreak { .. } => ShiftStatus::OnBreak,
            ShiftUpdate::EndBreak { .. } => ShiftStatus::Active,
            ShiftUpdate::Complete { .. } => ShiftStatus::Completed,
        }
    }
}
