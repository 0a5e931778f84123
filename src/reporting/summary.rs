//! Aggregation over shift records.
//!
//! Pure functions: they take shifts and worker profiles already loaded and
//! never touch a store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    BreakRounding, break_segment_minutes, earnings, effective_hours, elapsed_hours, round2,
    settle_hours,
};
use crate::models::{ReportPeriod, Shift, ShiftStatus, Worker};

const UNKNOWN_WORKER: &str = "Unknown";

/// Break minutes to use when recomputing hours for a stored shift.
///
/// Older records may have zero minutes recorded while still carrying the
/// timestamps of their break. In that case the minutes are rebuilt from
/// `break_start..break_end` under `rounding`.
pub fn recorded_break_minutes(shift: &Shift, rounding: BreakRounding) -> i64 {
    if shift.break_duration_minutes > 0 {
        return shift.break_duration_minutes;
    }
    match (shift.break_start, shift.break_end) {
        (Some(start), Some(end)) => break_segment_minutes(start, end, rounding),
        _ => 0,
    }
}

/// Effective hours a completed shift contributes to totals.
///
/// Uses the stored figure when present, otherwise recomputes it from the
/// shift's times and [`recorded_break_minutes`]. Shifts that are not
/// completed, or that lack an end time to recompute from, contribute nothing.
pub fn worked_hours(shift: &Shift, rounding: BreakRounding) -> Option<Decimal> {
    if shift.status != ShiftStatus::Completed {
        return None;
    }
    if let Some(stored) = shift.effective_hours {
        return Some(stored);
    }
    let end = shift.end_time?;
    let break_minutes = recorded_break_minutes(shift, rounding);
    Some(settle_hours(shift.start_time, end, break_minutes).effective_hours)
}

/// Live figures for a shift that is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftProgress {
    /// Hours since clock-in.
    pub elapsed_hours: Decimal,
    /// Closed break minutes plus the open segment, if any.
    pub break_minutes: i64,
    /// Elapsed hours minus break hours, clamped at zero.
    pub effective_hours: Decimal,
}

/// Figures for an open shift as of `now`, rounded to two places.
///
/// An open break segment is counted with the same `rounding` the state
/// machine will apply when it closes.
pub fn shift_progress(shift: &Shift, now: DateTime<Utc>, rounding: BreakRounding) -> ShiftProgress {
    let end = shift.end_time.unwrap_or(now);
    let mut break_minutes = shift.break_duration_minutes;
    if shift.status == ShiftStatus::OnBreak {
        if let Some(break_start) = shift.break_start {
            break_minutes += break_segment_minutes(break_start, end, rounding);
        }
    }

    let raw = elapsed_hours(shift.start_time, end);
    ShiftProgress {
        elapsed_hours: round2(raw),
        break_minutes,
        effective_hours: round2(effective_hours(raw, break_minutes)),
    }
}

/// An open shift as listed in a team summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveShiftEntry {
    /// The shift's id.
    pub shift_id: i64,
    /// The owning worker.
    pub worker_id: String,
    /// Display name, `"Unknown"` without a profile.
    pub worker_name: String,
    /// `active` or `on_break`.
    pub status: ShiftStatus,
    /// Clock-in instant.
    pub start_time: DateTime<Utc>,
    /// Hours worked so far.
    pub progress: ShiftProgress,
}

/// A completed shift as listed in a team summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedShiftEntry {
    /// The shift's id.
    pub shift_id: i64,
    /// The owning worker.
    pub worker_id: String,
    /// Display name, `"Unknown"` without a profile.
    pub worker_name: String,
    /// Clock-in instant.
    pub start_time: DateTime<Utc>,
    /// Clock-out instant.
    pub end_time: Option<DateTime<Utc>>,
    /// Effective hours counted for the shift.
    pub effective_hours: Decimal,
    /// Effective hours times the worker's hourly rate.
    pub earnings: Decimal,
}

/// One worker's totals within a team summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerTotals {
    /// The worker's id.
    pub worker_id: String,
    /// Display name, `"Unknown"` without a profile.
    pub name: String,
    /// Completed shifts counted.
    pub completed_shifts: usize,
    /// Sum of effective hours.
    pub effective_hours: Decimal,
    /// Effective hours times the worker's hourly rate.
    pub earnings: Decimal,
}

/// Team-wide view of a reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    /// The dates covered.
    pub period: ReportPeriod,
    /// Shifts that are active and not on break.
    pub active_now: usize,
    /// Shifts that are on break.
    pub on_break_now: usize,
    /// Every shift that started in the window, whatever its status.
    pub total_shifts: usize,
    /// Completed shifts counted in the totals.
    pub completed_count: usize,
    /// Sum of effective hours over completed shifts.
    pub total_effective_hours: Decimal,
    /// Sum of earnings over completed shifts.
    pub total_earnings: Decimal,
    /// Open shifts with live progress, newest start first.
    pub active_shifts: Vec<ActiveShiftEntry>,
    /// Completed shifts, in the order they were loaded.
    pub completed_shifts: Vec<CompletedShiftEntry>,
    /// Per-worker totals, sorted by name then id.
    pub workers: Vec<WorkerTotals>,
}

/// Aggregates `shifts` that started within `period`.
///
/// Open shifts are measured up to `now`. Cancelled shifts count toward
/// `total_shifts` only. Workers without a profile are priced at zero.
pub fn summarize_team(
    period: ReportPeriod,
    shifts: &[Shift],
    workers: &[Worker],
    now: DateTime<Utc>,
    rounding: BreakRounding,
) -> TeamSummary {
    let profiles: HashMap<&str, &Worker> = workers.iter().map(|w| (w.id.as_str(), w)).collect();
    let mut per_worker: HashMap<&str, WorkerTotals> = HashMap::new();

    let mut summary = TeamSummary {
        period,
        active_now: 0,
        on_break_now: 0,
        total_shifts: shifts.len(),
        completed_count: 0,
        total_effective_hours: Decimal::ZERO,
        total_earnings: Decimal::ZERO,
        active_shifts: Vec::new(),
        completed_shifts: Vec::new(),
        workers: Vec::new(),
    };

    for shift in shifts {
        let profile = profiles.get(shift.worker_id.as_str());
        let name = profile.map_or(UNKNOWN_WORKER, |w| w.display_name());

        match shift.status {
            ShiftStatus::Active => summary.active_now += 1,
            ShiftStatus::OnBreak => summary.on_break_now += 1,
            ShiftStatus::Completed | ShiftStatus::Cancelled => {}
        }
        if shift.is_open() {
            summary.active_shifts.push(ActiveShiftEntry {
                shift_id: shift.id,
                worker_id: shift.worker_id.clone(),
                worker_name: name.to_string(),
                status: shift.status,
                start_time: shift.start_time,
                progress: shift_progress(shift, now, rounding),
            });
        }

        let Some(hours) = worked_hours(shift, rounding) else {
            continue;
        };

        let rate = profile.map(|w| w.rate()).unwrap_or(Decimal::ZERO);
        let pay = earnings(hours, rate);

        summary.completed_count += 1;
        summary.total_effective_hours += hours;
        summary.total_earnings += pay;
        summary.completed_shifts.push(CompletedShiftEntry {
            shift_id: shift.id,
            worker_id: shift.worker_id.clone(),
            worker_name: name.to_string(),
            start_time: shift.start_time,
            end_time: shift.end_time,
            effective_hours: hours,
            earnings: pay,
        });

        let totals = per_worker
            .entry(shift.worker_id.as_str())
            .or_insert_with(|| WorkerTotals {
                worker_id: shift.worker_id.clone(),
                name: name.to_string(),
                completed_shifts: 0,
                effective_hours: Decimal::ZERO,
                earnings: Decimal::ZERO,
            });
        totals.completed_shifts += 1;
        totals.effective_hours += hours;
        totals.earnings += pay;
    }

    summary.active_shifts.sort_by(|a, b| {
        b.start_time
            .cmp(&a.start_time)
            .then_with(|| b.shift_id.cmp(&a.shift_id))
    });
    summary.workers = per_worker.into_values().collect();
    summary
        .workers
        .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.worker_id.cmp(&b.worker_id)));
    summary
}

/// Totals over a worker's completed shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTotals {
    /// Completed shifts counted.
    pub count: usize,
    /// Sum of effective hours.
    pub total_hours: Decimal,
    /// Sum of earnings at the worker's rate.
    pub total_earnings: Decimal,
}

/// Totals for one worker's shifts at `hourly_rate`.
pub fn summarize_history(
    shifts: &[Shift],
    hourly_rate: Decimal,
    rounding: BreakRounding,
) -> HistoryTotals {
    shifts
        .iter()
        .filter_map(|shift| worked_hours(shift, rounding))
        .fold(
            HistoryTotals {
                count: 0,
                total_hours: Decimal::ZERO,
                total_earnings: Decimal::ZERO,
            },
            |mut totals, hours| {
                totals.count += 1;
                totals.total_hours += hours;
                totals.total_earnings += earnings(hours, hourly_rate);
                totals
            },
        )
}
