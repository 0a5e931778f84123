//! Reports over recorded shifts.
//!
//! - [`summary`]: pure aggregation (team totals, history totals, live
//!   progress of an open shift)
//! - [`Reporter`]: loads shifts through the elevated [`ReportingStore`] and
//!   hands them to the aggregation functions
//!
//! [`ReportingStore`]: crate::store::ReportingStore

mod service;
pub mod summary;

pub use service::{HistoryFilter, Reporter, ShiftDetail, WorkerHistory};
pub use summary::{
    ActiveShiftEntry, CompletedShiftEntry, HistoryTotals, ShiftProgress, TeamSummary,
    WorkerTotals, recorded_break_minutes, shift_progress, summarize_history, summarize_team,
    worked_hours,
};
