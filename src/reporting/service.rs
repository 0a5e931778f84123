use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::summary::{
    ShiftProgress, TeamSummary, shift_progress, summarize_history, summarize_team, worked_hours,
};
use crate::calculation::{BreakRounding, earnings};
use crate::clock::Clock;
use crate::config::{DEFAULT_STORE_TIMEOUT_MS, ServiceConfig};
use crate::error::{ShiftError, ShiftResult};
use crate::models::{ReportPeriod, Shift, ShiftStatus};
use crate::store::{ReportingStore, ShiftQuery, StoreError, with_timeout};

const REPORT_LOAD_CONTEXT: &str = "Failed to load report data";

/// How far back a worker's history reaches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryFilter {
    /// Since Monday 00:00 UTC of the current week.
    Week,
    /// Since the first of the current month, 00:00 UTC.
    #[default]
    Month,
    /// Everything.
    All,
}

impl HistoryFilter {
    /// The earliest start time included, or `None` for no lower bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_engine::reporting::HistoryFilter;
    /// use chrono::{TimeZone, Utc};
    ///
    /// // A Thursday.
    /// let now = Utc.with_ymd_and_hms(2026, 1, 15, 14, 30, 0).unwrap();
    /// assert_eq!(
    ///     HistoryFilter::Week.since(now),
    ///     Some(Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap())
    /// );
    /// assert_eq!(HistoryFilter::All.since(now), None);
    /// ```
    pub fn since(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let today = now.date_naive();
        let first_day = match self {
            HistoryFilter::Week => {
                today - Days::new(u64::from(today.weekday().num_days_from_monday()))
            }
            HistoryFilter::Month => today.with_day(1).unwrap_or(today),
            HistoryFilter::All => return None,
        };
        Some(first_day.and_time(NaiveTime::MIN).and_utc())
    }
}

/// A worker's completed shifts with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerHistory {
    /// The worker the history belongs to.
    pub worker_id: String,
    /// The window applied.
    pub filter: HistoryFilter,
    /// Completed shifts, newest first.
    pub shifts: Vec<Shift>,
    /// Number of completed shifts.
    pub count: usize,
    /// Sum of effective hours.
    pub total_hours: Decimal,
    /// Sum of effective hours times the worker's hourly rate.
    pub total_earnings: Decimal,
}

/// One shift as a manager sees it.
///
/// Completed shifts carry `worked_hours` and `earnings`; open shifts carry
/// `progress` measured up to now. Cancelled shifts carry neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDetail {
    /// The stored record.
    pub shift: Shift,
    /// Display name, `"Unknown"` without a profile.
    pub worker_name: String,
    /// The worker's rate, zero without a profile.
    pub hourly_rate: Decimal,
    /// Effective hours, for completed shifts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worked_hours: Option<Decimal>,
    /// Worked hours times the hourly rate, for completed shifts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings: Option<Decimal>,
    /// Live figures, for open shifts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ShiftProgress>,
}

/// Read-only reports over every worker's shifts.
///
/// Sits on the elevated [`ReportingStore`] path. Callers are expected to
/// have checked the requester's role before reaching this type.
#[derive(Clone)]
pub struct Reporter {
    store: Arc<dyn ReportingStore>,
    clock: Arc<dyn Clock>,
    store_timeout: Duration,
    break_rounding: BreakRounding,
}

impl Reporter {
    /// Creates a reporter with the default store timeout.
    pub fn new(store: Arc<dyn ReportingStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
            break_rounding: BreakRounding::default(),
        }
    }

    /// Creates a reporter using the store timeout and break rounding from
    /// `config`.
    pub fn from_config(
        store: Arc<dyn ReportingStore>,
        clock: Arc<dyn Clock>,
        config: &ServiceConfig,
    ) -> Self {
        Self::new(store, clock)
            .with_store_timeout(config.store.timeout())
            .with_break_rounding(config.calculation.break_rounding)
    }

    /// Sets the upper bound on each store call.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Sets the rounding used for open breaks and for breaks rebuilt from
    /// their timestamps.
    pub fn with_break_rounding(mut self, rounding: BreakRounding) -> Self {
        self.break_rounding = rounding;
        self
    }

    /// Today's UTC date according to the reporter's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    /// Team totals for shifts that started within `period`.
    pub async fn team_summary(&self, period: ReportPeriod) -> ShiftResult<TeamSummary> {
        let query = ShiftQuery {
            started_from: Some(period.start_instant()),
            started_before: Some(period.end_instant_exclusive()),
            ..ShiftQuery::default()
        };
        let shifts = with_timeout(self.store_timeout, self.store.query_shifts(&query))
            .await
            .map_err(report_failure)?;

        let worker_ids: Vec<String> = shifts
            .iter()
            .map(|s| s.worker_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let workers = with_timeout(self.store_timeout, self.store.workers(&worker_ids))
            .await
            .map_err(report_failure)?;

        debug!(
            start = %period.start_date,
            end = %period.end_date,
            shifts = shifts.len(),
            "Built team summary"
        );
        Ok(summarize_team(
            period,
            &shifts,
            &workers,
            self.clock.now(),
            self.break_rounding,
        ))
    }

    /// `worker_id`'s completed shifts within `filter`, priced at their rate.
    pub async fn worker_history(
        &self,
        worker_id: &str,
        filter: HistoryFilter,
    ) -> ShiftResult<WorkerHistory> {
        let worker_id = worker_id.trim();
        if worker_id.is_empty() {
            return Err(ShiftError::Unauthenticated);
        }

        let query = ShiftQuery {
            worker_id: Some(worker_id.to_string()),
            status: Some(ShiftStatus::Completed),
            started_from: filter.since(self.clock.now()),
            started_before: None,
        };
        let shifts = with_timeout(self.store_timeout, self.store.query_shifts(&query))
            .await
            .map_err(report_failure)?;
        let rate = with_timeout(
            self.store_timeout,
            self.store.workers(&[worker_id.to_string()]),
        )
        .await
        .map_err(report_failure)?
        .first()
        .map(|w| w.rate())
        .unwrap_or(Decimal::ZERO);

        let totals = summarize_history(&shifts, rate, self.break_rounding);
        Ok(WorkerHistory {
            worker_id: worker_id.to_string(),
            filter,
            shifts,
            count: totals.count,
            total_hours: totals.total_hours,
            total_earnings: totals.total_earnings,
        })
    }

    /// A single shift with its worker's name and pay figures.
    ///
    /// # Errors
    ///
    /// `ShiftNotFound` if no shift has `shift_id`.
    pub async fn shift_detail(&self, shift_id: i64) -> ShiftResult<ShiftDetail> {
        let shift = with_timeout(self.store_timeout, self.store.shift(shift_id))
            .await
            .map_err(report_failure)?
            .ok_or(ShiftError::ShiftNotFound { shift_id })?;
        let worker = with_timeout(
            self.store_timeout,
            self.store.workers(std::slice::from_ref(&shift.worker_id)),
        )
        .await
        .map_err(report_failure)?
        .into_iter()
        .next();

        let worker_name = worker
            .as_ref()
            .map_or("Unknown", |w| w.display_name())
            .to_string();
        let hourly_rate = worker.map(|w| w.rate()).unwrap_or(Decimal::ZERO);
        let worked = worked_hours(&shift, self.break_rounding);
        let progress = shift
            .is_open()
            .then(|| shift_progress(&shift, self.clock.now(), self.break_rounding));

        debug!(shift_id, worker_id = %shift.worker_id, "Loaded shift detail");
        Ok(ShiftDetail {
            worker_name,
            hourly_rate,
            worked_hours: worked,
            earnings: worked.map(|hours| earnings(hours, hourly_rate)),
            progress,
            shift,
        })
    }
}

fn report_failure(err: StoreError) -> ShiftError {
    error!(error = %err, "{}", REPORT_LOAD_CONTEXT);
    ShiftError::Store {
        context: REPORT_LOAD_CONTEXT.to_string(),
        message: err.to_string(),
    }
}
