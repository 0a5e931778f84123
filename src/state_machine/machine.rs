//! The four shift transitions.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::calculation::{BreakRounding, break_segment_minutes, settle_hours};
use crate::clock::Clock;
use crate::config::{DEFAULT_STORE_TIMEOUT_MS, ServiceConfig};
use crate::error::{ShiftError, ShiftResult};
use crate::models::{ClosedBreak, NewShift, Shift, ShiftStatus, ShiftUpdate};
use crate::store::{ShiftStore, StoreError, with_timeout};

/// A transition a worker can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftAction {
    /// Open a new shift.
    ClockIn,
    /// Pause the open shift.
    StartBreak,
    /// Resume the paused shift.
    EndBreak,
    /// Close the identified shift.
    ClockOut {
        /// The shift to close.
        shift_id: i64,
    },
}

impl ShiftAction {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            ShiftAction::ClockIn => "clock_in",
            ShiftAction::StartBreak => "start_break",
            ShiftAction::EndBreak => "end_break",
            ShiftAction::ClockOut { .. } => "clock_out",
        }
    }

    /// The confirmation shown to the worker on success.
    pub fn success_message(&self) -> &'static str {
        match self {
            ShiftAction::ClockIn => "Clocked in successfully",
            ShiftAction::StartBreak => "Break started",
            ShiftAction::EndBreak => "Break ended",
            ShiftAction::ClockOut { .. } => "Clocked out successfully",
        }
    }
}

/// Validates and executes shift transitions against a [`ShiftStore`].
///
/// Each transition reads the worker's current shift, checks the transition
/// is allowed, and writes the new state with a single conditional update
/// keyed on shift id, worker id, and the status that was read. A concurrent
/// transition that got there first turns the write into a store error
/// instead of silently overwriting it.
///
/// None of the transitions are safe to retry blindly: re-read the current
/// shift before retrying after an ambiguous failure.
#[derive(Clone)]
pub struct ShiftMachine {
    store: Arc<dyn ShiftStore>,
    clock: Arc<dyn Clock>,
    rounding: BreakRounding,
    store_timeout: Duration,
}

impl ShiftMachine {
    /// Creates a machine with nearest-minute break rounding and the default
    /// store timeout.
    pub fn new(store: Arc<dyn ShiftStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            rounding: BreakRounding::default(),
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
        }
    }

    /// Creates a machine using the rounding and timeout from `config`.
    pub fn from_config(
        store: Arc<dyn ShiftStore>,
        clock: Arc<dyn Clock>,
        config: &ServiceConfig,
    ) -> Self {
        Self::new(store, clock)
            .with_break_rounding(config.calculation.break_rounding)
            .with_store_timeout(config.store.timeout())
    }

    /// Sets the rounding applied to every closed break segment.
    pub fn with_break_rounding(mut self, rounding: BreakRounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Sets the upper bound on each store call.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// The break rounding policy in force.
    pub fn break_rounding(&self) -> BreakRounding {
        self.rounding
    }

    /// The clock transitions read "now" from.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Runs `action` for `worker_id`.
    pub async fn perform(&self, worker_id: &str, action: ShiftAction) -> ShiftResult<Shift> {
        match action {
            ShiftAction::ClockIn => self.clock_in(worker_id).await,
            ShiftAction::StartBreak => self.start_break(worker_id).await,
            ShiftAction::EndBreak => self.end_break(worker_id).await,
            ShiftAction::ClockOut { shift_id } => self.clock_out(worker_id, shift_id).await,
        }
    }

    /// Opens a new `active` shift starting now.
    ///
    /// # Errors
    ///
    /// - `AlreadyActive` if the worker has an active or on-break shift
    /// - `Store` if the lookup or insert fails
    pub async fn clock_in(&self, worker_id: &str) -> ShiftResult<Shift> {
        let worker_id = require_worker(worker_id)?;

        let open = self
            .call(self.store.find_open_shift(worker_id))
            .await
            .map_err(|e| store_failure("Error checking shift status", worker_id, e))?;

        if let Some(shift) = open {
            warn!(
                worker_id,
                shift_id = shift.id,
                status = %shift.status,
                "Clock-in rejected: worker already has an open shift"
            );
            return Err(ShiftError::AlreadyActive);
        }

        let now = self.clock.now();
        let shift = self
            .call(self.store.insert_shift(NewShift::starting_at(worker_id, now)))
            .await
            .map_err(|e| match e {
                // Lost a race against another clock-in for the same worker.
                StoreError::OpenShiftExists { .. } => {
                    warn!(worker_id, "Clock-in rejected by store: open shift exists");
                    ShiftError::AlreadyActive
                }
                other => store_failure("Failed to start shift", worker_id, other),
            })?;

        info!(worker_id, shift_id = shift.id, start_time = %shift.start_time, "Clocked in");
        Ok(shift)
    }

    /// Puts the worker's active shift on break.
    ///
    /// # Errors
    ///
    /// - `AlreadyOnBreak` if the open shift is already on break
    /// - `NoActiveShift` if there is no open shift
    /// - `Store` if a lookup or the update fails
    pub async fn start_break(&self, worker_id: &str) -> ShiftResult<Shift> {
        let worker_id = require_worker(worker_id)?;

        let active = self
            .call(self.store.find_shift_by_status(worker_id, ShiftStatus::Active))
            .await
            .map_err(|e| store_failure("Error loading shift", worker_id, e))?;

        let Some(shift) = active else {
            let on_break = self
                .call(self.store.find_shift_by_status(worker_id, ShiftStatus::OnBreak))
                .await
                .map_err(|e| store_failure("Error loading shift", worker_id, e))?;

            return Err(match on_break {
                Some(_) => {
                    warn!(worker_id, "Break start rejected: already on break");
                    ShiftError::AlreadyOnBreak
                }
                None => {
                    warn!(worker_id, "Break start rejected: no active shift");
                    ShiftError::NoActiveShift
                }
            });
        };

        let now = self.clock.now();
        let update = ShiftUpdate::StartBreak { break_start: now };
        let shift = self
            .call(
                self.store
                    .update_shift(shift.id, worker_id, ShiftStatus::Active, &update),
            )
            .await
            .map_err(|e| store_failure("Failed to start break", worker_id, e))?;

        info!(worker_id, shift_id = shift.id, break_start = %now, "Break started");
        Ok(shift)
    }

    /// Ends the worker's current break and adds its minutes to the total.
    ///
    /// # Errors
    ///
    /// - `NoActiveBreak` if no shift is on break
    /// - `MissingBreakStart` if the shift is on break without a start time
    /// - `Store` if the lookup or update fails
    pub async fn end_break(&self, worker_id: &str) -> ShiftResult<Shift> {
        let worker_id = require_worker(worker_id)?;

        let on_break = self
            .call(self.store.find_shift_by_status(worker_id, ShiftStatus::OnBreak))
            .await
            .map_err(|e| store_failure("Error loading shift", worker_id, e))?;

        let Some(shift) = on_break else {
            warn!(worker_id, "Break end rejected: no active break");
            return Err(ShiftError::NoActiveBreak);
        };

        let Some(break_start) = shift.break_start else {
            error!(
                worker_id,
                shift_id = shift.id,
                "Shift is on break but has no break start; needs manual correction"
            );
            return Err(ShiftError::MissingBreakStart { shift_id: shift.id });
        };

        let now = self.clock.now();
        let segment_minutes = break_segment_minutes(break_start, now, self.rounding);
        let total_minutes = shift.break_duration_minutes + segment_minutes;

        let update = ShiftUpdate::EndBreak {
            break_end: now,
            break_duration_minutes: total_minutes,
        };
        let shift = self
            .call(
                self.store
                    .update_shift(shift.id, worker_id, ShiftStatus::OnBreak, &update),
            )
            .await
            .map_err(|e| store_failure("Failed to end break", worker_id, e))?;

        info!(
            worker_id,
            shift_id = shift.id,
            segment_minutes,
            total_minutes,
            "Break ended"
        );
        Ok(shift)
    }

    /// Completes the identified shift, closing an open break first.
    ///
    /// Raw and effective hours are computed from the start time, now, and the
    /// accumulated break minutes, then rounded to two places. All terminal
    /// fields are written in one update.
    ///
    /// A shift on break without a break start is still clocked out; the open
    /// segment is skipped rather than guessed.
    ///
    /// # Errors
    ///
    /// - `ShiftNotFound` if the worker owns no shift with `shift_id`
    /// - `AlreadyEnded` if the shift is completed or cancelled
    /// - `Store` if the lookup or update fails
    pub async fn clock_out(&self, worker_id: &str, shift_id: i64) -> ShiftResult<Shift> {
        let worker_id = require_worker(worker_id)?;

        let found = self
            .call(self.store.get_shift(shift_id, worker_id))
            .await
            .map_err(|e| store_failure("Error loading shift", worker_id, e))?;

        let Some(shift) = found else {
            warn!(worker_id, shift_id, "Clock-out rejected: shift not found");
            return Err(ShiftError::ShiftNotFound { shift_id });
        };

        if shift.status.is_ended() {
            warn!(
                worker_id,
                shift_id,
                status = %shift.status,
                "Clock-out rejected: shift already ended"
            );
            return Err(ShiftError::AlreadyEnded { shift_id });
        }

        let now = self.clock.now();
        let mut total_break_minutes = shift.break_duration_minutes;
        let mut closed_break = None;

        if shift.status == ShiftStatus::OnBreak {
            match shift.break_start {
                Some(break_start) => {
                    total_break_minutes += break_segment_minutes(break_start, now, self.rounding);
                    closed_break = Some(ClosedBreak {
                        break_end: now,
                        break_duration_minutes: total_break_minutes,
                    });
                }
                None => {
                    error!(
                        worker_id,
                        shift_id,
                        "Shift is on break but has no break start; open segment not counted"
                    );
                }
            }
        }

        let hours = settle_hours(shift.start_time, now, total_break_minutes);
        let update = ShiftUpdate::Complete {
            end_time: now,
            raw_hours: hours.raw_hours,
            effective_hours: hours.effective_hours,
            closed_break,
        };

        let completed = self
            .call(
                self.store
                    .update_shift(shift_id, worker_id, shift.status, &update),
            )
            .await
            .map_err(|e| store_failure("Failed to end shift", worker_id, e))?;

        info!(
            worker_id,
            shift_id,
            raw_hours = %hours.raw_hours,
            effective_hours = %hours.effective_hours,
            total_break_minutes,
            was_on_break = shift.status == ShiftStatus::OnBreak,
            "Clocked out"
        );
        Ok(completed)
    }

    /// The worker's open shift, if any.
    pub async fn current_shift(&self, worker_id: &str) -> ShiftResult<Option<Shift>> {
        let worker_id = require_worker(worker_id)?;
        self.call(self.store.find_open_shift(worker_id))
            .await
            .map_err(|e| store_failure("Error checking shift status", worker_id, e))
    }

    /// Awaits a store call, giving up after the configured timeout.
    async fn call<T, F>(&self, future: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        with_timeout(self.store_timeout, future).await
    }
}

/// Rejects a blank worker identity before any store access.
fn require_worker(worker_id: &str) -> ShiftResult<&str> {
    let worker_id = worker_id.trim();
    if worker_id.is_empty() {
        return Err(ShiftError::Unauthenticated);
    }
    Ok(worker_id)
}

fn store_failure(context: &str, worker_id: &str, err: StoreError) -> ShiftError {
    error!(worker_id, error = %err, "{}", context);
    ShiftError::Store {
        context: context.to_string(),
        message: err.to_string(),
    }
}
