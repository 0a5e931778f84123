//! Data store abstraction for shift records.
//!
//! Two traits split the access paths:
//!
//! - [`ShiftStore`] is worker-scoped and used by the state machine. Every
//!   read and write is keyed on the worker that owns the shift.
//! - [`ReportingStore`] is the elevated, read-only path used by reporting.
//!   It can see every worker's shifts but never writes.
//!
//! [`MemoryStore`] implements both.

mod memory;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{NewShift, Shift, ShiftStatus, ShiftUpdate, Worker};

pub use memory::MemoryStore;

/// A data-access failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Inserting would give the worker a second open shift.
    #[error("worker '{worker_id}' already has an open shift")]
    OpenShiftExists {
        /// The worker whose open shift blocked the insert.
        worker_id: String,
    },

    /// A conditional update matched no row in the expected state.
    #[error("shift {shift_id} is no longer '{expected}'")]
    StaleWrite {
        /// The shift that was targeted.
        shift_id: i64,
        /// The status the write required.
        expected: ShiftStatus,
    },

    /// The store did not answer in time.
    #[error("timed out after {millis}ms")]
    Timeout {
        /// The timeout that elapsed.
        millis: u64,
    },

    /// Any other backend failure.
    #[error("{0}")]
    Backend(String),
}

/// Awaits a store call, failing with [`StoreError::Timeout`] after `timeout`.
pub async fn with_timeout<T, F>(timeout: Duration, future: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout {
            millis: timeout.as_millis() as u64,
        }),
    }
}

/// Worker-scoped access used by the shift state machine.
#[async_trait]
pub trait ShiftStore: Send + Sync {
    /// The worker's shift with status `active` or `on_break`, if any.
    async fn find_open_shift(&self, worker_id: &str) -> Result<Option<Shift>, StoreError>;

    /// The worker's open shift in exactly `status`, if any.
    async fn find_shift_by_status(
        &self,
        worker_id: &str,
        status: ShiftStatus,
    ) -> Result<Option<Shift>, StoreError>;

    /// Creates an `active` shift.
    ///
    /// Must fail with [`StoreError::OpenShiftExists`] if the worker already
    /// has an open shift, checked atomically with the insert.
    async fn insert_shift(&self, new_shift: NewShift) -> Result<Shift, StoreError>;

    /// Applies `update` to the shift matching both ids and `expected` status.
    ///
    /// Must fail with [`StoreError::StaleWrite`] when no shift matches all
    /// three, leaving the record untouched.
    async fn update_shift(
        &self,
        shift_id: i64,
        worker_id: &str,
        expected: ShiftStatus,
        update: &ShiftUpdate,
    ) -> Result<Shift, StoreError>;

    /// The shift with `shift_id` if it belongs to `worker_id`.
    async fn get_shift(&self, shift_id: i64, worker_id: &str)
    -> Result<Option<Shift>, StoreError>;
}

/// Filter for [`ReportingStore::query_shifts`].
///
/// Every unset field matches everything. The start-time window is half-open:
/// `started_from <= start_time < started_before`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftQuery {
    /// Only shifts owned by this worker.
    pub worker_id: Option<String>,
    /// Only shifts in this status.
    pub status: Option<ShiftStatus>,
    /// Only shifts starting at or after this instant.
    pub started_from: Option<DateTime<Utc>>,
    /// Only shifts starting before this instant.
    pub started_before: Option<DateTime<Utc>>,
}

impl ShiftQuery {
    /// Returns true if `shift` passes every filter.
    pub fn matches(&self, shift: &Shift) -> bool {
        self.worker_id
            .as_deref()
            .is_none_or(|worker_id| shift.worker_id == worker_id)
            && self.status.is_none_or(|status| shift.status == status)
            && self
                .started_from
                .is_none_or(|from| shift.start_time >= from)
            && self
                .started_before
                .is_none_or(|before| shift.start_time < before)
    }
}

/// Elevated, read-only access used by reporting.
#[async_trait]
pub trait ReportingStore: Send + Sync {
    /// Every shift matching `query`, newest start first.
    async fn query_shifts(&self, query: &ShiftQuery) -> Result<Vec<Shift>, StoreError>;

    /// The shift with `shift_id`, whoever owns it.
    async fn shift(&self, shift_id: i64) -> Result<Option<Shift>, StoreError>;

    /// Profiles for the given worker ids. Unknown ids are skipped.
    async fn workers(&self, worker_ids: &[String]) -> Result<Vec<Worker>, StoreError>;
}
