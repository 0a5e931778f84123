//! In-process shift store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::{NewShift, Shift, ShiftStatus, ShiftUpdate, Worker};

use super::{ReportingStore, ShiftQuery, ShiftStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    shifts: BTreeMap<i64, Shift>,
    workers: HashMap<String, Worker>,
    last_id: i64,
}

impl Inner {
    fn open_shift(&self, worker_id: &str) -> Option<&Shift> {
        self.shifts
            .values()
            .find(|s| s.worker_id == worker_id && s.is_open())
    }
}

/// Shift store held in memory behind a single lock.
///
/// Every write takes the write lock for the whole check-and-write, which is
/// what makes the open-shift check on insert and the status check on update
/// atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with worker profiles.
    pub fn with_workers(workers: impl IntoIterator<Item = Worker>) -> Self {
        let inner = Inner {
            workers: workers.into_iter().map(|w| (w.id.clone(), w)).collect(),
            ..Inner::default()
        };
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Adds or replaces a worker profile.
    pub async fn upsert_worker(&self, worker: Worker) {
        let mut inner = self.inner.write().await;
        inner.workers.insert(worker.id.clone(), worker);
    }

    /// Writes a record verbatim, bypassing every transition rule.
    ///
    /// This is the administrative correction path; it also lets tests seed
    /// records in states the state machine would never produce.
    pub async fn put_shift(&self, shift: Shift) {
        let mut inner = self.inner.write().await;
        inner.last_id = inner.last_id.max(shift.id);
        inner.shifts.insert(shift.id, shift);
    }

    /// Voids a shift, excluding it from worked-hours totals.
    ///
    /// Returns the cancelled record, or `None` if no such shift exists.
    pub async fn cancel_shift(&self, shift_id: i64) -> Option<Shift> {
        let mut inner = self.inner.write().await;
        let shift = inner.shifts.get_mut(&shift_id)?;
        shift.status = ShiftStatus::Cancelled;
        debug!(shift_id, "Shift cancelled");
        Some(shift.clone())
    }
}

#[async_trait]
impl ShiftStore for MemoryStore {
    async fn find_open_shift(&self, worker_id: &str) -> Result<Option<Shift>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.open_shift(worker_id).cloned())
    }

    async fn find_shift_by_status(
        &self,
        worker_id: &str,
        status: ShiftStatus,
    ) -> Result<Option<Shift>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .shifts
            .values()
            .find(|s| s.worker_id == worker_id && s.status == status && s.end_time.is_none())
            .cloned())
    }

    async fn insert_shift(&self, new_shift: NewShift) -> Result<Shift, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.open_shift(&new_shift.worker_id).is_some() {
            return Err(StoreError::OpenShiftExists {
                worker_id: new_shift.worker_id,
            });
        }

        inner.last_id += 1;
        let shift = new_shift.into_shift(inner.last_id);
        inner.shifts.insert(shift.id, shift.clone());
        Ok(shift)
    }

    async fn update_shift(
        &self,
        shift_id: i64,
        worker_id: &str,
        expected: ShiftStatus,
        update: &ShiftUpdate,
    ) -> Result<Shift, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.shifts.get_mut(&shift_id) {
            Some(shift) if shift.worker_id == worker_id && shift.status == expected => {
                shift.apply(update);
                Ok(shift.clone())
            }
            _ => Err(StoreError::StaleWrite { shift_id, expected }),
        }
    }

    async fn get_shift(
        &self,
        shift_id: i64,
        worker_id: &str,
    ) -> Result<Option<Shift>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .shifts
            .get(&shift_id)
            .filter(|s| s.worker_id == worker_id)
            .cloned())
    }
}

#[async_trait]
impl ReportingStore for MemoryStore {
    async fn query_shifts(&self, query: &ShiftQuery) -> Result<Vec<Shift>, StoreError> {
        let inner = self.inner.read().await;
        let mut shifts: Vec<Shift> = inner
            .shifts
            .values()
            .filter(|s| query.matches(s))
            .cloned()
            .collect();
        shifts.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(b.id.cmp(&a.id)));
        Ok(shifts)
    }

    async fn shift(&self, shift_id: i64) -> Result<Option<Shift>, StoreError> {
        Ok(self.inner.read().await.shifts.get(&shift_id).cloned())
    }

    async fn workers(&self, worker_ids: &[String]) -> Result<Vec<Worker>, StoreError> {
        let inner = self.inner.read().await;
        Ok(worker_ids
            .iter()
            .filter_map(|id| inner.workers.get(id).cloned())
            .collect())
    }
}
