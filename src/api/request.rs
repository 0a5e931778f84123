//! Request parsing for the shift engine API.
//!
//! The worker's identity arrives in a header set by the upstream
//! authenticating proxy. Query strings are parsed into the types below.

use axum::http::HeaderMap;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ShiftError, ShiftResult};
use crate::models::ReportPeriod;
use crate::reporting::HistoryFilter;

/// Header carrying the authenticated worker's id.
pub const WORKER_ID_HEADER: &str = "x-worker-id";

/// Reads the worker id from `headers`.
///
/// A missing, non-UTF-8 or blank header is `Unauthenticated`.
pub fn worker_id(headers: &HeaderMap) -> ShiftResult<String> {
    headers
        .get(WORKER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or(ShiftError::Unauthenticated)
}

/// Query string of `GET /shifts/history`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// `week`, `month` or `all`. Defaults to `month`.
    #[serde(default)]
    pub filter: HistoryFilter,
}

/// Query string of `GET /reports/summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryQuery {
    /// First date, inclusive.
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Last date, inclusive.
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl SummaryQuery {
    /// The requested period, filling missing bounds with `today`.
    ///
    /// Reversed bounds are swapped.
    pub fn into_period(self, today: NaiveDate) -> ReportPeriod {
        ReportPeriod::new(self.start.unwrap_or(today), self.end.unwrap_or(today))
    }
}
