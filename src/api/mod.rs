//! HTTP API module for the shift engine.
//!
//! This module exposes the clock-in, break and clock-out transitions, the
//! worker's current shift and history, and the team summary report.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{HistoryQuery, SummaryQuery, WORKER_ID_HEADER, worker_id};
pub use response::{ActionResponse, ApiError, ApiErrorResponse, CurrentShiftResponse, status_for};
pub use state::AppState;
