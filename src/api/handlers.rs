//! HTTP request handlers for the shift engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ShiftError;
use crate::reporting::shift_progress;
use crate::state_machine::ShiftAction;

use super::request::{HistoryQuery, SummaryQuery, worker_id};
use super::response::{ActionResponse, ApiErrorResponse, CurrentShiftResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts/clock-in", post(clock_in_handler))
        .route("/shifts/break/start", post(start_break_handler))
        .route("/shifts/break/end", post(end_break_handler))
        .route("/shifts/:shift_id/clock-out", post(clock_out_handler))
        .route("/shifts/current", get(current_shift_handler))
        .route("/shifts/history", get(history_handler))
        .route("/reports/summary", get(summary_handler))
        .route("/reports/shifts/:shift_id", get(shift_detail_handler))
        .with_state(state)
}

async fn clock_in_handler(State(state): State<AppState>, headers: HeaderMap) -> ActionResponse {
    run_action(&state, &headers, ShiftAction::ClockIn).await
}

async fn start_break_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ActionResponse {
    run_action(&state, &headers, ShiftAction::StartBreak).await
}

async fn end_break_handler(State(state): State<AppState>, headers: HeaderMap) -> ActionResponse {
    run_action(&state, &headers, ShiftAction::EndBreak).await
}

/// Handler for `POST /shifts/:shift_id/clock-out`.
///
/// A shift id that is not an integer is rejected the same way as any other
/// failed transition, with an `ActionResult` body.
async fn clock_out_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    shift_id: Result<Path<i64>, PathRejection>,
) -> ActionResponse {
    match shift_id {
        Ok(Path(shift_id)) => {
            run_action(&state, &headers, ShiftAction::ClockOut { shift_id }).await
        }
        Err(rejection) => {
            let error = ShiftError::InvalidRequest {
                message: rejection.body_text(),
            };
            warn!(error = %error, "Rejected clock-out path");
            ActionResponse::failure(&error)
        }
    }
}

/// Resolves the worker, runs `action` and logs the outcome under a fresh
/// correlation id.
async fn run_action(state: &AppState, headers: &HeaderMap, action: ShiftAction) -> ActionResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, action = action.name(), "Processing shift action");

    let worker_id = match worker_id(headers) {
        Ok(id) => id,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                action = action.name(),
                "Missing worker identity"
            );
            return ActionResponse::failure(&err);
        }
    };

    let started = Instant::now();
    match state.machine().perform(&worker_id, action).await {
        Ok(shift) => {
            info!(
                correlation_id = %correlation_id,
                worker_id = %worker_id,
                shift_id = shift.id,
                status = %shift.status,
                duration_us = started.elapsed().as_micros(),
                "Shift action completed"
            );
            ActionResponse::success(action.success_message())
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                worker_id = %worker_id,
                action = action.name(),
                code = err.code(),
                error = %err,
                "Shift action failed"
            );
            ActionResponse::failure(&err)
        }
    }
}

/// Handler for `GET /shifts/current`.
///
/// Returns the open shift with elapsed and effective hours as of now.
async fn current_shift_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = async {
        let worker_id = worker_id(&headers)?;
        let machine = state.machine();
        let shift = machine.current_shift(&worker_id).await?;
        let progress = shift
            .as_ref()
            .map(|s| shift_progress(s, machine.clock().now(), machine.break_rounding()));
        Ok::<_, ShiftError>(CurrentShiftResponse { shift, progress })
    }
    .await;

    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                open = body.shift.is_some(),
                "Served current shift"
            );
            Json(body).into_response()
        }
        Err(err) => error_response(correlation_id, "current shift", err),
    }
}

/// Handler for `GET /shifts/history`.
async fn history_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = async {
        let worker_id = worker_id(&headers)?;
        let Query(query) = query.map_err(invalid_query)?;
        state.reporter().worker_history(&worker_id, query.filter).await
    }
    .await;

    match result {
        Ok(history) => {
            info!(
                correlation_id = %correlation_id,
                worker_id = %history.worker_id,
                count = history.count,
                "Served shift history"
            );
            Json(history).into_response()
        }
        Err(err) => error_response(correlation_id, "shift history", err),
    }
}

/// Handler for `GET /reports/summary`.
///
/// Role checks belong to the upstream proxy; this handler assumes the
/// requester may see every worker's shifts.
async fn summary_handler(
    State(state): State<AppState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = async {
        let Query(query) = query.map_err(invalid_query)?;
        let reporter = state.reporter();
        let period = query.into_period(reporter.today());
        reporter.team_summary(period).await
    }
    .await;

    match result {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                start = %summary.period.start_date,
                end = %summary.period.end_date,
                total_shifts = summary.total_shifts,
                "Served team summary"
            );
            Json(summary).into_response()
        }
        Err(err) => error_response(correlation_id, "team summary", err),
    }
}

/// Handler for `GET /reports/shifts/:shift_id`.
///
/// Like the summary, this is a manager view and reads any worker's shift.
async fn shift_detail_handler(
    State(state): State<AppState>,
    shift_id: Result<Path<i64>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = async {
        let Path(shift_id) = shift_id.map_err(|rejection| ShiftError::InvalidRequest {
            message: rejection.body_text(),
        })?;
        state.reporter().shift_detail(shift_id).await
    }
    .await;

    match result {
        Ok(detail) => {
            info!(
                correlation_id = %correlation_id,
                shift_id = detail.shift.id,
                status = ?detail.shift.status,
                "Served shift detail"
            );
            Json(detail).into_response()
        }
        Err(err) => error_response(correlation_id, "shift detail", err),
    }
}

fn invalid_query(rejection: QueryRejection) -> ShiftError {
    ShiftError::InvalidRequest {
        message: rejection.body_text(),
    }
}

fn error_response(correlation_id: Uuid, what: &str, err: ShiftError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        code = err.code(),
        error = %err,
        "Failed to serve {}",
        what
    );
    ApiErrorResponse::from(err).into_response()
}
