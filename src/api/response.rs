//! Response types for the shift engine API.
//!
//! Transition endpoints answer with [`ActionResult`]; read endpoints answer
//! with their own body on success and [`ApiError`] on failure. Both use the
//! same status mapping from [`status_for`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::ShiftError;
use crate::models::{ActionResult, Shift};
use crate::reporting::ShiftProgress;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

/// The HTTP status for a failed operation.
pub fn status_for(error: &ShiftError) -> StatusCode {
    match error {
        ShiftError::AlreadyActive
        | ShiftError::AlreadyOnBreak
        | ShiftError::NoActiveShift
        | ShiftError::NoActiveBreak
        | ShiftError::AlreadyEnded { .. } => StatusCode::CONFLICT,
        ShiftError::ShiftNotFound { .. } => StatusCode::NOT_FOUND,
        ShiftError::MissingBreakStart { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ShiftError::Unauthenticated => StatusCode::UNAUTHORIZED,
        ShiftError::Store { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ShiftError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
        ShiftError::ConfigNotFound { .. } | ShiftError::ConfigParseError { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ShiftError> for ApiErrorResponse {
    fn from(error: ShiftError) -> Self {
        let status = status_for(&error);
        let body = match &error {
            ShiftError::MissingBreakStart { shift_id }
            | ShiftError::ShiftNotFound { shift_id }
            | ShiftError::AlreadyEnded { shift_id } => ApiError::with_details(
                error.code(),
                error.to_string(),
                format!("shift_id: {}", shift_id),
            ),
            _ => ApiError::new(error.code(), error.to_string()),
        };
        ApiErrorResponse {
            status,
            error: body,
        }
    }
}

/// An [`ActionResult`] paired with its HTTP status.
pub struct ActionResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The caller-facing result.
    pub result: ActionResult,
}

impl ActionResponse {
    /// A 200 response carrying `message`.
    pub fn success(message: &str) -> Self {
        Self {
            status: StatusCode::OK,
            result: ActionResult::success(message),
        }
    }

    /// A failure response with the status mapped from `error`.
    pub fn failure(error: &ShiftError) -> Self {
        Self {
            status: status_for(error),
            result: ActionResult::failure(error),
        }
    }
}

impl IntoResponse for ActionResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.result)).into_response()
    }
}

/// Body of `GET /shifts/current`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentShiftResponse {
    /// The worker's open shift, if any.
    pub shift: Option<Shift>,
    /// Live figures for `shift`, absent when there is none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ShiftProgress>,
}
