//! Error types for the shift engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every way a shift transition, a report, or configuration loading
//! can fail.

use thiserror::Error;

/// The main error type for the shift engine.
///
/// Every transition of the shift state machine returns this error type.
/// None of them escape the transition boundary: [`crate::models::ActionResult`]
/// turns each one into a structured failure for the caller.
///
/// # Example
///
/// ```
/// use shift_engine::error::ShiftError;
///
/// let error = ShiftError::Store {
///     context: "Failed to start shift".to_string(),
///     message: "connection reset".to_string(),
/// };
/// assert_eq!(error.to_string(), "Failed to start shift: connection reset");
/// ```
#[derive(Debug, Error)]
pub enum ShiftError {
    /// The worker already has an open (active or on-break) shift.
    #[error("You already have an active shift.")]
    AlreadyActive,

    /// The worker tried to start a break while already on one.
    #[error("You are already on a break.")]
    AlreadyOnBreak,

    /// No active shift exists to start a break on.
    #[error("No active shift found to start break.")]
    NoActiveShift,

    /// No shift is currently on break.
    #[error("No active break to end.")]
    NoActiveBreak,

    /// The shift is on break but carries no break start timestamp.
    ///
    /// This is a data-integrity fault and needs a manual correction.
    #[error("Cannot end break: break start time not found.")]
    MissingBreakStart {
        /// The ID of the corrupted shift.
        shift_id: i64,
    },

    /// The shift does not exist or does not belong to the worker.
    #[error("Shift not found or already ended.")]
    ShiftNotFound {
        /// The ID that was looked up.
        shift_id: i64,
    },

    /// The shift is already completed or cancelled.
    #[error("Shift is already ended.")]
    AlreadyEnded {
        /// The ID of the ended shift.
        shift_id: i64,
    },

    /// No authenticated worker identity was supplied.
    #[error("Not authenticated")]
    Unauthenticated,

    /// A data-access failure, including timeouts and rejected writes.
    #[error("{context}: {message}")]
    Store {
        /// What the engine was doing when the store failed.
        context: String,
        /// The underlying store message.
        message: String,
    },

    /// A request parameter could not be interpreted.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// A description of the problem.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl ShiftError {
    /// Returns a stable, machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ShiftError::AlreadyActive => "ALREADY_ACTIVE",
            ShiftError::AlreadyOnBreak => "ALREADY_ON_BREAK",
            ShiftError::NoActiveShift => "NO_ACTIVE_SHIFT",
            ShiftError::NoActiveBreak => "NO_ACTIVE_BREAK",
            ShiftError::MissingBreakStart { .. } => "MISSING_BREAK_START",
            ShiftError::ShiftNotFound { .. } => "SHIFT_NOT_FOUND",
            ShiftError::AlreadyEnded { .. } => "ALREADY_ENDED",
            ShiftError::Unauthenticated => "UNAUTHENTICATED",
            ShiftError::Store { .. } => "STORE_ERROR",
            ShiftError::InvalidRequest { .. } => "INVALID_REQUEST",
            ShiftError::ConfigNotFound { .. } | ShiftError::ConfigParseError { .. } => {
                "CONFIG_ERROR"
            }
        }
    }
}

/// A type alias for Results that return ShiftError.
pub type ShiftResult<T> = Result<T, ShiftError>;
