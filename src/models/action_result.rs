//! Caller-facing result of a shift transition.

use serde::{Deserialize, Serialize};

use crate::error::{ShiftError, ShiftResult};

/// The result every transition hands back to its caller.
///
/// `ok == false` always comes with a human-readable `error`.
///
/// # Example
///
/// ```
/// use shift_engine::error::ShiftError;
/// use shift_engine::models::ActionResult;
///
/// let result = ActionResult::from_outcome::<()>(Err(ShiftError::NoActiveBreak), "Break ended");
/// assert!(!result.ok);
/// assert_eq!(result.error.as_deref(), Some("No active break to end."));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Whether the transition took effect.
    pub ok: bool,
    /// Confirmation text on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failure text on error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    /// A successful result carrying `message`.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: Some(message.into()),
            error: None,
        }
    }

    /// A failed result describing `error`.
    pub fn failure(error: &ShiftError) -> Self {
        Self {
            ok: false,
            message: None,
            error: Some(error.to_string()),
        }
    }

    /// Converts a transition outcome, using `message` on success.
    pub fn from_outcome<T>(outcome: ShiftResult<T>, message: &str) -> Self {
        match outcome {
            Ok(_) => Self::success(message),
            Err(err) => Self::failure(&err),
        }
    }
}
