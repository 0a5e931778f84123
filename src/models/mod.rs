//! Core data models for the shift engine.
//!
//! This module contains the domain models shared by the state machine,
//! the stores, reporting, and the HTTP API.

mod action_result;
mod report_period;
mod shift;
mod worker;

pub use action_result::ActionResult;
pub use report_period::ReportPeriod;
pub use shift::{ClosedBreak, NewShift, Shift, ShiftStatus, ShiftUpdate};
pub use worker::Worker;
