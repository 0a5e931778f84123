//! Shift tracking engine for hourly workers.
//!
//! This crate records clock-in, break and clock-out events as a per-worker
//! state machine, turns completed shifts into raw and effective hours, and
//! reports worked hours and earnings per worker and per team.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod reporting;
pub mod state_machine;
pub mod store;
