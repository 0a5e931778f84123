//! Worker profile model.
//!
//! Reporting reads these profiles to name workers and price their hours.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A worker's profile as seen by reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier, matching `Shift::worker_id`.
    pub id: String,
    /// Display name, if the worker has set one.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Pay per effective hour.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

impl Worker {
    /// Returns the worker's name, or `"Unknown"` when unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_engine::models::Worker;
    ///
    /// let worker = Worker { id: "w1".to_string(), full_name: None, hourly_rate: None };
    /// assert_eq!(worker.display_name(), "Unknown");
    /// ```
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Unknown",
        }
    }

    /// Returns the hourly rate, treating a missing rate as zero.
    pub fn rate(&self) -> Decimal {
        self.hourly_rate.unwrap_or(Decimal::ZERO)
    }
}
