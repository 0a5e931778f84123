//! Configuration types for the shift engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section and
//! field has a default, so an empty file is a valid configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::calculation::BreakRounding;

/// Default address the HTTP server binds to.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

/// Default timeout for a single store call, in milliseconds.
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

/// Data store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Upper bound on any single store call, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
        }
    }
}

impl StoreConfig {
    /// The store timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Time and pay calculation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalculationConfig {
    /// Rounding applied to every closed break segment.
    pub break_rounding: BreakRounding,
}

/// The complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Data store settings.
    pub store: StoreConfig,
    /// Calculation settings.
    pub calculation: CalculationConfig,
}
