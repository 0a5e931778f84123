//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{ShiftError, ShiftResult};

use super::types::ServiceConfig;

/// Loads and provides access to the service configuration.
///
/// # File Format
///
/// ```yaml
/// server:
///   bind_address: "127.0.0.1:3000"
/// store:
///   timeout_ms: 5000
/// calculation:
///   break_rounding: nearest   # or floor
/// ```
///
/// # Example
///
/// ```
/// use shift_engine::calculation::BreakRounding;
/// use shift_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::from_yaml_str("calculation:\n  break_rounding: floor\n").unwrap();
/// assert_eq!(loader.config().calculation.break_rounding, BreakRounding::Floor);
/// assert_eq!(loader.config().store.timeout_ms, 5000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ServiceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if the file cannot be read
    /// - `ConfigParseError` if the file is not valid configuration YAML
    pub fn load<P: AsRef<Path>>(path: P) -> ShiftResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ShiftError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, &path_str)
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> ShiftResult<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> ShiftResult<Self> {
        // serde_yaml reads an empty document as null, not as an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config = serde_yaml::from_str::<ServiceConfig>(content).map_err(|e| {
            ShiftError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> ServiceConfig {
        self.config
    }
}
