//! Configuration loading for the shift engine.
//!
//! This module loads the service configuration from a YAML file: the HTTP
//! bind address, the store call timeout, and the break rounding policy.
//!
//! # Example
//!
//! ```no_run
//! use shift_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./shift-engine.yaml").unwrap();
//! println!("Listening on {}", config.config().server.bind_address);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalculationConfig, DEFAULT_BIND_ADDRESS, DEFAULT_STORE_TIMEOUT_MS, ServerConfig,
    ServiceConfig, StoreConfig,
};
