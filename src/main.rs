//! HTTP server for the shift engine.
//!
//! Usage: `shift-engine [CONFIG_PATH]`. Without a path the built-in defaults
//! are used. Log verbosity follows `RUST_LOG` (default `info`).

use std::error::Error;
use std::sync::Arc;

use shift_engine::api::{AppState, create_router};
use shift_engine::clock::SystemClock;
use shift_engine::config::{ConfigLoader, ServiceConfig};
use shift_engine::store::MemoryStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "Loading configuration");
            ConfigLoader::load(&path)?.into_config()
        }
        None => ServiceConfig::default(),
    };

    let store = Arc::new(MemoryStore::new());
    let state = AppState::from_config(store, Arc::new(SystemClock), &config);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    info!(
        address = %config.server.bind_address,
        break_rounding = ?config.calculation.break_rounding,
        "Shift engine listening"
    );
    axum::serve(listener, router).await?;
    Ok(())
}
