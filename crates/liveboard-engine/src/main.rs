//! Liveboard binary.
//!
//! This is the main entry point that wires together the three widget
//! hubs and the HTTP server. It loads configuration, spawns one hub
//! worker per widget, and serves requests until the process is
//! terminated.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `liveboard.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Spawn the widget hubs (life, checks, anim)
//! 4. Run the HTTP server

mod config;
mod error;

use std::path::Path;
use std::sync::Arc;

use liveboard_server::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::LiveboardConfig;
use crate::error::EngineError;

/// Application entry point for Liveboard.
///
/// # Errors
///
/// Returns an error if any initialization step or the server itself
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config
    //    file's filter.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    let addr = config.server.socket_addr().map_err(EngineError::Config)?;
    info!(%addr, "liveboard-engine starting");

    // 3. Spawn the widget hubs.
    let state = Arc::new(AppState::new().map_err(EngineError::Board)?);
    info!("widget hubs spawned");

    // 4. Run the HTTP server until termination.
    liveboard_server::start_server(addr, state)
        .await
        .map_err(EngineError::Server)?;

    info!("liveboard-engine shutdown complete");
    Ok(())
}

/// Load the configuration from `liveboard.yaml`.
///
/// Looks for the config file relative to the current working directory
/// and falls back to defaults when it is absent.
fn load_config() -> Result<LiveboardConfig, EngineError> {
    let config_path = Path::new("liveboard.yaml");
    if config_path.exists() {
        Ok(LiveboardConfig::from_file(config_path)?)
    } else {
        Ok(LiveboardConfig::default())
    }
}
