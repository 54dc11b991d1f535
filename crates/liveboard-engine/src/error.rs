//! Error types for the Liveboard engine binary.

use liveboard_core::GridError;
use liveboard_server::ServerError;

use crate::config::ConfigError;

/// Errors that can abort engine startup.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded or parsed.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A widget board could not be constructed.
    #[error("board error: {0}")]
    Board(#[from] GridError),

    /// The HTTP server failed to start or serve.
    #[error("server error: {0}")]
    Server(#[from] ServerError),
}
