//! Error types for the Liveboard API server.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can
//! be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use liveboard_core::{GridError, HubError};

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A request carried input the server could not parse.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A widget rejected the mutation (typically out-of-bounds
    /// coordinates).
    #[error("rejected: {0}")]
    Rejected(#[from] GridError),

    /// The backing hub worker is gone; the process is shutting down.
    #[error("hub unavailable: {0}")]
    HubUnavailable(#[from] HubError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MalformedInput(_) | Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::HubUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
