//! Axum router construction for the Liveboard server.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin widget embedding.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Liveboard server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /api/status` -- server and widget status
/// - `GET /api/life`, `POST /api/life/flip` -- Game of Life
/// - `GET /api/checks`, `POST /api/checks/tile` -- checkbox grid
/// - `GET /api/anim` -- animation sample
/// - `GET /ws/life`, `/ws/checks`, `/ws/anim` -- live update streams
/// - `GET /ws/clock` -- per-session tick counter stream
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        .route("/api/status", get(handlers::status))
        // WebSocket streams
        .route("/ws/life", get(ws::ws_life))
        .route("/ws/checks", get(ws::ws_checks))
        .route("/ws/anim", get(ws::ws_anim))
        .route("/ws/clock", get(ws::ws_clock))
        // REST API
        .route("/api/life", get(handlers::get_life))
        .route("/api/life/flip", post(handlers::flip_tile))
        .route("/api/checks", get(handlers::get_checks))
        .route("/api/checks/tile", post(handlers::set_tile))
        .route("/api/anim", get(handlers::get_anim))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
