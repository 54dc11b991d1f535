//! REST endpoint handlers for the Liveboard server.
//!
//! Reads are served from each hub's published snapshot and never queue
//! behind the hub worker. Mutations are validated here, then enqueued
//! on the owning hub's command queue; the broadcast that results
//! reaches HTTP callers through their `WebSocket` sessions, not through
//! the mutation response.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/status` | Server and widget status JSON |
//! | `GET` | `/api/life` | Current Game of Life board frame |
//! | `POST` | `/api/life/flip` | Toggle one Life cell by tile id |
//! | `GET` | `/api/checks` | Current checkbox grid frame |
//! | `POST` | `/api/checks/tile` | Set one checkbox cell |
//! | `GET` | `/api/anim` | Current animation sample |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use liveboard_core::GridError;
use liveboard_core::checks::{GRID_HEIGHT, GRID_WIDTH};
use liveboard_core::life::{BOARD_HEIGHT, BOARD_WIDTH};
use liveboard_types::{AnimationSample, BoardFrame, TileDelta};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request body structs
// ---------------------------------------------------------------------------

/// Request body for the `POST /api/life/flip` endpoint.
///
/// The `id` is the composite tile identifier `"x-y"` the board UI
/// stamps on each cell element.
#[derive(Debug, serde::Deserialize)]
pub struct FlipRequest {
    /// Composite tile identifier, `"x-y"`.
    pub id: String,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing widget status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let life = state.life.snapshot().await;
    let checks = state.checks.snapshot().await;
    let anim = state.anim.snapshot().await;

    let generation = life.generation;
    let alive = life.alive;
    let checked = checks.alive;
    let phase = format!("{:.3}", anim.phase);

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Liveboard</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Liveboard</h1>
    <p class="subtitle">Server-pushed widget hub</p>

    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Life generation</div>
            <div class="value">{generation}</div>
        </div>
        <div class="metric">
            <div class="label">Life cells alive</div>
            <div class="value">{alive}</div>
        </div>
        <div class="metric">
            <div class="label">Boxes checked</div>
            <div class="value">{checked}</div>
        </div>
        <div class="metric">
            <div class="label">Animation phase</div>
            <div class="value">{phase}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/status">GET /api/status</a> -- Server and widget status</li>
        <li><a href="/api/life">GET /api/life</a> -- Current Life board frame</li>
        <li>POST /api/life/flip -- Toggle one Life cell (body: {{"id": "x-y"}})</li>
        <li><a href="/api/checks">GET /api/checks</a> -- Current checkbox grid frame</li>
        <li>POST /api/checks/tile -- Set one checkbox (body: {{"x": 0, "y": 0, "value": true}})</li>
        <li><a href="/api/anim">GET /api/anim</a> -- Current animation sample</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li><code>ws://host:port/ws/life</code> -- Board frame stream</li>
        <li><code>ws://host:port/ws/checks</code> -- Tile delta stream</li>
        <li><code>ws://host:port/ws/anim</code> -- Animation sample stream</li>
        <li><code>ws://host:port/ws/clock</code> -- Per-session tick counter</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/status -- server and widget status
// ---------------------------------------------------------------------------

/// Return server uptime plus a one-line summary per widget.
pub async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let life = state.life.snapshot().await;
    let checks = state.checks.snapshot().await;
    let anim = state.anim.snapshot().await;

    let uptime = chrono::Utc::now()
        .signed_duration_since(state.started_at)
        .num_seconds();

    Json(serde_json::json!({
        "started_at": state.started_at,
        "uptime_seconds": uptime,
        "life": {
            "generation": life.generation,
            "alive": life.alive,
        },
        "checks": {
            "checked": checks.alive,
        },
        "anim": {
            "phase": anim.phase,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /api/life, POST /api/life/flip
// ---------------------------------------------------------------------------

/// Return the latest published Game of Life board frame.
pub async fn get_life(State(state): State<Arc<AppState>>) -> Json<BoardFrame> {
    Json(state.life.snapshot().await)
}

/// Toggle one Life cell identified by its composite tile id.
///
/// The toggle inverts the cell's value in the latest published frame.
/// Two racing flips of the same tile both land; the later one wins,
/// which is the same outcome as two users clicking a physical switch.
pub async fn flip_tile(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FlipRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (x, y) = parse_tile_id(&request.id)?;

    let frame = state.life.snapshot().await;
    let Some(current) = frame.cell(x, y) else {
        return Err(ApiError::Rejected(GridError::OutOfBounds {
            x,
            y,
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
        }));
    };

    let delta = TileDelta {
        x,
        y,
        value: !current,
    };
    state.life.mutate(delta).await?;
    Ok((StatusCode::ACCEPTED, Json(delta)))
}

// ---------------------------------------------------------------------------
// GET /api/checks, POST /api/checks/tile
// ---------------------------------------------------------------------------

/// Return the latest published checkbox grid frame.
pub async fn get_checks(State(state): State<Arc<AppState>>) -> Json<BoardFrame> {
    Json(state.checks.snapshot().await)
}

/// Set one checkbox cell to an explicit value.
///
/// Bounds are checked before the command is enqueued so the caller gets
/// a 400 instead of a silently dropped write.
pub async fn set_tile(
    State(state): State<Arc<AppState>>,
    Json(delta): Json<TileDelta>,
) -> Result<impl IntoResponse, ApiError> {
    if delta.x >= GRID_WIDTH || delta.y >= GRID_HEIGHT {
        return Err(ApiError::Rejected(GridError::OutOfBounds {
            x: delta.x,
            y: delta.y,
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
        }));
    }
    state.checks.mutate(delta).await?;
    Ok((StatusCode::ACCEPTED, Json(delta)))
}

// ---------------------------------------------------------------------------
// GET /api/anim -- current animation sample
// ---------------------------------------------------------------------------

/// Return the latest published animation sample.
pub async fn get_anim(State(state): State<Arc<AppState>>) -> Json<AnimationSample> {
    Json(state.anim.snapshot().await)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a composite `"x-y"` tile identifier.
fn parse_tile_id(id: &str) -> Result<(u32, u32), ApiError> {
    let Some((x, y)) = id.split_once('-') else {
        return Err(ApiError::MalformedInput(format!(
            "tile id {id:?} is not of the form \"x-y\""
        )));
    };
    let x = x
        .parse::<u32>()
        .map_err(|e| ApiError::MalformedInput(format!("tile id {id:?}: {e}")))?;
    let y = y
        .parse::<u32>()
        .map_err(|e| ApiError::MalformedInput(format!("tile id {id:?}: {e}")))?;
    Ok((x, y))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tile_id_parses_both_coordinates() {
        assert_eq!(parse_tile_id("3-17").unwrap(), (3, 17));
        assert_eq!(parse_tile_id("0-0").unwrap(), (0, 0));
    }

    #[test]
    fn tile_id_without_separator_is_malformed() {
        assert!(matches!(
            parse_tile_id("317"),
            Err(ApiError::MalformedInput(_))
        ));
    }

    #[test]
    fn tile_id_with_junk_coordinates_is_malformed() {
        assert!(matches!(
            parse_tile_id("a-3"),
            Err(ApiError::MalformedInput(_))
        ));
        assert!(matches!(
            parse_tile_id("3-"),
            Err(ApiError::MalformedInput(_))
        ));
        // A negative coordinate splits as "" and "4-2".
        assert!(parse_tile_id("-4-2").is_err());
    }
}
