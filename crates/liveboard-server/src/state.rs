//! Shared application state for the Liveboard server.
//!
//! [`AppState`] holds one [`HubHandle`] per widget. Handles are cheap
//! clones over a command queue and a published snapshot cell, so the
//! state itself carries no locks of its own and every HTTP worker can
//! hold a copy.

use chrono::{DateTime, Utc};
use liveboard_core::animation::Animation;
use liveboard_core::checks::CheckGrid;
use liveboard_core::life::LifeBoard;
use liveboard_core::{GridError, HubHandle};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Handle to the Game of Life hub.
    pub life: HubHandle<LifeBoard>,
    /// Handle to the checkbox grid hub.
    pub checks: HubHandle<CheckGrid>,
    /// Handle to the animation hub.
    pub anim: HubHandle<Animation>,
    /// Server start time, reported by the status endpoint.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Spawn one hub worker per widget and collect their handles.
    ///
    /// # Errors
    ///
    /// Propagates [`GridError`] from board construction.
    pub fn new() -> Result<Self, GridError> {
        Ok(Self {
            life: liveboard_core::spawn(LifeBoard::new()?),
            checks: liveboard_core::spawn(CheckGrid::new()?),
            anim: liveboard_core::spawn(Animation::new()),
            started_at: Utc::now(),
        })
    }
}
