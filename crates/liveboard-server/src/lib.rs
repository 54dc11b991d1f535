//! HTTP and `WebSocket` server for the Liveboard widgets.
//!
//! This crate provides an Axum server that exposes:
//!
//! - **`WebSocket` endpoints** (`/ws/life`, `/ws/checks`, `/ws/anim`)
//!   streaming each widget's updates as JSON text frames, plus
//!   `/ws/clock`, a per-session tick counter stream
//! - **REST endpoints** for reading widget snapshots and submitting
//!   mutations (Life cell flips, checkbox writes)
//! - **Minimal HTML status page** (`GET /`) showing widget metrics and
//!   links to the API endpoints
//!
//! # Architecture
//!
//! Every read endpoint serves the hub's most recently published
//! snapshot and never waits on the hub worker. Mutation endpoints
//! validate input, enqueue a command on the owning hub, and return; the
//! resulting update reaches clients over their `WebSocket` sessions in
//! hub broadcast order. Each session is its own hub subscriber with a
//! private bounded delivery channel, so one stalled client never delays
//! another.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
