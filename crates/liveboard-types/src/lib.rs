//! Shared type definitions for the Liveboard widgets.
//!
//! This crate is the single source of truth for the payload types that
//! cross the hub boundary: what a widget broadcasts to its subscribers
//! and what the HTTP layer serializes onto the wire.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for subscriber identity
//! - [`updates`] -- Broadcast payloads (cell deltas, board frames,
//!   animation samples)

pub mod ids;
pub mod updates;

// Re-export all public types at crate root for convenience.
pub use ids::SubscriberId;
pub use updates::{AnimationSample, BoardFrame, ClockTick, TileDelta};
