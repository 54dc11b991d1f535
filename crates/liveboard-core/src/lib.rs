//! Core state and concurrency machinery for the Liveboard widgets.
//!
//! Every widget in Liveboard is built from the same parts: a piece of
//! mutable state with a single logical owner, a stream of mutation
//! commands, a dynamic set of subscribers, and (for two of the three
//! widgets) a periodic tick source. This crate provides those parts:
//!
//! - [`grid`] -- fixed-dimension 2D boolean matrix with typed bounds errors
//! - [`life`] -- Conway step function and the Game of Life widget
//! - [`schedule`] -- three-tier adaptive tick countdown (idle / active /
//!   post-edit debounce)
//! - [`checks`] -- pass-through checkbox grid widget
//! - [`animation`] -- phase clock widget whose timer pauses while unwatched
//! - [`hub`] -- the generic broadcast hub actor driving one [`Widget`]
//! - [`subscribers`] -- the hub-owned subscriber registry
//!
//! # Architecture
//!
//! One hub task per widget owns all mutable state. External callers only
//! ever send commands (mutate, subscribe, unsubscribe) over a bounded
//! queue; snapshot readers observe a complete copy the hub publishes
//! under a read-write lock after every state change. The subscriber set
//! is mutated exclusively between processing cycles of the hub loop.

pub mod animation;
pub mod checks;
pub mod grid;
pub mod hub;
pub mod life;
pub mod schedule;
pub mod subscribers;

// Re-export primary types for convenience.
pub use grid::{BoundedGrid, GridError};
pub use hub::{HubError, HubHandle, Subscription, Widget, spawn};
