//! Broadcast payload types pushed from the hubs to their subscribers.
//!
//! Each widget broadcasts a different shape:
//!
//! - the checkbox grid pushes a [`TileDelta`] per changed cell,
//! - the Game of Life pushes a full [`BoardFrame`] per generation,
//! - the animation pushes an [`AnimationSample`] per tick,
//! - the clock stream pushes a [`ClockTick`] per tick (session-local,
//!   never routed through a hub).
//!
//! All three serialize to JSON for the `WebSocket` transport. The hub
//! itself treats them as opaque values; only the rendering layer cares
//! about their contents.

use serde::{Deserialize, Serialize};

/// A single changed cell on a grid widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDelta {
    /// Zero-based column of the changed cell.
    pub x: u32,
    /// Zero-based row of the changed cell.
    pub y: u32,
    /// The new cell value.
    pub value: bool,
}

/// A complete board generation, row-major.
///
/// `cells.len()` is always `width * height`; the cell at `(x, y)` lives
/// at index `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardFrame {
    /// Generation counter (0 for the starting board).
    pub generation: u64,
    /// Board width in cells.
    pub width: u32,
    /// Board height in cells.
    pub height: u32,
    /// Row-major cell values.
    pub cells: Vec<bool>,
    /// Number of live cells in this generation.
    pub alive: u32,
}

impl BoardFrame {
    /// Look up a cell by coordinate, `None` when out of range.
    pub fn cell(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y
            .checked_mul(self.width)
            .and_then(|row| row.checked_add(x))?;
        self.cells.get(usize::try_from(index).ok()?).copied()
    }
}

/// One tick of the per-connection clock stream.
///
/// The count is private to a single session and starts at 1 on its
/// first tick; two viewers connected at different times see different
/// counts by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTick {
    /// Ticks elapsed since this session connected.
    pub count: u64,
}

/// One sample of the continuous animation: the phase plus everything
/// derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationSample {
    /// Monotonically increasing phase in radians.
    pub phase: f64,
    /// Red channel, `cos(phase)` scaled to `0..=255`.
    pub red: u8,
    /// Green channel, `cos(phase + pi)` scaled to `0..=255`.
    pub green: u8,
    /// Blue channel, `cos(phase + 3pi/2)` scaled to `0..=255`.
    pub blue: u8,
    /// Horizontal position on the orbit.
    pub x: i32,
    /// Vertical position on the orbit.
    pub y: i32,
}
