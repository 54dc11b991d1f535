//! Pass-through checkbox grid widget.
//!
//! The simplest hub specialization: a fixed 20x20 board with no
//! simulation step and no tick source at all. A mutation sets one cell
//! and broadcasts only the single-cell [`TileDelta`] -- subscribers
//! reconstruct the board incrementally from the initial snapshot plus
//! the delta stream.
//!
//! Mutations are bounds-checked like the simulation's, so an
//! out-of-range write fails with a typed error instead of silently
//! doing nothing.

use std::time::Duration;

use liveboard_types::{BoardFrame, TileDelta};

use crate::grid::{BoundedGrid, GridError};
use crate::hub::Widget;

/// Checkbox grid width in cells.
pub const GRID_WIDTH: u32 = 20;

/// Checkbox grid height in cells.
pub const GRID_HEIGHT: u32 = 20;

/// The synchronized checkbox grid.
#[derive(Debug)]
pub struct CheckGrid {
    grid: BoundedGrid,
}

impl CheckGrid {
    /// Create an all-unchecked grid.
    ///
    /// # Errors
    ///
    /// Propagates [`GridError`] from grid construction.
    pub fn new() -> Result<Self, GridError> {
        Ok(Self {
            grid: BoundedGrid::new(GRID_WIDTH, GRID_HEIGHT)?,
        })
    }

    /// The current board.
    pub const fn grid(&self) -> &BoundedGrid {
        &self.grid
    }
}

impl Widget for CheckGrid {
    type Command = TileDelta;
    type Update = TileDelta;
    type Snapshot = BoardFrame;

    const NAME: &'static str = "checks";

    fn tick_period(&self) -> Option<Duration> {
        None
    }

    fn apply(&mut self, command: TileDelta) -> Result<Option<TileDelta>, GridError> {
        self.grid.set(command.x, command.y, command.value)?;
        Ok(Some(command))
    }

    fn on_tick(&mut self, _watchers: usize) -> Option<TileDelta> {
        // No tick source is ever armed for this widget.
        None
    }

    fn snapshot(&self) -> BoardFrame {
        // The checkbox grid has no generations; frames are always 0.
        self.grid.to_frame(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn apply_sets_the_cell_and_echoes_the_delta() {
        let mut checks = CheckGrid::new().unwrap();
        let delta = TileDelta {
            x: 5,
            y: 9,
            value: true,
        };
        let update = checks.apply(delta).unwrap();
        assert_eq!(update, Some(delta));
        assert!(checks.grid().get(5, 9).unwrap());
    }

    #[test]
    fn out_of_bounds_write_is_rejected() {
        let mut checks = CheckGrid::new().unwrap();
        let result = checks.apply(TileDelta {
            x: GRID_WIDTH,
            y: 0,
            value: true,
        });
        assert!(matches!(result, Err(GridError::OutOfBounds { .. })));
        assert_eq!(checks.grid().alive(), 0);
    }

    #[test]
    fn widget_never_ticks() {
        let mut checks = CheckGrid::new().unwrap();
        assert!(checks.tick_period().is_none());
        assert!(checks.on_tick(3).is_none());
    }
}
