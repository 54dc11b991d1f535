//! Conway's Game of Life widget: step function plus adaptive scheduling.
//!
//! The board is a fixed 50x50 [`BoundedGrid`] evaluated with the
//! classic B3/S23 rule and **no wraparound**: edge and corner cells
//! simply have fewer neighbors, they never see the opposite side of the
//! board.
//!
//! The survival branch reads the *current* generation's cell value.
//! Checking the half-built next generation instead would make the
//! 2-neighbor survival rule unreachable and collapse B3/S23 into a
//! birth-only automaton (blinkers lose their center cell, for one).
//!
//! Scheduling follows the three tiers of [`crate::schedule`]: an
//! unwatched board never computes, a watched board advances every base
//! tick, and a manual edit holds the simulation briefly so the edit is
//! not instantly overwritten.

use std::time::Duration;

use liveboard_types::{BoardFrame, TileDelta};
use tracing::{debug, warn};

use crate::grid::{BoundedGrid, GridError};
use crate::hub::Widget;
use crate::schedule::{BASE_TICK, TickSchedule, Tier};

/// Simulation board width in cells.
pub const BOARD_WIDTH: u32 = 50;

/// Simulation board height in cells.
pub const BOARD_HEIGHT: u32 = 50;

/// Compute the next generation of `current` under B3/S23.
///
/// A cell is alive in the next generation iff it has exactly 3 live
/// neighbors, or it has exactly 2 live neighbors and is alive in the
/// current generation. Neighbor counts sum only the up-to-8 adjacent
/// cells that exist on the board.
pub fn next_generation(current: &BoundedGrid) -> BoundedGrid {
    let mut next = current.clone();
    for y in 0..current.height() {
        for x in 0..current.width() {
            let neighbors = live_neighbors(current, x, y);
            let survives = neighbors == 2 && matches!(current.get(x, y), Ok(true));
            let value = neighbors == 3 || survives;
            // Cannot fail: (x, y) iterates this grid's own bounds.
            let _ = next.set(x, y, value);
        }
    }
    next
}

/// Count live neighbors of `(x, y)`, truncating at the board edges.
///
/// Coordinates that underflow zero or land past the far edge are simply
/// absent: the bounds-checked `get` doubles as the truncation.
fn live_neighbors(grid: &BoundedGrid, x: u32, y: u32) -> u8 {
    let columns = [x.checked_sub(1), Some(x), x.checked_add(1)];
    let rows = [y.checked_sub(1), Some(y), y.checked_add(1)];

    let mut count: u8 = 0;
    for (row_offset, row) in rows.iter().enumerate() {
        for (column_offset, column) in columns.iter().enumerate() {
            if row_offset == 1 && column_offset == 1 {
                continue;
            }
            if let (Some(nx), Some(ny)) = (column, row) {
                if matches!(grid.get(*nx, *ny), Ok(true)) {
                    count = count.saturating_add(1);
                }
            }
        }
    }
    count
}

/// The Game of Life widget driven by a broadcast hub.
#[derive(Debug)]
pub struct LifeBoard {
    grid: BoundedGrid,
    generation: u64,
    schedule: TickSchedule,
}

impl LifeBoard {
    /// Create a board with a randomized starting position, idle until
    /// someone subscribes.
    ///
    /// # Errors
    ///
    /// Propagates [`GridError`] from grid construction.
    pub fn new() -> Result<Self, GridError> {
        Ok(Self::from_grid(BoundedGrid::random(
            BOARD_WIDTH,
            BOARD_HEIGHT,
        )?))
    }

    /// Create a board from an explicit starting grid (tests, known
    /// patterns).
    pub const fn from_grid(grid: BoundedGrid) -> Self {
        Self {
            grid,
            generation: 0,
            schedule: TickSchedule::new(),
        }
    }

    /// The current board.
    pub const fn grid(&self) -> &BoundedGrid {
        &self.grid
    }

    /// The current generation counter.
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

impl Widget for LifeBoard {
    type Command = TileDelta;
    type Update = BoardFrame;
    type Snapshot = BoardFrame;

    const NAME: &'static str = "life";

    fn tick_period(&self) -> Option<Duration> {
        Some(BASE_TICK)
    }

    fn apply(&mut self, command: TileDelta) -> Result<Option<BoardFrame>, GridError> {
        // The edit lands immediately, independent of the tick schedule.
        self.grid.set(command.x, command.y, command.value)?;
        self.schedule.arm(Tier::PostEdit);
        debug!(x = command.x, y = command.y, value = command.value, "tile set, debounce armed");
        Ok(None)
    }

    fn on_tick(&mut self, watchers: usize) -> Option<BoardFrame> {
        if !self.schedule.fire() {
            return None;
        }
        if watchers == 0 {
            debug!("no watchers, skipping generation for the idle window");
            self.schedule.arm(Tier::Idle);
            return None;
        }
        self.schedule.arm(Tier::Active);

        let next = next_generation(&self.grid);
        if let Err(error) = self.grid.replace(next) {
            warn!(%error, "generation swap failed");
            return None;
        }
        self.generation = self.generation.saturating_add(1);
        debug!(
            generation = self.generation,
            alive = self.grid.alive(),
            "generation advanced"
        );
        Some(self.grid.to_frame(self.generation))
    }

    fn on_subscribe(&mut self) {
        // A first viewer should see motion on the next base tick rather
        // than waiting out an idle window.
        self.schedule.arm(Tier::Active);
    }

    fn snapshot(&self) -> BoardFrame {
        self.grid.to_frame(self.generation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use crate::schedule::Tier;

    fn grid_with(width: u32, height: u32, live: &[(u32, u32)]) -> BoundedGrid {
        let mut grid = BoundedGrid::new(width, height).unwrap();
        for (x, y) in live {
            grid.set(*x, *y, true).unwrap();
        }
        grid
    }

    fn live_cells(grid: &BoundedGrid) -> Vec<(u32, u32)> {
        let mut cells = Vec::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.get(x, y).unwrap() {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn lone_center_cell_dies() {
        let grid = grid_with(3, 3, &[(1, 1)]);
        let next = next_generation(&grid);
        assert_eq!(next.alive(), 0);
    }

    #[test]
    fn blinker_survives_through_its_center() {
        // The vertical blinker's center has exactly 2 live neighbors,
        // so it only survives if the rule reads the current generation.
        let grid = grid_with(5, 5, &[(1, 0), (1, 1), (1, 2)]);
        let next = next_generation(&grid);
        assert_eq!(live_cells(&next), vec![(0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn block_is_a_still_life() {
        let block = [(2, 2), (3, 2), (2, 3), (3, 3)];
        let grid = grid_with(6, 6, &block);
        let next = next_generation(&grid);
        assert_eq!(live_cells(&next), block.to_vec());
    }

    #[test]
    fn glider_translates_one_cell_diagonally_every_four_generations() {
        let glider = [(6, 5), (7, 6), (5, 7), (6, 7), (7, 7)];
        let mut grid = grid_with(20, 20, &glider);
        for _ in 0..4 {
            grid = next_generation(&grid);
        }
        let expected: Vec<(u32, u32)> = glider.iter().map(|(x, y)| (x + 1, y + 1)).collect();
        assert_eq!(live_cells(&grid), expected);
    }

    #[test]
    fn corner_cells_never_see_wrapped_neighbors() {
        // Under a wrapping rule each corner would neighbor the other
        // three; without wraparound they are all isolated and die.
        let corners = [(0, 0), (19, 0), (0, 19), (19, 19)];
        let grid = grid_with(20, 20, &corners);
        assert_eq!(live_neighbors(&grid, 0, 0), 0);
        let next = next_generation(&grid);
        assert_eq!(next.alive(), 0);
    }

    #[test]
    fn idle_window_never_touches_the_board() {
        let glider = [(6, 5), (7, 6), (5, 7), (6, 7), (7, 7)];
        let mut board = LifeBoard::from_grid(grid_with(20, 20, &glider));
        let before = board.grid().clone();

        // A full idle-tier window of base ticks with zero watchers.
        for _ in 0..=Tier::Idle.ticks() {
            assert!(board.on_tick(0).is_none());
        }
        assert_eq!(*board.grid(), before);
        assert_eq!(board.generation(), 0);
    }

    #[test]
    fn subscribe_forces_the_next_tick_to_advance() {
        let blinker = [(1, 0), (1, 1), (1, 2)];
        let mut board = LifeBoard::from_grid(grid_with(5, 5, &blinker));

        board.on_subscribe();
        let frame = board.on_tick(1).unwrap();
        assert_eq!(frame.generation, 1);
        assert_eq!(frame.cell(0, 1), Some(true));
        assert_eq!(frame.cell(1, 1), Some(true));
        assert_eq!(frame.cell(2, 1), Some(true));
    }

    #[test]
    fn edit_applies_immediately_even_mid_idle() {
        let mut board = LifeBoard::from_grid(grid_with(20, 20, &[]));

        // Deep inside the idle window.
        assert!(board.on_tick(0).is_none());
        board
            .apply(TileDelta {
                x: 4,
                y: 4,
                value: true,
            })
            .unwrap();
        assert!(board.grid().get(4, 4).unwrap());
    }

    #[test]
    fn edit_debounces_the_next_generation() {
        let blinker = [(1, 0), (1, 1), (1, 2)];
        let mut board = LifeBoard::from_grid(grid_with(5, 5, &blinker));
        board
            .apply(TileDelta {
                x: 3,
                y: 3,
                value: true,
            })
            .unwrap();

        // Two seconds of base ticks pass before the simulation resumes,
        // even with a watcher attached.
        for _ in 1..Tier::PostEdit.ticks() {
            assert!(board.on_tick(1).is_none());
        }
        let frame = board.on_tick(1).unwrap();
        assert_eq!(frame.generation, 1);
    }

    #[test]
    fn out_of_bounds_edit_is_rejected_and_board_unchanged() {
        let mut board = LifeBoard::from_grid(grid_with(20, 20, &[(1, 1)]));
        let result = board.apply(TileDelta {
            x: 20,
            y: 0,
            value: true,
        });
        assert!(matches!(result, Err(GridError::OutOfBounds { .. })));
        assert_eq!(board.grid().alive(), 1);
    }
}
