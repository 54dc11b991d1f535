//! Fixed-dimension 2D boolean matrix with bounds-checked accessors.
//!
//! [`BoundedGrid`] is the shared board representation for both grid
//! widgets. Dimensions are validated once at construction; every
//! accessor afterwards fails with a typed [`GridError`] instead of
//! panicking when a coordinate falls outside `[0, width) x [0, height)`.
//!
//! The grid itself is not synchronized. It is owned by exactly one hub
//! worker; concurrent readers only ever see complete copies published
//! by that worker (see [`crate::hub`]).

use liveboard_types::BoardFrame;
use rand::Rng as _;

/// Errors that can occur during grid operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A coordinate fell outside the grid dimensions.
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        /// Requested column.
        x: u32,
        /// Requested row.
        y: u32,
        /// Board width.
        width: u32,
        /// Board height.
        height: u32,
    },

    /// A grid cannot have a zero-sized dimension.
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A replacement board had different dimensions than the target.
    #[error("replacement board is {width}x{height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        /// Width of the offered board.
        width: u32,
        /// Height of the offered board.
        height: u32,
        /// Width of the board being replaced.
        expected_width: u32,
        /// Height of the board being replaced.
        expected_height: u32,
    },
}

/// A `width x height` boolean matrix stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedGrid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl BoundedGrid {
    /// Create an all-false grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        let len = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; len],
        })
    }

    /// Create a grid with each cell independently set with probability 1/2.
    ///
    /// Used for the Game of Life starting board.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] if either dimension is zero.
    pub fn random(width: u32, height: u32) -> Result<Self, GridError> {
        let len = cell_count(width, height)?;
        let mut rng = rand::rng();
        let cells = (0..len).map(|_| rng.random::<bool>()).collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Board width in cells.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Board height in cells.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Read the cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when the coordinate is outside
    /// the board; the grid is untouched.
    pub fn get(&self, x: u32, y: u32) -> Result<bool, GridError> {
        let index = self.index(x, y)?;
        self.cells
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Write the cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when the coordinate is outside
    /// the board; the grid is untouched.
    pub fn set(&mut self, x: u32, y: u32, value: bool) -> Result<(), GridError> {
        let index = self.index(x, y)?;
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(self.out_of_bounds(x, y)),
        }
    }

    /// Swap in a whole new board in one step.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if `next` has different
    /// dimensions; the current board is untouched.
    pub fn replace(&mut self, next: Self) -> Result<(), GridError> {
        if next.width != self.width || next.height != self.height {
            return Err(GridError::DimensionMismatch {
                width: next.width,
                height: next.height,
                expected_width: self.width,
                expected_height: self.height,
            });
        }
        self.cells = next.cells;
        Ok(())
    }

    /// Row-major view of all cells.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Number of live (true) cells.
    pub fn alive(&self) -> u32 {
        let count = self.cells.iter().filter(|cell| **cell).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Produce a serializable [`BoardFrame`] copy of this grid.
    pub fn to_frame(&self, generation: u64) -> BoardFrame {
        BoardFrame {
            generation,
            width: self.width,
            height: self.height,
            cells: self.cells.clone(),
            alive: self.alive(),
        }
    }

    /// Map a coordinate to its row-major index, bounds-checked.
    fn index(&self, x: u32, y: u32) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        u64::from(y)
            .checked_mul(u64::from(self.width))
            .and_then(|row| row.checked_add(u64::from(x)))
            .and_then(|index| usize::try_from(index).ok())
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    const fn out_of_bounds(&self, x: u32, y: u32) -> GridError {
        GridError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Validate dimensions and compute the backing vector length.
fn cell_count(width: u32, height: u32) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::ZeroDimension { width, height });
    }
    u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|len| usize::try_from(len).ok())
        .ok_or(GridError::ZeroDimension { width, height })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_false() {
        let grid = BoundedGrid::new(4, 3).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cells().len(), 12);
        assert!(grid.cells().iter().all(|cell| !cell));
        assert_eq!(grid.alive(), 0);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(
            BoundedGrid::new(0, 5),
            Err(GridError::ZeroDimension { .. })
        ));
        assert!(matches!(
            BoundedGrid::new(5, 0),
            Err(GridError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut grid = BoundedGrid::new(20, 20).unwrap();
        grid.set(3, 7, true).unwrap();
        assert!(grid.get(3, 7).unwrap());
        assert!(!grid.get(7, 3).unwrap());
        grid.set(3, 7, false).unwrap();
        assert!(!grid.get(3, 7).unwrap());
    }

    #[test]
    fn out_of_bounds_access_fails_and_never_mutates() {
        let mut grid = BoundedGrid::new(20, 20).unwrap();
        assert!(matches!(
            grid.get(20, 0),
            Err(GridError::OutOfBounds { x: 20, y: 0, .. })
        ));
        assert!(matches!(
            grid.get(0, 20),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.set(20, 20, true),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.set(u32::MAX, u32::MAX, true),
            Err(GridError::OutOfBounds { .. })
        ));
        assert_eq!(grid.alive(), 0);
    }

    #[test]
    fn replace_swaps_the_whole_board() {
        let mut grid = BoundedGrid::new(3, 3).unwrap();
        let mut next = BoundedGrid::new(3, 3).unwrap();
        next.set(1, 1, true).unwrap();
        grid.replace(next).unwrap();
        assert!(grid.get(1, 1).unwrap());
        assert_eq!(grid.alive(), 1);
    }

    #[test]
    fn replace_rejects_mismatched_dimensions() {
        let mut grid = BoundedGrid::new(3, 3).unwrap();
        let other = BoundedGrid::new(4, 3).unwrap();
        assert!(matches!(
            grid.replace(other),
            Err(GridError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn frame_mirrors_the_grid() {
        let mut grid = BoundedGrid::new(5, 4).unwrap();
        grid.set(2, 3, true).unwrap();
        let frame = grid.to_frame(9);
        assert_eq!(frame.generation, 9);
        assert_eq!(frame.width, 5);
        assert_eq!(frame.height, 4);
        assert_eq!(frame.alive, 1);
        assert_eq!(frame.cell(2, 3), Some(true));
        assert_eq!(frame.cell(3, 2), Some(false));
    }

    #[test]
    fn random_grid_has_requested_dimensions() {
        let grid = BoundedGrid::random(50, 50).unwrap();
        assert_eq!(grid.cells().len(), 2500);
        assert!(grid.alive() <= 2500);
    }
}
