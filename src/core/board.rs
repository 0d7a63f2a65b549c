//! The strategy's view of the opponent grid.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use super::common::{BoardError, CellState};
use super::config::DEFAULT_BOARD_SIZE;
use super::coordinate::Coordinate;

/// Square grid of observed cell states, stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<CellState>,
}

impl Board {
    /// Create a `size`×`size` board with every cell `Unknown`.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![CellState::Unknown; size * size],
        }
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if both components lie in `[0, size)`.
    pub fn is_inside(&self, coord: Coordinate) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    fn index(&self, coord: Coordinate) -> Result<usize, BoardError> {
        if !self.is_inside(coord) {
            return Err(BoardError::OutOfBounds {
                coord,
                size: self.size,
            });
        }
        Ok(coord.row * self.size + coord.col)
    }

    /// State of the cell at `coord`.
    pub fn get(&self, coord: Coordinate) -> Result<CellState, BoardError> {
        let idx = self.index(coord)?;
        Ok(self.cells[idx])
    }

    /// Record the outcome of attacking `coord`.
    ///
    /// Cells only move out of `Unknown`, once.
    pub fn set(&mut self, coord: Coordinate, state: CellState) -> Result<(), BoardError> {
        let idx = self.index(coord)?;
        if state == CellState::Unknown {
            return Err(BoardError::InvalidTransition { coord });
        }
        let current = self.cells[idx];
        if current.is_resolved() {
            return Err(BoardError::AlreadyResolved {
                coord,
                state: current,
            });
        }
        self.cells[idx] = state;
        Ok(())
    }

    /// Returns `true` if `coord` is on the board and has not been attacked.
    pub fn is_unknown(&self, coord: Coordinate) -> bool {
        matches!(self.get(coord), Ok(CellState::Unknown))
    }

    /// Every coordinate on the board exactly once, in row-major order.
    pub fn all_coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.size).flat_map(move |r| (0..self.size).map(move |c| Coordinate::new(r, c)))
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    pub fn unknown_count(&self) -> usize {
        self.count(CellState::Unknown)
    }

    /// Returns `true` when every cell has been attacked.
    pub fn is_exhausted(&self) -> bool {
        self.unknown_count() == 0
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(DEFAULT_BOARD_SIZE)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{} {{", self.size, self.size)?;
        for row in self.cells.chunks(self.size.max(1)) {
            f.write_str("  ")?;
            for cell in row {
                let ch = match cell {
                    CellState::Unknown => '.',
                    CellState::Miss => 'o',
                    CellState::Hit => 'x',
                    CellState::Sunk => '#',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
