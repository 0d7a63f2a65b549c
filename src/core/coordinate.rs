//! Grid coordinates.

use core::fmt;

/// A single cell position on the opponent grid, as `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether this cell belongs to the checkerboard hunt pattern.
    pub const fn is_parity(&self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    /// Orthogonal neighbours in the order up, down, left, right.
    ///
    /// Neighbours that would fall below zero are skipped; the upper edge is
    /// left to the board to check.
    pub fn neighbors(self) -> impl Iterator<Item = Coordinate> {
        let up = self.row.checked_sub(1).map(|r| Coordinate::new(r, self.col));
        let down = self.row.checked_add(1).map(|r| Coordinate::new(r, self.col));
        let left = self.col.checked_sub(1).map(|c| Coordinate::new(self.row, c));
        let right = self.col.checked_add(1).map(|c| Coordinate::new(self.row, c));
        [up, down, left, right].into_iter().flatten()
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Coordinate> for (usize, usize) {
    fn from(coord: Coordinate) -> Self {
        (coord.row, coord.col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
