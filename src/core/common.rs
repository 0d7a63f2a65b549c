//! Common types for the shot engine: cell outcomes and error enums.

use core::fmt;

use super::coordinate::Coordinate;

/// Observed state of a single opponent cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Never attacked.
    #[default]
    Unknown,
    /// Attacked, no ship there.
    Miss,
    /// Attacked, part of a ship that is still afloat.
    Hit,
    /// Attacked, and the shot finished off the ship.
    Sunk,
}

impl CellState {
    /// Returns `true` once the cell has been attacked.
    pub const fn is_resolved(self) -> bool {
        !matches!(self, CellState::Unknown)
    }

    /// Returns `true` for outcomes that landed on a ship.
    pub const fn is_ship(self) -> bool {
        matches!(self, CellState::Hit | CellState::Sunk)
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellState::Unknown => "Unknown",
            CellState::Miss => "Miss",
            CellState::Hit => "Hit",
            CellState::Sunk => "Sunk",
        };
        f.write_str(name)
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate lies outside `[0, size)` on either axis.
    OutOfBounds { coord: Coordinate, size: usize },
    /// The cell already holds a final outcome.
    AlreadyResolved { coord: Coordinate, state: CellState },
    /// Cells may never be written back to `Unknown`.
    InvalidTransition { coord: Coordinate },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { coord, size } => {
                write!(f, "Coordinate {} is outside a {}x{} board", coord, size, size)
            }
            BoardError::AlreadyResolved { coord, state } => {
                write!(f, "Cell {} was already resolved as {}", coord, state)
            }
            BoardError::InvalidTransition { coord } => {
                write!(f, "Cell {} cannot be reset to Unknown", coord)
            }
        }
    }
}

/// Errors returned when a strategy is fed an outcome it cannot accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyError {
    /// Underlying board rejected the write.
    Board(BoardError),
    /// `Unknown` is the rest state and is never a shot outcome.
    UnknownOutcome { coord: Coordinate },
    /// The coordinate was not the shot most recently handed out.
    NotIssued {
        coord: Coordinate,
        pending: Option<Coordinate>,
    },
}

impl From<BoardError> for StrategyError {
    fn from(err: BoardError) -> Self {
        StrategyError::Board(err)
    }
}

impl fmt::Display for StrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyError::Board(e) => write!(f, "Board error: {}", e),
            StrategyError::UnknownOutcome { coord } => {
                write!(f, "Outcome for {} must be Miss, Hit or Sunk", coord)
            }
            StrategyError::NotIssued { coord, pending: Some(p) } => {
                write!(f, "Result for {} does not match pending shot {}", coord, p)
            }
            StrategyError::NotIssued { coord, pending: None } => {
                write!(f, "Result for {} but no shot is pending", coord)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

#[cfg(feature = "std")]
impl std::error::Error for StrategyError {}
