//! Core data model for the shot engine (no_std compatible)
//!
//! Coordinates, cell outcomes and the board view the strategy keeps of the
//! opponent grid. Depends only on `alloc`.

pub mod board;
pub mod common;
pub mod config;
pub mod coordinate;

// Re-export commonly used types
pub use board::Board;
pub use common::{BoardError, CellState, StrategyError};
pub use config::*;
pub use coordinate::Coordinate;
