//! Commonly used types and utilities for ease of import.

pub use crate::{Board, CellState, Coordinate, HuntTargetStrategy, ShotStrategy};

#[cfg(feature = "std")]
pub use crate::{FleetBoard, GameConfig, GameDriver, GameReport, GameResult, OpponentBoard};
