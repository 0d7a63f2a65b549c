//! Shot strategies
//!
//! This module defines the ShotStrategy trait and provides the concrete
//! implementation used by the game driver:
//! - HuntTargetStrategy: checkerboard hunt with neighbour targeting after hits

use crate::core::{Board, CellState, Coordinate, StrategyError};

/// Interface implemented by shot-selection heuristics.
///
/// A strategy is responsible for:
/// - Choosing the next cell to attack
/// - Recording the observed outcome of each attack
///
/// It owns its view of the opponent board; callers only read it.
pub trait ShotStrategy: Send {
    /// Choose the next coordinate to attack, or `None` once every cell has
    /// been attacked. Never returns a cell that is not `Unknown`.
    fn next_shot(&mut self) -> Option<Coordinate>;

    /// Record the outcome of attacking `coord`. Must be called exactly once
    /// for every coordinate returned by [`ShotStrategy::next_shot`].
    fn register_shot_result(
        &mut self,
        coord: Coordinate,
        result: CellState,
    ) -> Result<(), StrategyError>;

    /// The strategy's view of the opponent board.
    fn board(&self) -> &Board;
}

pub mod hunt_target;
pub use hunt_target::HuntTargetStrategy;
