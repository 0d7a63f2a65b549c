#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod core;
pub mod strategy;
#[cfg(feature = "std")]
pub mod config;
#[cfg(feature = "std")]
pub mod game;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;

pub use crate::core::{
    Board, BoardError, CellState, Coordinate, StrategyError, DEFAULT_BOARD_SIZE, MIN_SHIP_LENGTH,
};
pub use strategy::{HuntTargetStrategy, ShotStrategy};
#[cfg(feature = "std")]
pub use config::GameConfig;
#[cfg(feature = "std")]
pub use game::{
    FailureReason, FleetBoard, FleetError, GameDriver, GameReport, GameResult, OpponentBoard,
    Orientation, ShipLayout, ShotRecord,
};
#[cfg(feature = "std")]
pub use logging::init_logging;
