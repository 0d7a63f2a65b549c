//! In-memory opponent built from an explicit fleet layout.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{GameResult, OpponentBoard};
use crate::core::{CellState, Coordinate, DEFAULT_BOARD_SIZE, MIN_SHIP_LENGTH};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Position of one ship: bow cell, length and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipLayout {
    pub row: usize,
    pub col: usize,
    pub length: usize,
    pub orientation: Orientation,
}

impl ShipLayout {
    pub const fn new(row: usize, col: usize, length: usize, orientation: Orientation) -> Self {
        Self {
            row,
            col,
            length,
            orientation,
        }
    }

    /// Cells covered by the ship, bow first.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.length).map(move |k| match self.orientation {
            Orientation::Horizontal => Coordinate::new(self.row, self.col + k),
            Orientation::Vertical => Coordinate::new(self.row + k, self.col),
        })
    }

    fn fits(&self, size: usize) -> bool {
        let (along, across) = match self.orientation {
            Orientation::Horizontal => (self.col, self.row),
            Orientation::Vertical => (self.row, self.col),
        };
        across < size
            && along
                .checked_add(self.length)
                .map_or(false, |end| end <= size)
    }
}

/// Parses `row,col,length,h|v`, e.g. `3,4,5,v`.
impl FromStr for ShipLayout {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let bad = || FleetError::Parse(s.to_string());
        if parts.len() != 4 {
            return Err(bad());
        }
        let row = parts[0].parse().map_err(|_| bad())?;
        let col = parts[1].parse().map_err(|_| bad())?;
        let length = parts[2].parse().map_err(|_| bad())?;
        let orientation = match parts[3].to_ascii_lowercase().as_str() {
            "h" | "horizontal" => Orientation::Horizontal,
            "v" | "vertical" => Orientation::Vertical,
            _ => return Err(bad()),
        };
        Ok(ShipLayout::new(row, col, length, orientation))
    }
}

/// Fixed five-ship layout on a 10×10 board.
pub const STANDARD_FLEET: [ShipLayout; 5] = [
    ShipLayout::new(1, 1, 5, Orientation::Horizontal),
    ShipLayout::new(3, 7, 4, Orientation::Vertical),
    ShipLayout::new(5, 2, 3, Orientation::Horizontal),
    ShipLayout::new(8, 5, 3, Orientation::Horizontal),
    ShipLayout::new(7, 0, 2, Orientation::Vertical),
];

/// Errors building or firing at a [`FleetBoard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleetError {
    /// No ships were supplied.
    EmptyFleet,
    /// Ship does not fit on the board.
    ShipOutOfBounds { ship: usize },
    /// Ship shares a cell with an earlier ship.
    ShipOverlaps { ship: usize, coord: Coordinate },
    /// Ship is shorter than the minimum length.
    ShipTooShort { ship: usize, length: usize },
    /// Shot lies outside the board.
    OutOfBounds(Coordinate),
    /// The cell was already fired at.
    AlreadyFired(Coordinate),
    /// No shot has been fired at this cell.
    NotFired(Coordinate),
    /// Malformed ship description.
    Parse(String),
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetError::EmptyFleet => write!(f, "Fleet has no ships"),
            FleetError::ShipOutOfBounds { ship } => write!(f, "Ship {} does not fit on the board", ship),
            FleetError::ShipOverlaps { ship, coord } => {
                write!(f, "Ship {} overlaps another ship at {}", ship, coord)
            }
            FleetError::ShipTooShort { ship, length } => write!(
                f,
                "Ship {} has length {}, minimum is {}",
                ship, length, MIN_SHIP_LENGTH
            ),
            FleetError::OutOfBounds(c) => write!(f, "Shot {} is outside the board", c),
            FleetError::AlreadyFired(c) => write!(f, "Cell {} was already fired at", c),
            FleetError::NotFired(c) => write!(f, "No shot has been fired at {}", c),
            FleetError::Parse(s) => write!(f, "Cannot parse ship '{}', expected row,col,length,h|v", s),
        }
    }
}

impl std::error::Error for FleetError {}

/// Opponent board that answers shots from a known fleet. Always our turn;
/// the game is won once every ship is sunk.
#[derive(Debug, Clone)]
pub struct FleetBoard {
    size: usize,
    ships: Vec<Vec<Coordinate>>,
    hits: HashSet<Coordinate>,
    results: HashMap<Coordinate, CellState>,
    sunk: usize,
}

impl FleetBoard {
    /// Build a board from ship layouts. Ships must fit, must not overlap and
    /// must be at least two cells long.
    pub fn new(size: usize, layouts: &[ShipLayout]) -> Result<Self, FleetError> {
        if layouts.is_empty() {
            return Err(FleetError::EmptyFleet);
        }
        let mut occupied = HashSet::new();
        let mut ships = Vec::with_capacity(layouts.len());
        for (i, layout) in layouts.iter().enumerate() {
            if layout.length < MIN_SHIP_LENGTH {
                return Err(FleetError::ShipTooShort {
                    ship: i,
                    length: layout.length,
                });
            }
            if !layout.fits(size) {
                return Err(FleetError::ShipOutOfBounds { ship: i });
            }
            let cells: Vec<Coordinate> = layout.cells().collect();
            for &c in &cells {
                if !occupied.insert(c) {
                    return Err(FleetError::ShipOverlaps { ship: i, coord: c });
                }
            }
            ships.push(cells);
        }
        Ok(Self {
            size,
            ships,
            hits: HashSet::new(),
            results: HashMap::new(),
            sunk: 0,
        })
    }

    /// The standard fleet on a 10×10 board.
    pub fn standard() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            ships: STANDARD_FLEET.iter().map(|s| s.cells().collect()).collect(),
            hits: HashSet::new(),
            results: HashMap::new(),
            sunk: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    pub fn sunk_count(&self) -> usize {
        self.sunk
    }

    pub fn shots_fired(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` when all ships are sunk.
    pub fn all_sunk(&self) -> bool {
        self.sunk == self.ships.len()
    }

    /// Resolve a shot at `coord`.
    pub fn fire(&mut self, coord: Coordinate) -> Result<CellState, FleetError> {
        if coord.row >= self.size || coord.col >= self.size {
            return Err(FleetError::OutOfBounds(coord));
        }
        if self.results.contains_key(&coord) {
            return Err(FleetError::AlreadyFired(coord));
        }
        let result = match self.ships.iter().find(|ship| ship.contains(&coord)) {
            None => CellState::Miss,
            Some(ship) => {
                self.hits.insert(coord);
                if ship.iter().all(|c| self.hits.contains(c)) {
                    self.sunk += 1;
                    CellState::Sunk
                } else {
                    CellState::Hit
                }
            }
        };
        self.results.insert(coord, result);
        Ok(result)
    }

    /// Outcome previously returned for `coord`.
    pub fn result_at(&self, coord: Coordinate) -> Option<CellState> {
        self.results.get(&coord).copied()
    }
}

#[async_trait::async_trait]
impl OpponentBoard for FleetBoard {
    async fn is_game_over(&mut self) -> anyhow::Result<bool> {
        Ok(self.all_sunk())
    }

    async fn is_my_turn(&mut self) -> anyhow::Result<bool> {
        Ok(!self.all_sunk())
    }

    async fn fire_at(&mut self, coord: Coordinate) -> anyhow::Result<()> {
        self.fire(coord)?;
        Ok(())
    }

    async fn read_shot_result(&mut self, coord: Coordinate) -> anyhow::Result<CellState> {
        Ok(self.result_at(coord).ok_or(FleetError::NotFired(coord))?)
    }

    async fn read_game_result(&mut self) -> anyhow::Result<GameResult> {
        Ok(if self.all_sunk() {
            GameResult::Victory
        } else {
            GameResult::Unknown
        })
    }
}
