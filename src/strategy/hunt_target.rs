// Hunt/target shot selection.
// Hunts over the checkerboard parity cells until something is hit, then works
// through the neighbours of every hit until the ship is reported sunk.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use log::{debug, trace};

use super::ShotStrategy;
use crate::core::{Board, CellState, Coordinate, StrategyError};

/// Hunt/target heuristic with a single shared target queue.
///
/// Only one ship is assumed to be in progress at a time: a `Sunk` report
/// clears the whole queue and hit cluster, including candidates that may
/// belong to a different, adjacent ship.
#[derive(Debug, Clone)]
pub struct HuntTargetStrategy {
    board: Board,
    target_queue: VecDeque<Coordinate>,
    hit_cluster: Vec<Coordinate>,
    pending: Option<Coordinate>,
}

impl HuntTargetStrategy {
    /// Start a game on an empty `size`×`size` board.
    pub fn new(size: usize) -> Self {
        Self::with_board(Board::new(size))
    }

    /// Start from an existing board, e.g. one with earlier outcomes filled in.
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            target_queue: VecDeque::new(),
            hit_cluster: Vec::new(),
            pending: None,
        }
    }

    /// Candidates waiting to be shot, head first. May hold stale entries.
    pub fn target_queue(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.target_queue.iter().copied()
    }

    /// Hits on the ship currently being targeted.
    pub fn hit_cluster(&self) -> &[Coordinate] {
        &self.hit_cluster
    }

    /// Shot handed out by `next_shot` whose outcome has not been registered.
    pub fn pending_shot(&self) -> Option<Coordinate> {
        self.pending
    }

    /// Returns `true` while queued candidates remain.
    pub fn is_targeting(&self) -> bool {
        !self.target_queue.is_empty()
    }

    fn next_target(&mut self) -> Option<Coordinate> {
        while let Some(candidate) = self.target_queue.pop_front() {
            if self.board.is_unknown(candidate) {
                return Some(candidate);
            }
            trace!("dropping stale target {}", candidate);
        }
        None
    }

    fn hunt(&self) -> Option<Coordinate> {
        let board = &self.board;
        board
            .all_coordinates()
            .filter(Coordinate::is_parity)
            .find(|&c| board.is_unknown(c))
            .or_else(|| board.all_coordinates().find(|&c| board.is_unknown(c)))
    }

    fn enqueue_unknown_neighbors(&mut self, hit: Coordinate) {
        for n in hit.neighbors() {
            if self.board.is_unknown(n) {
                self.target_queue.push_back(n);
            }
        }
    }
}

impl Default for HuntTargetStrategy {
    fn default() -> Self {
        Self::with_board(Board::default())
    }
}

impl ShotStrategy for HuntTargetStrategy {
    fn next_shot(&mut self) -> Option<Coordinate> {
        // Asking again before reporting hands back the same cell.
        if let Some(p) = self.pending {
            if self.board.is_unknown(p) {
                return Some(p);
            }
        }

        let shot = match self.next_target() {
            Some(target) => {
                debug!("target mode: {}", target);
                Some(target)
            }
            None => {
                let hunt = self.hunt();
                if let Some(c) = hunt {
                    debug!("hunt mode: {}", c);
                }
                hunt
            }
        };
        self.pending = shot;
        shot
    }

    fn register_shot_result(
        &mut self,
        coord: Coordinate,
        result: CellState,
    ) -> Result<(), StrategyError> {
        if result == CellState::Unknown {
            return Err(StrategyError::UnknownOutcome { coord });
        }
        if self.pending != Some(coord) {
            return Err(StrategyError::NotIssued {
                coord,
                pending: self.pending,
            });
        }
        self.board.set(coord, result)?;
        self.pending = None;

        match result {
            CellState::Hit => {
                self.hit_cluster.push(coord);
                self.enqueue_unknown_neighbors(coord);
                debug!(
                    "hit at {}; cluster {} cell(s), {} queued",
                    coord,
                    self.hit_cluster.len(),
                    self.target_queue.len()
                );
            }
            CellState::Sunk => {
                debug!(
                    "sunk at {}; dropping {} queued target(s)",
                    coord,
                    self.target_queue.len()
                );
                self.hit_cluster.clear();
                self.target_queue.clear();
            }
            CellState::Miss | CellState::Unknown => {}
        }
        Ok(())
    }

    fn board(&self) -> &Board {
        &self.board
    }
}
