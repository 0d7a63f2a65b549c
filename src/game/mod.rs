//! Turn loop driving a shot strategy against an opponent board
//!
//! The opponent is anything implementing [`OpponentBoard`]: a remote game, a
//! scripted double in tests, or the in-memory [`FleetBoard`]. All waiting,
//! polling and retrying happens here; strategies never block.

#![cfg(feature = "std")]

pub mod fleet;
pub use fleet::{FleetBoard, FleetError, Orientation, ShipLayout};

use std::time::Duration;

use anyhow::Context;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use tokio::time::{sleep, timeout};

use crate::{
    config::GameConfig,
    core::{CellState, Coordinate},
    strategy::ShotStrategy,
};

/// Final verdict reported by the opponent once a game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Victory,
    Defeat,
    OpponentLeft,
    ConnectionLost,
    Unknown,
}

/// Why a game did not end in victory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    None,
    Defeat,
    OpponentLeft,
    ConnectionLost,
    Timeout,
    Unknown,
}

impl GameResult {
    pub fn failure_reason(self) -> FailureReason {
        match self {
            GameResult::Victory => FailureReason::None,
            GameResult::Defeat => FailureReason::Defeat,
            GameResult::OpponentLeft => FailureReason::OpponentLeft,
            GameResult::ConnectionLost => FailureReason::ConnectionLost,
            GameResult::Unknown => FailureReason::Unknown,
        }
    }
}

/// The collaborator a strategy plays against.
#[async_trait::async_trait]
pub trait OpponentBoard: Send {
    /// Whether the game has finished, for any reason.
    async fn is_game_over(&mut self) -> anyhow::Result<bool>;

    /// Whether we are allowed to fire now.
    async fn is_my_turn(&mut self) -> anyhow::Result<bool>;

    /// Attack `coord`.
    async fn fire_at(&mut self, coord: Coordinate) -> anyhow::Result<()>;

    /// Observed outcome of the attack on `coord`. May lag behind `fire_at`
    /// and read as `Miss` until the opponent has caught up.
    async fn read_shot_result(&mut self, coord: Coordinate) -> anyhow::Result<CellState>;

    /// Final verdict once the game is over.
    async fn read_game_result(&mut self) -> anyhow::Result<GameResult>;
}

/// One resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotRecord {
    pub coord: Coordinate,
    pub result: CellState,
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub result: GameResult,
    pub failure_reason: FailureReason,
    pub shots: usize,
    pub hits: usize,
    pub sunk: usize,
    pub history: Vec<ShotRecord>,
}

enum TurnOutcome {
    Fired,
    Exhausted,
}

/// Plays one game: asks the strategy for shots, fires them at the opponent
/// and feeds the observed outcomes back.
pub struct GameDriver<S: ShotStrategy, O: OpponentBoard> {
    strategy: S,
    opponent: O,
    config: GameConfig,
    history: Vec<ShotRecord>,
}

impl<S: ShotStrategy, O: OpponentBoard> GameDriver<S, O> {
    pub fn new(strategy: S, opponent: O, config: GameConfig) -> Self {
        Self {
            strategy,
            opponent,
            config,
            history: Vec::new(),
        }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn opponent(&self) -> &O {
        &self.opponent
    }

    /// Shots resolved so far, in firing order.
    pub fn history(&self) -> &[ShotRecord] {
        &self.history
    }

    pub fn into_parts(self) -> (S, O) {
        (self.strategy, self.opponent)
    }

    /// Run the turn loop until the opponent reports the game over, the
    /// strategy runs out of cells, or the overall timeout expires.
    pub async fn play(&mut self) -> anyhow::Result<GameReport> {
        let board_size = self.strategy.board().size();
        anyhow::ensure!(
            board_size == self.config.board_size,
            "strategy board is {}x{} but the config asks for {}x{}",
            board_size,
            board_size,
            self.config.board_size,
            self.config.board_size
        );
        let limit = self.config.overall_timeout();
        let (result, failure_reason) = match timeout(limit, self.run_loop()).await {
            Ok(outcome) => outcome?,
            Err(_) => {
                warn!("game did not finish within {:?}", limit);
                (GameResult::Unknown, FailureReason::Timeout)
            }
        };

        match result {
            GameResult::Victory => info!("game ended in victory after {} shots", self.history.len()),
            other => info!(
                "game ended without victory: result={:?}, reason={:?}",
                other, failure_reason
            ),
        }
        Ok(self.report(result, failure_reason))
    }

    async fn run_loop(&mut self) -> anyhow::Result<(GameResult, FailureReason)> {
        loop {
            if self.opponent.is_game_over().await? {
                return self.final_result().await;
            }
            if !self.opponent.is_my_turn().await? {
                self.wait_for_opponent().await;
                continue;
            }
            match self.execute_turn().await {
                Ok(TurnOutcome::Fired) => {}
                Ok(TurnOutcome::Exhausted) => {
                    warn!("every cell has been attacked but the game is not over");
                    return self.final_result().await;
                }
                Err(e) => {
                    error!("turn failed: {:#}", e);
                    return self.final_result().await;
                }
            }
        }
    }

    async fn execute_turn(&mut self) -> anyhow::Result<TurnOutcome> {
        let shot = match self.strategy.next_shot() {
            Some(shot) => shot,
            None => return Ok(TurnOutcome::Exhausted),
        };
        info!("firing at {}", shot);
        self.opponent
            .fire_at(shot)
            .await
            .with_context(|| format!("firing at {}", shot))?;
        sleep(self.config.settle_delay()).await;

        let result = self.read_result_with_retry(shot).await?;
        match result {
            CellState::Hit => info!("hit at {}", shot),
            CellState::Sunk => info!("sunk a ship at {}", shot),
            CellState::Miss => debug!("miss at {}", shot),
            CellState::Unknown => warn!("opponent reported no outcome for {}", shot),
        }
        self.strategy.register_shot_result(shot, result)?;
        self.history.push(ShotRecord {
            coord: shot,
            result,
        });
        Ok(TurnOutcome::Fired)
    }

    /// Outcomes can lag behind the shot, so a `Miss` is re-read a few times
    /// with a growing delay before it is trusted.
    async fn read_result_with_retry(&mut self, coord: Coordinate) -> anyhow::Result<CellState> {
        let retries = self.config.result_read_retries.max(1);
        let mut last = CellState::Miss;
        for attempt in 1..=retries {
            last = self
                .opponent
                .read_shot_result(coord)
                .await
                .with_context(|| format!("reading result for {}", coord))?;
            if last != CellState::Miss {
                return Ok(last);
            }
            if attempt < retries {
                sleep(self.config.retry_backoff() * attempt).await;
            }
        }
        Ok(last)
    }

    async fn wait_for_opponent(&mut self) {
        let limit = self.config.opponent_wait_timeout();
        let poll = self.config.poll_interval().max(Duration::from_millis(1));
        let mut waited = Duration::ZERO;
        // Sleep before every check; the overall timeout only fires on a yield.
        loop {
            sleep(poll).await;
            waited += poll;
            match self.opponent_turn_finished().await {
                Ok(true) => return,
                Ok(false) => {}
                Err(e) => warn!("error checking turn status: {:#}", e),
            }
            if waited >= limit {
                break;
            }
        }
        warn!("waited {:?} for the opponent's turn", limit);
    }

    async fn opponent_turn_finished(&mut self) -> anyhow::Result<bool> {
        Ok(self.opponent.is_game_over().await? || self.opponent.is_my_turn().await?)
    }

    async fn final_result(&mut self) -> anyhow::Result<(GameResult, FailureReason)> {
        let result = self.opponent.read_game_result().await?;
        Ok((result, result.failure_reason()))
    }

    fn report(&self, result: GameResult, failure_reason: FailureReason) -> GameReport {
        let count = |state: CellState| self.history.iter().filter(|s| s.result == state).count();
        GameReport {
            result,
            failure_reason,
            shots: self.history.len(),
            hits: count(CellState::Hit),
            sunk: count(CellState::Sunk),
            history: self.history.clone(),
        }
    }
}
