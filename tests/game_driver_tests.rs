use std::collections::HashSet;
use std::time::Duration;

use battleship_hunter::{
    CellState, Coordinate, FailureReason, FleetBoard, GameConfig, GameDriver, GameResult,
    HuntTargetStrategy, OpponentBoard, Orientation, ShipLayout, ShotStrategy,
};

fn fast_config() -> GameConfig {
    GameConfig {
        opponent_wait_timeout_ms: 50,
        ..GameConfig::without_delays()
    }
}

#[tokio::test]
async fn test_plays_standard_fleet_to_victory() {
    let mut driver = GameDriver::new(
        HuntTargetStrategy::new(10),
        FleetBoard::standard(),
        fast_config(),
    );
    let report = driver.play().await.unwrap();

    assert_eq!(report.result, GameResult::Victory);
    assert_eq!(report.failure_reason, FailureReason::None);
    assert_eq!(report.sunk, 5);
    assert_eq!(report.hits + report.sunk, 17);
    assert!(report.shots <= 100);
    assert_eq!(report.shots, report.history.len());

    let unique: HashSet<Coordinate> = report.history.iter().map(|s| s.coord).collect();
    assert_eq!(unique.len(), report.shots);

    let (strategy, fleet) = driver.into_parts();
    assert!(fleet.all_sunk());
    assert_eq!(fleet.shots_fired(), report.shots);
    for shot in &report.history {
        assert_eq!(strategy.board().get(shot.coord).unwrap(), shot.result);
    }
}

#[tokio::test]
async fn test_custom_fleet_on_small_board() {
    let fleet = FleetBoard::new(
        4,
        &[
            ShipLayout::new(0, 0, 2, Orientation::Vertical),
            ShipLayout::new(3, 1, 3, Orientation::Horizontal),
        ],
    )
    .unwrap();
    let config = GameConfig {
        board_size: 4,
        ..fast_config()
    };
    let mut driver = GameDriver::new(HuntTargetStrategy::new(4), fleet, config);
    let report = driver.play().await.unwrap();
    assert_eq!(report.result, GameResult::Victory);
    assert_eq!(report.sunk, 2);
    assert!(report.shots <= 16);
}

/// Reports `Miss` for the first few reads of every shot before the real
/// outcome shows up.
struct LaggingBoard {
    inner: FleetBoard,
    lag: usize,
    reads: usize,
}

#[async_trait::async_trait]
impl OpponentBoard for LaggingBoard {
    async fn is_game_over(&mut self) -> anyhow::Result<bool> {
        self.inner.is_game_over().await
    }

    async fn is_my_turn(&mut self) -> anyhow::Result<bool> {
        self.inner.is_my_turn().await
    }

    async fn fire_at(&mut self, coord: Coordinate) -> anyhow::Result<()> {
        self.reads = 0;
        self.inner.fire_at(coord).await
    }

    async fn read_shot_result(&mut self, coord: Coordinate) -> anyhow::Result<CellState> {
        self.reads += 1;
        if self.reads <= self.lag {
            return Ok(CellState::Miss);
        }
        self.inner.read_shot_result(coord).await
    }

    async fn read_game_result(&mut self) -> anyhow::Result<GameResult> {
        self.inner.read_game_result().await
    }
}

#[tokio::test]
async fn test_lagging_results_are_retried() {
    let opponent = LaggingBoard {
        inner: FleetBoard::standard(),
        lag: 2,
        reads: 0,
    };
    let mut driver = GameDriver::new(HuntTargetStrategy::new(10), opponent, fast_config());
    let report = driver.play().await.unwrap();

    assert_eq!(report.result, GameResult::Victory);
    let (_, opponent) = driver.into_parts();
    for shot in &report.history {
        assert_eq!(opponent.inner.result_at(shot.coord), Some(shot.result));
    }
}

/// Hands the turn to the opponent after every shot and back on the next
/// poll.
struct AlternatingBoard {
    inner: FleetBoard,
    opponent_moving: bool,
    waits: usize,
}

#[async_trait::async_trait]
impl OpponentBoard for AlternatingBoard {
    async fn is_game_over(&mut self) -> anyhow::Result<bool> {
        self.inner.is_game_over().await
    }

    async fn is_my_turn(&mut self) -> anyhow::Result<bool> {
        if self.opponent_moving {
            self.opponent_moving = false;
            self.waits += 1;
            return Ok(false);
        }
        Ok(true)
    }

    async fn fire_at(&mut self, coord: Coordinate) -> anyhow::Result<()> {
        self.opponent_moving = true;
        self.inner.fire_at(coord).await
    }

    async fn read_shot_result(&mut self, coord: Coordinate) -> anyhow::Result<CellState> {
        self.inner.read_shot_result(coord).await
    }

    async fn read_game_result(&mut self) -> anyhow::Result<GameResult> {
        self.inner.read_game_result().await
    }
}

#[tokio::test]
async fn test_waits_for_opponent_turns() {
    let opponent = AlternatingBoard {
        inner: FleetBoard::standard(),
        opponent_moving: false,
        waits: 0,
    };
    let mut driver = GameDriver::new(HuntTargetStrategy::new(10), opponent, fast_config());
    let report = driver.play().await.unwrap();

    assert_eq!(report.result, GameResult::Victory);
    assert!(driver.opponent().waits > 0);
}

/// Fails every shot and reports a lost connection.
struct BrokenBoard;

#[async_trait::async_trait]
impl OpponentBoard for BrokenBoard {
    async fn is_game_over(&mut self) -> anyhow::Result<bool> {
        Ok(false)
    }

    async fn is_my_turn(&mut self) -> anyhow::Result<bool> {
        Ok(true)
    }

    async fn fire_at(&mut self, _coord: Coordinate) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("board went away"))
    }

    async fn read_shot_result(&mut self, _coord: Coordinate) -> anyhow::Result<CellState> {
        Ok(CellState::Miss)
    }

    async fn read_game_result(&mut self) -> anyhow::Result<GameResult> {
        Ok(GameResult::ConnectionLost)
    }
}

#[tokio::test]
async fn test_failed_turn_ends_game_with_final_result() {
    let mut driver = GameDriver::new(HuntTargetStrategy::new(10), BrokenBoard, fast_config());
    let report = driver.play().await.unwrap();
    assert_eq!(report.result, GameResult::ConnectionLost);
    assert_eq!(report.failure_reason, FailureReason::ConnectionLost);
    assert_eq!(report.shots, 0);
}

/// Every shot misses and the game never ends on its own.
struct EmptySea {
    fired: HashSet<Coordinate>,
}

#[async_trait::async_trait]
impl OpponentBoard for EmptySea {
    async fn is_game_over(&mut self) -> anyhow::Result<bool> {
        Ok(false)
    }

    async fn is_my_turn(&mut self) -> anyhow::Result<bool> {
        Ok(true)
    }

    async fn fire_at(&mut self, coord: Coordinate) -> anyhow::Result<()> {
        anyhow::ensure!(self.fired.insert(coord), "{} fired twice", coord);
        Ok(())
    }

    async fn read_shot_result(&mut self, _coord: Coordinate) -> anyhow::Result<CellState> {
        Ok(CellState::Miss)
    }

    async fn read_game_result(&mut self) -> anyhow::Result<GameResult> {
        Ok(GameResult::Defeat)
    }
}

#[tokio::test]
async fn test_exhausted_board_stops_firing() {
    let opponent = EmptySea {
        fired: HashSet::new(),
    };
    let config = GameConfig {
        board_size: 3,
        ..fast_config()
    };
    let mut driver = GameDriver::new(HuntTargetStrategy::new(3), opponent, config);
    let report = driver.play().await.unwrap();

    assert_eq!(report.result, GameResult::Defeat);
    assert_eq!(report.failure_reason, FailureReason::Defeat);
    assert_eq!(report.shots, 9);
    assert_eq!(report.hits, 0);
    assert_eq!(driver.opponent().fired.len(), 9);
}

/// Never our turn, never over.
struct StalledBoard;

#[async_trait::async_trait]
impl OpponentBoard for StalledBoard {
    async fn is_game_over(&mut self) -> anyhow::Result<bool> {
        Ok(false)
    }

    async fn is_my_turn(&mut self) -> anyhow::Result<bool> {
        Ok(false)
    }

    async fn fire_at(&mut self, _coord: Coordinate) -> anyhow::Result<()> {
        Ok(())
    }

    async fn read_shot_result(&mut self, _coord: Coordinate) -> anyhow::Result<CellState> {
        Ok(CellState::Miss)
    }

    async fn read_game_result(&mut self) -> anyhow::Result<GameResult> {
        Ok(GameResult::Unknown)
    }
}

#[tokio::test]
async fn test_overall_timeout() {
    let config = GameConfig {
        overall_timeout_secs: 1,
        opponent_wait_timeout_ms: 20,
        poll_interval_ms: 5,
        ..GameConfig::without_delays()
    };
    let mut driver = GameDriver::new(HuntTargetStrategy::new(10), StalledBoard, config);
    let report = driver.play().await.unwrap();
    assert_eq!(report.result, GameResult::Unknown);
    assert_eq!(report.failure_reason, FailureReason::Timeout);
    assert!(report.history.is_empty());
}

#[tokio::test]
async fn test_overall_timeout_with_zero_opponent_wait() {
    let config = GameConfig {
        overall_timeout_secs: 1,
        opponent_wait_timeout_ms: 0,
        poll_interval_ms: 5,
        ..GameConfig::without_delays()
    };
    let mut driver = GameDriver::new(HuntTargetStrategy::new(10), StalledBoard, config);
    let report = tokio::time::timeout(Duration::from_secs(5), driver.play())
        .await
        .expect("play() did not honour the overall timeout")
        .unwrap();
    assert_eq!(report.failure_reason, FailureReason::Timeout);
}

#[tokio::test]
async fn test_board_size_mismatch_rejected() {
    let mut driver = GameDriver::new(
        HuntTargetStrategy::new(6),
        FleetBoard::standard(),
        fast_config(),
    );
    let err = driver.play().await.unwrap_err();
    assert!(err.to_string().contains("6x6"), "unexpected error: {}", err);
    assert!(driver.history().is_empty());
    assert_eq!(driver.opponent().shots_fired(), 0);
}

#[test]
fn test_failure_reason_mapping() {
    assert_eq!(GameResult::Victory.failure_reason(), FailureReason::None);
    assert_eq!(GameResult::Defeat.failure_reason(), FailureReason::Defeat);
    assert_eq!(
        GameResult::OpponentLeft.failure_reason(),
        FailureReason::OpponentLeft
    );
    assert_eq!(
        GameResult::ConnectionLost.failure_reason(),
        FailureReason::ConnectionLost
    );
    assert_eq!(GameResult::Unknown.failure_reason(), FailureReason::Unknown);
}
