use std::path::PathBuf;

use anyhow::Context;
use battleship_hunter::{
    init_logging, FleetBoard, GameConfig, GameDriver, HuntTargetStrategy, ShipLayout,
    DEFAULT_BOARD_SIZE,
};
use clap::Parser;

/// Play one hunt/target game against an in-memory fleet and print the report
/// as JSON.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON run configuration; delays default to zero without one.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Board side length, overriding the config.
    #[arg(long)]
    size: Option<usize>,
    /// Ship as row,col,length,h|v. Repeat for each ship; defaults to the
    /// standard fleet.
    #[arg(long = "ship")]
    ships: Vec<ShipLayout>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::without_delays(),
    };
    if let Some(size) = cli.size {
        config.board_size = size;
        config.validate()?;
    }

    let fleet = if cli.ships.is_empty() {
        anyhow::ensure!(
            config.board_size == DEFAULT_BOARD_SIZE,
            "the standard fleet needs a {}x{} board, got {}; pass --ship for other sizes",
            DEFAULT_BOARD_SIZE,
            DEFAULT_BOARD_SIZE,
            config.board_size
        );
        FleetBoard::standard()
    } else {
        FleetBoard::new(config.board_size, &cli.ships).context("invalid fleet")?
    };
    let strategy = HuntTargetStrategy::new(config.board_size);

    let mut driver = GameDriver::new(strategy, fleet, config);
    let report = driver.play().await?;

    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
