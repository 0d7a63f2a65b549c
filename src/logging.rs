#![cfg(feature = "std")]

use std::env;
use std::io::Write;
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use log::{self, Level, LevelFilter, Metadata, Record};

const CRATE_TARGET: &str = "battleship_hunter";

struct StderrLogger;

static STARTED: OnceLock<Instant> = OnceLock::new();

/// Records from other crates are only shown at `warn` and above.
fn wanted(metadata: &Metadata) -> bool {
    metadata.level() <= log::max_level()
        && (metadata.target().starts_with(CRATE_TARGET) || metadata.level() <= Level::Warn)
}

/// `  12.345s INFO  game: firing at (0,0)`
fn render(level: Level, target: &str, elapsed: Duration, args: &std::fmt::Arguments) -> String {
    let target = target
        .strip_prefix(CRATE_TARGET)
        .map(|t| t.trim_start_matches("::"))
        .filter(|t| !t.is_empty())
        .unwrap_or(target);
    format!(
        "{:>4}.{:03}s {:<5} {}: {}",
        elapsed.as_secs(),
        elapsed.subsec_millis(),
        level,
        target,
        args
    )
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        wanted(metadata)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let elapsed = STARTED.get_or_init(Instant::now).elapsed();
            // stdout is reserved for the sim report
            let _ = writeln!(
                std::io::stderr().lock(),
                "{}",
                render(record.level(), record.target(), elapsed, record.args())
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// Initialize logging with a level taken from the `HUNTER_LOG` environment variable.
/// Defaults to `info` if the variable is not set or invalid.
pub fn init_logging() {
    STARTED.get_or_init(Instant::now);
    let level = env::var("HUNTER_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
