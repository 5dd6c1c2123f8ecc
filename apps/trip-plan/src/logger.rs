//! Minimal stderr backend for the `log` facade.

use anyhow::{Result, anyhow};
use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Parse a `HOS_LOG` value; unset means `info`.
pub fn parse_level(value: Option<&str>) -> Result<LevelFilter> {
    match value {
        None => Ok(LevelFilter::Info),
        Some(s) => s
            .trim()
            .parse()
            .map_err(|_| anyhow!("HOS_LOG must be one of off|error|warn|info|debug|trace, got {s:?}")),
    }
}

/// Install the stderr logger at `level`.
pub fn init(level: LevelFilter) -> Result<()> {
    log::set_logger(&LOGGER).map_err(|_| anyhow!("a logger is already installed"))?;
    log::set_max_level(level);
    Ok(())
}
