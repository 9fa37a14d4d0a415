//! Minimal stderr logger for the command-line tool.
//!
//! Controlled by the `PYGMENTIZE_LOG` environment variable:
//! `error`, `warn`, `info`, `debug` or `trace` (also `0`-`5`). Unset or
//! anything else means no logging.

use std::env;
use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

pub const LOG_ENV: &str = "PYGMENTIZE_LOG";

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{} {}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Parse a level name or number; `None` for unrecognised input.
#[must_use]
pub fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_ascii_lowercase().as_str() {
        "0" | "off" => Some(LevelFilter::Off),
        "1" | "error" => Some(LevelFilter::Error),
        "2" | "warn" => Some(LevelFilter::Warn),
        "3" | "info" => Some(LevelFilter::Info),
        "4" | "debug" => Some(LevelFilter::Debug),
        "5" | "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Install the logger at the level named by `PYGMENTIZE_LOG`. Calling it
/// twice is harmless; the second call keeps the first logger.
pub fn init() {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(LevelFilter::Off);
    if level == LevelFilter::Off {
        return;
    }
    if log::set_boxed_logger(Box::new(StderrLogger { level })).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_and_numbers() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" TRACE "), Some(LevelFilter::Trace));
        assert_eq!(parse_level("1"), Some(LevelFilter::Error));
        assert_eq!(parse_level("verbose"), None);
    }
}
