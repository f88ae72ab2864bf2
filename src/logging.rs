//! Logging backend for par-launch.
//!
//! Routes all `log::info!()` etc. to stderr with a timestamp and level tag.
//! stderr is the right sink for a launcher: the launched application owns
//! stdout, and error output stays visible when the launcher is run from a
//! shell or a desktop shortcut wrapper.

use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

struct StderrLogger {
    level: LevelFilter,
    // Serializes writes so interleaved log lines from the spawned child's
    // startup window stay intact.
    out: Mutex<std::io::Stderr>,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level_str = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN ",
            Level::Info => "INFO ",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        let mut out = self.out.lock();
        let _ = writeln!(out, "[{}] [{}] {}", timestamp(), level_str, record.args());
    }

    fn flush(&self) {
        let mut out = self.out.lock();
        let _ = out.flush();
    }
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Install the stderr logger at the given level.
///
/// Safe to call more than once; only the first call installs a logger.
pub fn init(level: LevelFilter) {
    let logger = LOGGER.get_or_init(|| StderrLogger {
        level,
        out: Mutex::new(std::io::stderr()),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}
