// src/utils/logger.rs

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::io::Write;

static LOGGER: StderrLogger = StderrLogger;

struct StderrLogger;

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
  log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Maps `-v` / `-q` counts onto a level; Info when neither is given.
pub fn level_from_flags(verbose: u8, quiet: u8) -> LevelFilter {
  match (verbose, quiet) {
    (0, 0) => LevelFilter::Info,
    (_, q) if q > 0 => {
      if q > 1 {
        LevelFilter::Error
      } else {
        LevelFilter::Warn
      }
    }
    (1, _) => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  }
}

fn tag(level: Level) -> &'static str {
  match level {
    Level::Error => "error",
    Level::Warn => "warn",
    Level::Info => "info",
    Level::Debug => "debug",
    Level::Trace => "trace",
  }
}

impl log::Log for StderrLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record: &Record) {
    if self.enabled(record.metadata()) {
      // Format: "[warn] Section VECTR appears more than once"
      let mut err = std::io::stderr().lock();
      let _ = writeln!(err, "[{}] {}", tag(record.level()), record.args());
    }
  }

  fn flush(&self) {
    let _ = std::io::stderr().flush();
  }
}
