//! Stderr logger for the `log` facade.
//!
//! Controlled by the YAMLITE_LOG environment variable:
//! - off, error, warn (default), info, debug, trace
//!
//! Each `-v` on the command line raises the level by one step and takes
//! precedence over the environment.

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "[{}] [{}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

fn level_from_env() -> LevelFilter {
    std::env::var("YAMLITE_LOG")
        .ok()
        .and_then(|val| val.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn)
}

const LEVELS: [LevelFilter; 6] = [
    LevelFilter::Off,
    LevelFilter::Error,
    LevelFilter::Warn,
    LevelFilter::Info,
    LevelFilter::Debug,
    LevelFilter::Trace,
];

fn raise(level: LevelFilter, steps: usize) -> LevelFilter {
    let start = LEVELS.iter().position(|l| *l == level).unwrap_or(0);
    LEVELS
        .get(start + steps)
        .copied()
        .unwrap_or(LevelFilter::Trace)
}

/// Install the logger. Safe to call once per process.
pub fn init(verbosity: usize) {
    let level = match verbosity {
        0 => level_from_env(),
        n => raise(LevelFilter::Warn, n),
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
