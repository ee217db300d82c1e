#![deny(missing_docs)]
//! Logging for webmention receivers built on the MF2 handler.
//!
//! The `mention_*` macros forward to the `log` facade so the handler never
//! depends on a concrete backend. Hosts that receive mentions pick where the
//! records go with [`initialize`]; tests call [`initialize_for_tests`].

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Traces individual decisions, such as which author candidate was taken.
#[macro_export]
macro_rules! mention_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Records why a source produced no entry, author or setting.
#[macro_export]
macro_rules! mention_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Records a mention that was parsed.
#[macro_export]
macro_rules! mention_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Records a source document that could only be partly interpreted.
#[macro_export]
macro_rules! mention_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Records a mention that could not be handled at all.
#[macro_export]
macro_rules! mention_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Where mention log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// A mention log file, truncated on startup.
    File(PathBuf),
    /// Stderr and stdout, split by level.
    Terminal,
    /// The terminal plus a mention log file.
    Both(PathBuf),
}

/// Installs the global mention logger at `level`.
///
/// A logger that is already installed is kept. If the mention log file
/// cannot be opened the problem goes to stderr and that sink is dropped.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = record_config();
    let terminal = |config: Config| -> Box<dyn SharedLogger> {
        TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
    };

    let sinks: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::Terminal => vec![terminal(config)],
        LogDestination::File(path) => match open_mention_log(path, level, config) {
            Some(file) => vec![file],
            None => return,
        },
        LogDestination::Both(path) => {
            let mut sinks = vec![terminal(config.clone())];
            sinks.extend(open_mention_log(path, level, config));
            sinks
        }
    };

    let _ = CombinedLogger::init(sinks);
}

/// Terminal logger for test binaries; later calls are ignored.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

// Timestamps are RFC 3339 so records line up with mention `published` values.
fn record_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn open_mention_log(
    path: PathBuf,
    level: LevelFilter,
    config: Config,
) -> Option<Box<dyn SharedLogger>> {
    match File::create(&path) {
        Ok(file) => Some(WriteLogger::new(level, config, file) as Box<dyn SharedLogger>),
        Err(err) => {
            eprintln!(
                "mention log file {} could not be opened, logging to it is disabled: {}",
                path.display(),
                err
            );
            None
        }
    }
}
