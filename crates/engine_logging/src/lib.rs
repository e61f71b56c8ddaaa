#![deny(missing_docs)]
//! Shared logging utilities for the thumbnail workspace.
//!
//! Library crates only emit through the `engine_*` macros below and never
//! install a logger. Binaries call [`initialize`] once at startup; tests call
//! [`initialize_for_tests`].

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    ThreadLogMode, WriteLogger,
};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogDestination {
    /// Write to the log file only.
    File,
    /// Write to terminal (stdout/stderr).
    #[default]
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Logger settings chosen by the binary.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Where log lines go.
    pub destination: LogDestination,
    /// Maximum level emitted.
    pub level: LevelFilter,
    /// File used by `File` and `Both`.
    pub file_path: PathBuf,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            destination: LogDestination::Terminal,
            level: LevelFilter::Info,
            file_path: PathBuf::from("./logfile.log"),
        }
    }
}

/// Installs the global logger described by `options`.
///
/// Returns an error if the log file cannot be created or a logger is already
/// installed.
pub fn initialize(options: &LogOptions) -> Result<(), String> {
    let level = options.level;
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match options.destination {
        LogDestination::File => vec![create_file_logger(options, config)?],
        LogDestination::Terminal => vec![TermLogger::new(
            level,
            config,
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )],
        LogDestination::Both => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
                level,
                config.clone(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )];
            loggers.push(create_file_logger(options, config)?);
            loggers
        }
    };

    CombinedLogger::init(loggers).map_err(|err| err.to_string())
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        build_config(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    // Worker threads are named (`downloader-N`, `resizer`); show the name on every line.
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Error)
        .set_thread_mode(ThreadLogMode::Names)
        .build()
}

fn create_file_logger(
    options: &LogOptions,
    config: Config,
) -> Result<Box<dyn SharedLogger>, String> {
    let file = File::create(&options.file_path)
        .map_err(|err| format!("could not create log file {:?}: {err}", options.file_path))?;
    let logger: Box<dyn SharedLogger> = WriteLogger::new(options.level, config, file);
    Ok(logger)
}
