//! Generic logger utility functions
//!
//! Two sinks are set up: stdout, filtered to the level requested at init, and
//! the session log file, which records everything down to `TRACE` so per-cycle
//! controller output is always available after a run.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use log::{self, info};
use colored::{ColoredString, Colorize};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a stdout log level of at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// # Notes
///
/// - `min_level` applies to stdout only and must be at least as verbose as
///   `log::Level::Info`.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    min_level: self::LevelFilter,
    session: &session::Session
) -> Result<(), LoggerInitError> {

    if min_level < log::Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(min_level))
    }

    let log_file = fern::log_file(session.log_file_path.clone())
        .map_err(LoggerInitError::LogFileInitError)?;

    let stdout = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{:10.6} {}] {}",
                session::get_elapsed_seconds(),
                level_to_str(record.level()),
                message
            ))
        })
        .level(min_level)
        .chain(std::io::stdout());

    // The file always includes the target, and no colour codes
    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{:10.6} {}] {}: {}",
                session::get_elapsed_seconds(),
                level_to_plain_str(record.level()),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Trace)
        .chain(log_file);

    fern::Dispatch::new()
        .chain(stdout)
        .chain(file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!("    Stdout log level: {:?}", min_level);
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the string representation of a log level
fn level_to_plain_str(level: log::Level) -> &'static str {
    match level {
        log::Level::Trace => "TRC",
        log::Level::Debug => "DBG",
        log::Level::Info  => "INF",
        log::Level::Warn  => "WRN",
        log::Level::Error => "ERR"
    }
}

/// Get the coloured string representation of a log level
fn level_to_str(level: log::Level) -> ColoredString {
    let s = level_to_plain_str(level);

    match level {
        log::Level::Trace => s.dimmed().italic(),
        log::Level::Debug => s.dimmed(),
        log::Level::Info  => s.normal(),
        log::Level::Warn  => s.yellow(),
        log::Level::Error => s.red().bold()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_level_to_str() {
        assert_eq!(level_to_plain_str(log::Level::Info), "INF");
        assert_eq!(level_to_plain_str(log::Level::Warn), "WRN");
        assert_eq!(level_to_str(log::Level::Error).to_string().contains("ERR"), true);
        assert_eq!(level_to_str(log::Level::Trace).to_string().contains("TRC"), true);
    }
}
