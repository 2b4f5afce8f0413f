//! Structured logging setup for the runner binary.

use crate::error::RunError;
use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const TRACE_ENV: &str = "KEP_TRACE";
pub const FORMAT_ENV: &str = "KEP_LOG_FORMAT";
pub const FILE_ENV: &str = "KEP_LOG_FILE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

fn parse_format(value: &str) -> Result<LogFormat, RunError> {
    if value.eq_ignore_ascii_case("pretty") {
        Ok(LogFormat::Pretty)
    } else if value.eq_ignore_ascii_case("json") {
        Ok(LogFormat::Json)
    } else {
        Err(RunError::Logging {
            reason: format!("invalid {FORMAT_ENV} '{value}' (expected 'json' or 'pretty')"),
        })
    }
}

fn build_filter(level: &str) -> Result<EnvFilter, RunError> {
    if level.eq_ignore_ascii_case("off") {
        return Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()));
    }
    EnvFilter::try_new(level).map_err(|err| RunError::Logging {
        reason: format!("invalid log filter: {err}"),
    })
}

fn open_log_file(path: &str) -> Result<File, RunError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| RunError::Logging {
            reason: format!("failed to open log file: {err}"),
        })
}

fn map_init_err<E: std::fmt::Display>(err: E) -> RunError {
    RunError::Logging {
        reason: err.to_string(),
    }
}

/// Install a tracing subscriber writing to stderr.
///
/// `level` takes precedence over `KEP_TRACE`; without either, logging is
/// off. `KEP_LOG_FORMAT` selects `pretty` (default) or `json`, and
/// `KEP_LOG_FILE` adds a second, non-ANSI layer appending to that file.
/// Returns false if a subscriber was already installed.
///
/// # Errors
///
/// Returns [`RunError::Logging`] for an invalid filter or format, or an
/// unwritable log file.
pub fn init_logging(level: Option<String>) -> Result<bool, RunError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let level_value = level
        .or_else(|| env::var(TRACE_ENV).ok())
        .unwrap_or_else(|| "off".to_string());
    let filter = build_filter(&level_value)?;
    let format = parse_format(&env::var(FORMAT_ENV).unwrap_or_else(|_| "pretty".to_string()))?;
    let log_file = env::var(FILE_ENV).ok();

    match format {
        LogFormat::Json => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .json();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(path) = log_file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(open_log_file(&path)?)
                    .with_ansi(false)
                    .json();
                base.with(file_layer).try_init().map_err(map_init_err)?;
            } else {
                base.try_init().map_err(map_init_err)?;
            }
        }
        LogFormat::Pretty => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .pretty();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(path) = log_file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(open_log_file(&path)?)
                    .with_ansi(false)
                    .pretty();
                base.with(file_layer).try_init().map_err(map_init_err)?;
            } else {
                base.try_init().map_err(map_init_err)?;
            }
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_are_case_insensitive() {
        assert_eq!(parse_format("JSON").unwrap(), LogFormat::Json);
        assert_eq!(parse_format("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(parse_format("xml").unwrap_err().code(), "RUN_LOGGING");
    }

    #[test]
    fn filters_accept_levels_and_directives() {
        assert!(build_filter("off").is_ok());
        assert!(build_filter("debug").is_ok());
        assert!(build_filter("kep_highs=debug,kep_runner=info").is_ok());
        assert!(build_filter("kep_highs=[").is_err());
    }
}
