//! Diagnostic logging setup.
//!
//! The interactive UI owns the terminal, so diagnostics only go to a file
//! there. One-shot commands log to stderr.

use std::error::Error as StdError;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Where diagnostic output should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Install no subscriber at all.
    Disabled,
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// Interactive sessions log only when a file was requested.
    pub fn for_interactive(log_file: Option<PathBuf>) -> Self {
        log_file.map(LogTarget::File).unwrap_or(LogTarget::Disabled)
    }

    /// One-shot commands log to the file if given, else stderr.
    pub fn for_one_shot(log_file: Option<PathBuf>) -> Self {
        log_file.map(LogTarget::File).unwrap_or(LogTarget::Stderr)
    }
}

#[derive(Debug)]
pub enum LoggingError {
    /// The log file could not be opened for appending.
    Open {
        /// Path of the log file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A global subscriber was already installed.
    AlreadyInitialized(String),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::Open { path, source } => {
                write!(f, "Failed to open log file {}: {}", path.display(), source)
            }
            LoggingError::AlreadyInitialized(reason) => {
                write!(f, "Logging already initialized: {reason}")
            }
        }
    }
}

impl StdError for LoggingError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            LoggingError::Open { source, .. } => Some(source),
            LoggingError::AlreadyInitialized(_) => None,
        }
    }
}

/// `RUST_LOG` when set and valid, otherwise `info`.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Install the global `tracing` subscriber for `target`.
pub fn init_tracing(target: &LogTarget) -> Result<(), LoggingError> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());
    let result = match target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    result.map_err(|err| LoggingError::AlreadyInitialized(err.to_string()))
}
