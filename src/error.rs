use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a configuration directory")]
    NoConfigDir,

    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Rejected text from forms and command-line arguments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    Date(String),

    #[error("invalid time '{0}', expected HH:MM")]
    Time(String),

    #[error("end time {end} must be after start time {start}")]
    EmptyInterval { start: String, end: String },

    #[error("title must not be empty")]
    EmptyTitle,
}
