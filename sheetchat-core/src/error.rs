//! Error taxonomy for spreadsheet reads and chat queries

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a cell range out of a spreadsheet file.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The file could not be opened or is not a valid spreadsheet container.
    #[error("failed to read workbook {}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// The range specifier is not valid column-letter/row-number notation.
    #[error("invalid cell range '{spec}': {reason}")]
    InvalidRange { spec: String, reason: String },
}

impl ReadError {
    pub(crate) fn invalid_range(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        ReadError::InvalidRange {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by a chat-completion query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Connection failures, timeouts, and non-2xx HTTP statuses.
    #[error("network error")]
    Network(#[source] reqwest::Error),

    /// The response body could not be decoded into the expected shape.
    #[error("invalid API response shape")]
    ResponseShape(#[source] serde_json::Error),

    /// Anything else, including a query worker that died without reporting.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Failure of the full read-prompt-query pipeline.
#[derive(Debug, Error)]
pub enum AskError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
