//! Error types for the explorer core.

use std::{error::Error, fmt, io};

/// Error type for loading host application metadata and configuration.
///
/// Rendering itself is total; only reading the inputs can fail.
#[derive(Debug)]
pub enum ExplorerError {
    /// An underlying I/O error.
    Io(io::Error),
    /// A document could not be parsed as JSON.
    Json(serde_json::Error),
    /// A catch-all error with a message.
    Other(String),
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Json(err) => write!(f, "invalid json: {err}"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ExplorerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Other(_) => None,
        }
    }
}

impl From<io::Error> for ExplorerError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Convenience result type for the explorer core.
pub type Result<T> = std::result::Result<T, ExplorerError>;
