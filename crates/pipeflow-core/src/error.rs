use std::path::PathBuf;

use thiserror::Error;

/// Canonical result for pipeflow.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Raised by path producers at construction when the root is missing.
    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    /// A cursor was dereferenced while resting at end.
    #[error("Invalid cursor state: {0}")]
    InvalidCursorState(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
