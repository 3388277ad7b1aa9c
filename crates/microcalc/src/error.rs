//! Error types for the sheet facade

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by sheet operations and sheet I/O
#[derive(Debug, Error)]
pub enum Error {
    /// Address, column or row outside the grid
    #[error(transparent)]
    Core(#[from] microcalc_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed sheet document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
