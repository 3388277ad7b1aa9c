//! Error types for microcalc-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in microcalc-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Column letter outside A..G
    #[error("Column {0:?} out of range ({min}..{max})", min = crate::MIN_COLUMN, max = crate::MAX_COLUMN)]
    ColumnOutOfRange(char),

    /// Column index outside the grid
    #[error("Column index {0} out of range (count: {count})", count = crate::COLUMN_COUNT)]
    ColumnIndexOutOfRange(usize),

    /// Row number outside 1..=21
    #[error("Row {0} out of range (1..{max})", max = crate::ROW_COUNT)]
    RowOutOfRange(i64),
}
