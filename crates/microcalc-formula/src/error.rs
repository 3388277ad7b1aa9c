//! Formula error types

use microcalc_core::CellAddress;
use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
///
/// Every variant carries the 1-based character position at which the
/// failure was detected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Malformed syntax
    #[error("{message}")]
    Parse { message: String, position: usize },

    /// Column or row outside the grid
    #[error("{message}")]
    Range { message: String, position: usize },

    /// Function argument outside the function's domain
    #[error("{function} expects {expected}")]
    Domain {
        function: String,
        expected: &'static str,
        position: usize,
    },

    /// Divisor is zero
    #[error("division by zero")]
    DivisionByZero { position: usize },

    /// A cell was reached again while it was still being resolved
    #[error("cyclic reference in {address}")]
    CyclicReference { address: CellAddress, position: usize },

    /// Unknown function
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String, position: usize },
}

/// Error category, without the details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulaErrorKind {
    Parse,
    Range,
    Domain,
    DivisionByZero,
    CyclicReference,
    UnknownFunction,
}

impl FormulaError {
    pub(crate) fn parse<S: Into<String>>(message: S, position: usize) -> Self {
        FormulaError::Parse {
            message: message.into(),
            position,
        }
    }

    pub(crate) fn range<S: Into<String>>(message: S, position: usize) -> Self {
        FormulaError::Range {
            message: message.into(),
            position,
        }
    }

    /// 1-based character position of the failure
    pub fn position(&self) -> usize {
        match self {
            FormulaError::Parse { position, .. }
            | FormulaError::Range { position, .. }
            | FormulaError::Domain { position, .. }
            | FormulaError::DivisionByZero { position }
            | FormulaError::CyclicReference { position, .. }
            | FormulaError::UnknownFunction { position, .. } => *position,
        }
    }

    pub fn kind(&self) -> FormulaErrorKind {
        match self {
            FormulaError::Parse { .. } => FormulaErrorKind::Parse,
            FormulaError::Range { .. } => FormulaErrorKind::Range,
            FormulaError::Domain { .. } => FormulaErrorKind::Domain,
            FormulaError::DivisionByZero { .. } => FormulaErrorKind::DivisionByZero,
            FormulaError::CyclicReference { .. } => FormulaErrorKind::CyclicReference,
            FormulaError::UnknownFunction { .. } => FormulaErrorKind::UnknownFunction,
        }
    }
}
