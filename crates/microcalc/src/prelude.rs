//! Prelude module - common imports for microcalc users
//!
//! ```rust
//! use microcalc::prelude::*;
//! ```

pub use crate::{
    CellAddress,
    CellFlags,
    Direction,
    // Results
    EditOutcome,
    // Error types
    Error,
    // I/O types
    ExportOptions,
    FormulaError,
    JsonStorage,
    RecalcReport,
    Result,
    // Main types
    Sheet,
    TextExporter,
};
