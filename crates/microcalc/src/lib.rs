//! # microcalc
//!
//! A small fixed-grid spreadsheet.
//!
//! MicroCalc keeps a 7 x 21 grid of cells (columns `A`..`G`, rows `1`..`21`).
//! Each cell holds literal text or a numeric expression that may reference
//! other cells, rectangular ranges and a fixed set of math functions.
//!
//! ## Features
//!
//! - Cell editing with input classification and text overflow reservation
//! - Full-sheet recalculation that collects every failing cell
//! - Column formatting with neighbor locking
//! - Toroidal cursor movement
//! - Fixed-layout grid rendering and a status line
//! - JSON persistence and plain-text export
//!
//! ## Example
//!
//! ```rust
//! use microcalc::prelude::*;
//!
//! let mut sheet = Sheet::new();
//! let a1: CellAddress = "A1".parse().unwrap();
//! let a2: CellAddress = "A2".parse().unwrap();
//!
//! sheet.edit(a1, "10");
//! let outcome = sheet.edit(a2, "A1+5");
//! assert!(outcome.success);
//! assert_eq!(sheet.cell(a2).value(), 15.0);
//!
//! sheet.edit(a1, "20");
//! assert_eq!(sheet.cell(a2).value(), 25.0);
//!
//! // Save to file
//! // JsonStorage::write_file(&sheet, "sheet.mcalc.json").unwrap();
//! ```

pub mod error;
pub mod export;
pub mod prelude;
pub mod render;
pub mod sheet;
pub mod storage;

pub use error::{Error, Result};
pub use export::{ExportOptions, TextExporter};
pub use render::GRID_HEADER;
pub use sheet::{EditOutcome, RecalcReport, Sheet};
pub use storage::JsonStorage;

// Re-export core types
pub use microcalc_core::{
    Cell, CellAddress, CellFlags, CellKind, CellRange, Direction, Grid, COLUMN_COUNT, ROW_COUNT,
};

// Re-export formula types
pub use microcalc_formula::{
    evaluate, parse_formula, Evaluation, FormulaError, FormulaErrorKind, FormulaExpr,
    FormulaResult,
};
