//! # microcalc-core
//!
//! Core data structures for the MicroCalc spreadsheet.
//!
//! This crate provides the fundamental types used throughout MicroCalc:
//! - [`CellAddress`] and [`CellRange`] - Validated coordinates into the fixed grid
//! - [`Cell`] and [`CellFlags`] - Per-position state and its independent status bits
//! - [`Grid`] - The fixed 7 x 21 container of cells
//! - [`format_number`] - The fixed-point / scientific display rule
//!
//! ## Example
//!
//! ```rust
//! use microcalc_core::{CellAddress, CellFlags, Grid};
//!
//! let mut grid = Grid::new();
//! let a1 = CellAddress::parse("A1").unwrap();
//!
//! let cell = grid.cell_mut(a1);
//! cell.set_contents("42");
//! cell.set_value(42.0);
//! cell.set_flags(CellFlags::CONSTANT);
//!
//! assert_eq!(grid.cell(a1).value(), 42.0);
//! assert_eq!(grid.addresses().count(), 147);
//! ```

pub mod cell;
pub mod error;
pub mod format;
pub mod grid;

// Re-exports for convenience
pub use cell::{Cell, CellAddress, CellFlags, CellKind, CellRange, Direction};
pub use error::{Error, Result};
pub use format::{fit_left, fit_right, format_number};
pub use grid::{Addresses, Grid};

/// First column letter of the grid
pub const MIN_COLUMN: char = 'A';

/// Last column letter of the grid
pub const MAX_COLUMN: char = 'G';

/// Number of columns in the grid
pub const COLUMN_COUNT: usize = 7;

/// Number of rows in the grid (rows are numbered 1..=ROW_COUNT)
pub const ROW_COUNT: u32 = 21;

/// Total number of addressable cells
pub const CELL_COUNT: usize = COLUMN_COUNT * ROW_COUNT as usize;

/// Default number of fractional digits
pub const DEFAULT_DECIMALS: i32 = 2;

/// Decimal count meaning "scientific notation"
pub const SCIENTIFIC_DECIMALS: i32 = -1;

/// Largest allowed decimal count
pub const MAX_DECIMALS: i32 = 11;

/// Default display width of a cell
pub const DEFAULT_FIELD_WIDTH: u32 = 10;

/// Smallest allowed field width
pub const MIN_FIELD_WIDTH: u32 = 1;

/// Largest allowed field width
pub const MAX_FIELD_WIDTH: u32 = 20;

/// Fixed on-screen width of one grid column
pub const CELL_DISPLAY_WIDTH: usize = 11;

/// Maximum number of characters stored as a cell's contents
pub const CELL_INPUT_LIMIT: usize = 70;
