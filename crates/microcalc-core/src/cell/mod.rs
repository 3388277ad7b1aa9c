//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A rectangle of cells (e.g., "A1>B10")
//! - [`CellFlags`] - Independent status bits of a cell
//! - [`Cell`] - Complete per-position state

mod address;
mod data;
mod flags;

pub use address::{CellAddress, CellRange, CellRangeIterator, Direction};
pub use data::{Cell, CellKind};
pub use flags::CellFlags;
