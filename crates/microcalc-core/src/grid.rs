//! Grid type

use crate::cell::{Cell, CellAddress, CellRange, CellRangeIterator};
use crate::{CELL_COUNT, COLUMN_COUNT, ROW_COUNT};

/// The fixed-size rectangle of cells
///
/// Every address maps to exactly one cell; cells are created in bulk and
/// reset in place, never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Cell storage in row-major order
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of empty text cells
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::new(); CELL_COUNT],
        }
    }

    /// Reinitialize every cell to the default empty state
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::new());
    }

    /// The range covering the whole grid
    pub fn bounds() -> CellRange {
        CellRange::new(CellAddress::default(), Self::last_address())
    }

    fn last_address() -> CellAddress {
        CellAddress::from_indices(COLUMN_COUNT - 1, ROW_COUNT)
            .unwrap_or_default()
    }

    fn index(address: CellAddress) -> usize {
        (address.row() as usize - 1) * COLUMN_COUNT + address.column_index()
    }

    // === Cell Access ===

    /// Get the cell at an address
    pub fn cell(&self, address: CellAddress) -> &Cell {
        &self.cells[Self::index(address)]
    }

    /// Get a mutable cell at an address
    pub fn cell_mut(&mut self, address: CellAddress) -> &mut Cell {
        &mut self.cells[Self::index(address)]
    }

    /// All addresses in row-major order (row 1 columns A..G, then row 2, ...)
    ///
    /// Every call starts a fresh traversal.
    pub fn addresses(&self) -> Addresses {
        Addresses(Self::bounds().cells())
    }

    /// Iterate over `(address, cell)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellAddress, &Cell)> + '_ {
        self.addresses().zip(self.cells.iter())
    }

    /// Addresses of one row, left to right
    pub fn row_addresses(&self, row: u32) -> impl Iterator<Item = CellAddress> {
        (0..COLUMN_COUNT).filter_map(move |col| CellAddress::from_indices(col, row).ok())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Row-major iterator over every grid address
#[derive(Debug, Clone)]
pub struct Addresses(CellRangeIterator);

impl Iterator for Addresses {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Addresses {}
