//! Cell address and range types

use crate::error::{Error, Result};
use crate::{COLUMN_COUNT, MAX_COLUMN, MIN_COLUMN, ROW_COUNT};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "G21")
///
/// MicroCalc addresses combine a single column letter (A-G) with a row number (1-21).
/// An address can only be obtained through validation, so every value of this type
/// points at an existing cell.
///
/// The derived ordering is row-major: `A1 < B1 < ... < G1 < A2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row number (1-based)
    row: u32,
    /// Column index (0-based, A=0 ... G=6)
    col: u8,
}

/// Cursor movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl CellAddress {
    /// Create an address from a column letter (case-insensitive) and a 1-based row
    pub fn new(column: char, row: u32) -> Result<Self> {
        let col = Self::letter_to_column(column)?;
        Self::from_indices(col, row)
    }

    /// Create an address from a 0-based column index and a 1-based row
    pub fn from_indices(col: usize, row: u32) -> Result<Self> {
        if col >= COLUMN_COUNT {
            return Err(Error::ColumnIndexOutOfRange(col));
        }
        if !Self::is_row_in_range(i64::from(row)) {
            return Err(Error::RowOutOfRange(i64::from(row)));
        }

        Ok(Self {
            row,
            col: col as u8,
        })
    }

    /// Parse a cell address from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use microcalc_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("b12").unwrap();
    /// assert_eq!(addr.column(), 'B');
    /// assert_eq!(addr.row(), 12);
    ///
    /// assert!(CellAddress::parse("H1").is_err());
    /// assert!(CellAddress::parse("A22").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut chars = s.chars();

        let letter = chars
            .next()
            .ok_or_else(|| Error::InvalidAddress("empty address".into()))?;
        let col = Self::letter_to_column(letter)?;

        let row_str = chars.as_str();
        if row_str.is_empty() || !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!("invalid row number in '{}'", s)));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        Self::from_indices(col, row)
    }

    /// Column letter (always uppercase)
    pub fn column(&self) -> char {
        (MIN_COLUMN as u8 + self.col) as char
    }

    /// Column index (A = 0)
    pub fn column_index(&self) -> usize {
        self.col as usize
    }

    /// Row number (1-based)
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Check whether a letter names a grid column (case-insensitive)
    pub fn is_column_in_range(letter: char) -> bool {
        (MIN_COLUMN..=MAX_COLUMN).contains(&letter.to_ascii_uppercase())
    }

    /// Check whether a row number lies inside the grid
    pub fn is_row_in_range(row: i64) -> bool {
        (1..=i64::from(ROW_COUNT)).contains(&row)
    }

    /// Convert a column letter to its index (A = 0 ... G = 6)
    pub fn letter_to_column(letter: char) -> Result<usize> {
        if !Self::is_column_in_range(letter) {
            return Err(Error::ColumnOutOfRange(letter));
        }
        Ok((letter.to_ascii_uppercase() as u8 - MIN_COLUMN as u8) as usize)
    }

    /// The address one step away in `direction`, wrapping around the grid.
    ///
    /// Vertical steps wrap within the column. Horizontal steps that leave the
    /// left or right edge continue on the previous or next row, and wrap from
    /// the last row back to the first (and vice versa).
    pub fn step(self, direction: Direction) -> Self {
        let last_col = (COLUMN_COUNT - 1) as u8;
        let (row, col) = match direction {
            Direction::Up => (if self.row == 1 { ROW_COUNT } else { self.row - 1 }, self.col),
            Direction::Down => (if self.row == ROW_COUNT { 1 } else { self.row + 1 }, self.col),
            Direction::Left if self.col == 0 => {
                (if self.row == 1 { ROW_COUNT } else { self.row - 1 }, last_col)
            }
            Direction::Left => (self.row, self.col - 1),
            Direction::Right if self.col == last_col => {
                (if self.row == ROW_COUNT { 1 } else { self.row + 1 }, 0)
            }
            Direction::Right => (self.row, self.col + 1),
        };

        Self { row, col }
    }

    /// The address in the next column of the same row, if any
    pub fn right_neighbor(&self) -> Option<Self> {
        Self::from_indices(self.column_index() + 1, self.row).ok()
    }
}

impl Default for CellAddress {
    fn default() -> Self {
        Self { row: 1, col: 0 }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column(), self.row)
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular range of cells (e.g., "A1>B10")
///
/// The corners are normalized on construction, so the order in which the two
/// addresses are given does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress {
                row: a.row.min(b.row),
                col: a.col.min(b.col),
            },
            end: CellAddress {
                row: a.row.max(b.row),
                col: a.col.max(b.col),
            },
        }
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current: Some(self.start),
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}>{}", self.start, self.end)
        }
    }
}

/// Iterator over cells in a range
#[derive(Debug, Clone)]
pub struct CellRangeIterator {
    range: CellRange,
    current: Option<CellAddress>,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        let addr = self.current?;

        self.current = if addr.col < self.range.end.col {
            Some(CellAddress {
                row: addr.row,
                col: addr.col + 1,
            })
        } else if addr.row < self.range.end.row {
            Some(CellAddress {
                row: addr.row + 1,
                col: self.range.start.col,
            })
        } else {
            None
        };

        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.current {
            None => 0,
            Some(addr) => {
                let width = (self.range.end.col - self.range.start.col) as usize + 1;
                let rows_below = (self.range.end.row - addr.row) as usize;
                let in_row = (self.range.end.col - addr.col) as usize + 1;
                rows_below * width + in_row
            }
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellRangeIterator {}
