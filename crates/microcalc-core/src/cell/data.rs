//! Per-position cell state

use super::CellFlags;
use crate::format::{fit_left, fit_right, format_number};
use crate::{
    CELL_INPUT_LIMIT, DEFAULT_DECIMALS, DEFAULT_FIELD_WIDTH, MAX_DECIMALS, MAX_FIELD_WIDTH,
    MIN_FIELD_WIDTH, SCIENTIFIC_DECIMALS,
};

/// Content classification shown on the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Formula,
    Numeric,
    Text,
}

impl CellKind {
    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            CellKind::Formula => "Formula",
            CellKind::Numeric => "Numeric",
            CellKind::Text => "Text",
        }
    }
}

/// Complete state of a single cell
///
/// Invariants kept by the setters: `contents` holds at most
/// [`CELL_INPUT_LIMIT`] characters, `decimals` lies in `-1..=11` and
/// `field_width` in `1..=20`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    flags: CellFlags,
    contents: String,
    value: f64,
    decimals: i32,
    field_width: u32,
}

impl Cell {
    /// Create an empty text cell with default formatting
    pub fn new() -> Self {
        Self {
            flags: CellFlags::TEXT,
            contents: String::new(),
            value: 0.0,
            decimals: DEFAULT_DECIMALS,
            field_width: DEFAULT_FIELD_WIDTH,
        }
    }

    pub fn flags(&self) -> CellFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: CellFlags) {
        self.flags = flags;
    }

    pub fn insert_flags(&mut self, flags: CellFlags) {
        self.flags.insert(flags);
    }

    pub fn remove_flags(&mut self, flags: CellFlags) {
        self.flags.remove(flags);
    }

    /// Raw text as last edited
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Replace the raw text, truncating it to the input limit
    pub fn set_contents(&mut self, contents: impl Into<String>) {
        let mut contents = contents.into();
        if let Some((idx, _)) = contents.char_indices().nth(CELL_INPUT_LIMIT) {
            contents.truncate(idx);
        }
        self.contents = contents;
    }

    /// Last evaluated value (zero for text cells)
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Fractional digits, or `-1` for scientific notation
    pub fn decimals(&self) -> i32 {
        self.decimals
    }

    pub fn field_width(&self) -> u32 {
        self.field_width
    }

    /// Set display formatting, clamping both values into their ranges
    pub fn set_format(&mut self, decimals: i64, field_width: i64) {
        self.decimals =
            decimals.clamp(i64::from(SCIENTIFIC_DECIMALS), i64::from(MAX_DECIMALS)) as i32;
        self.field_width =
            field_width.clamp(i64::from(MIN_FIELD_WIDTH), i64::from(MAX_FIELD_WIDTH)) as u32;
    }

    /// Turn the cell into empty text, keeping its formatting
    pub fn clear(&mut self) {
        self.flags = CellFlags::TEXT;
        self.contents.clear();
        self.value = 0.0;
    }

    /// Store literal text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.flags = CellFlags::TEXT;
        self.set_contents(text);
        self.value = 0.0;
    }

    /// Store an accepted expression and its value
    pub fn set_expression(&mut self, contents: impl Into<String>, value: f64, is_formula: bool) {
        self.flags = if is_formula {
            CellFlags::CONSTANT | CellFlags::FORMULA
        } else {
            CellFlags::CONSTANT
        };
        self.set_contents(contents);
        self.value = value;
    }

    /// Text without an accepted expression
    pub fn is_text(&self) -> bool {
        self.flags.is_text()
    }

    pub fn is_formula(&self) -> bool {
        self.flags.contains(CellFlags::FORMULA)
    }

    pub fn is_locked(&self) -> bool {
        self.flags.contains(CellFlags::LOCKED)
    }

    pub fn is_overwritten(&self) -> bool {
        self.flags.contains(CellFlags::OVERWRITTEN)
    }

    pub fn kind(&self) -> CellKind {
        if self.flags.contains(CellFlags::FORMULA) {
            CellKind::Formula
        } else if self.flags.contains(CellFlags::CONSTANT) {
            CellKind::Numeric
        } else {
            CellKind::Text
        }
    }

    /// Unpadded display text: the contents of a text cell, otherwise the formatted value
    pub fn display_text(&self) -> String {
        if self.is_text() {
            self.contents.clone()
        } else {
            format_number(self.value, self.decimals)
        }
    }

    /// Display text fitted to `width` columns: text left-aligned, numbers right-aligned
    pub fn display_field(&self, width: usize) -> String {
        if self.is_text() {
            fit_left(&self.contents, width)
        } else {
            fit_right(&format_number(self.value, self.decimals), width)
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}
