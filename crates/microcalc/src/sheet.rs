//! Sheet controller
//!
//! [`Sheet`] owns the grid and is the only thing that mutates it: edits are
//! classified and evaluated here, recalculation sweeps run here, and column
//! formatting and cursor movement keep the flag bookkeeping consistent.

use crate::error::Result;
use microcalc_core::{
    Cell, CellAddress, CellFlags, Direction, Grid, CELL_COUNT, CELL_DISPLAY_WIDTH,
    CELL_INPUT_LIMIT, DEFAULT_FIELD_WIDTH, ROW_COUNT,
};
use microcalc_formula::{evaluate, function_registry, Evaluation, FormulaResult};
use tracing::debug;

/// Result of a cell edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub success: bool,
    pub message: String,
    /// 1-based position of a rejected expression's error
    pub error_position: Option<usize>,
}

impl EditOutcome {
    fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            error_position: None,
        }
    }

    fn failed(message: impl Into<String>, error_position: Option<usize>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error_position,
        }
    }
}

/// Result of a recalculation sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecalcReport {
    /// Number of formula cells re-evaluated successfully
    pub calculated: usize,
    /// One `"<address>: <message> (Pos <n>)"` entry per failing cell, in row-major order
    pub errors: Vec<String>,
}

impl RecalcReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A spreadsheet: the grid plus the auto-calculation mode and cursor
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    grid: Grid,
    auto_calc: bool,
    cursor: CellAddress,
}

impl Sheet {
    /// Create an empty sheet with auto-calculation on and the cursor at A1
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            auto_calc: true,
            cursor: CellAddress::default(),
        }
    }

    /// Builder-style auto-calculation setting
    pub fn with_auto_calc(mut self, auto_calc: bool) -> Self {
        self.auto_calc = auto_calc;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn cell(&self, address: CellAddress) -> &Cell {
        self.grid.cell(address)
    }

    pub fn auto_calc(&self) -> bool {
        self.auto_calc
    }

    pub fn set_auto_calc(&mut self, auto_calc: bool) {
        self.auto_calc = auto_calc;
    }

    pub fn toggle_auto_calc(&mut self) {
        self.auto_calc = !self.auto_calc;
    }

    /// Currently selected cell
    pub fn cursor(&self) -> CellAddress {
        self.cursor
    }

    pub fn set_cursor(&mut self, address: CellAddress) {
        self.cursor = address;
    }

    /// Reset every cell, the cursor and the auto-calculation mode
    pub fn clear(&mut self) {
        self.grid.reset();
        self.cursor = CellAddress::default();
        self.auto_calc = true;
    }

    /// Evaluate an expression against the sheet without storing it
    ///
    /// Referenced expression cells still get their cached values refreshed.
    pub fn evaluate(&mut self, text: &str) -> FormulaResult<Evaluation> {
        evaluate(text, &mut self.grid)
    }

    /// Status line text for a cell's content: `Formula`, `Numeric` or `Text`
    pub fn kind_text(&self, address: CellAddress) -> &'static str {
        self.grid.cell(address).kind().as_str()
    }

    // === Editing ===

    /// Store raw input in a cell
    ///
    /// Input that looks like an expression is evaluated. If evaluation fails
    /// and the input starts like a number or formula, the edit is rejected;
    /// otherwise it falls back to literal text. Literal text reserves the
    /// empty cells to its right for its overflow.
    pub fn edit(&mut self, address: CellAddress, input: &str) -> EditOutcome {
        if self.grid.cell(address).is_locked() {
            return EditOutcome::failed("cell is locked", None);
        }

        let value = truncate_chars(input.trim_end(), CELL_INPUT_LIMIT);
        self.clear_overwritten_trail(address);

        if value.is_empty() {
            self.grid.cell_mut(address).clear();
            return EditOutcome::ok("cell cleared");
        }

        if !is_expression_like(value) {
            debug!(%address, "storing input as text");
            return self.store_text(address, value);
        }

        let evaluation = match evaluate(value, &mut self.grid) {
            Ok(evaluation) => evaluation,
            Err(err) if looks_numeric(value) => {
                debug!(%address, error = %err, "rejected expression");
                return EditOutcome::failed(err.to_string(), Some(err.position()));
            }
            Err(err) => {
                debug!(%address, error = %err, "expression fell back to text");
                return self.store_text(address, value);
            }
        };

        debug!(%address, value = evaluation.value, is_formula = evaluation.is_formula, "stored expression");
        self.grid
            .cell_mut(address)
            .set_expression(value, evaluation.value, evaluation.is_formula);

        if self.auto_calc {
            let report = self.recalculate();
            if !report.is_success() {
                return EditOutcome::failed(report.errors.join("; "), None);
            }
        }

        EditOutcome::ok(if evaluation.is_formula {
            "formula stored"
        } else {
            "value stored"
        })
    }

    fn store_text(&mut self, address: CellAddress, text: &str) -> EditOutcome {
        self.grid.cell_mut(address).set_text(text);
        self.reserve_overflow(address, text.chars().count());
        EditOutcome::ok("text stored")
    }

    /// Reset the run of continuation cells directly right of `start`
    fn clear_overwritten_trail(&mut self, start: CellAddress) {
        let mut next = start.right_neighbor();
        while let Some(address) = next {
            let cell = self.grid.cell_mut(address);
            if !cell.is_overwritten() {
                break;
            }
            cell.clear();
            next = address.right_neighbor();
        }
    }

    /// Mark cells right of `start` as continuation slots for `len` characters of text
    fn reserve_overflow(&mut self, start: CellAddress, len: usize) {
        let mut remaining = len as i64 - i64::from(DEFAULT_FIELD_WIDTH);
        let mut next = start.right_neighbor();

        while let Some(address) = next {
            next = address.right_neighbor();
            let cell = self.grid.cell_mut(address);

            if remaining <= 0 {
                if cell.is_overwritten() {
                    cell.clear();
                }
                continue;
            }

            if !cell.contents().is_empty() && !cell.is_overwritten() {
                break;
            }

            cell.set_text("");
            cell.insert_flags(CellFlags::OVERWRITTEN);
            remaining -= CELL_DISPLAY_WIDTH as i64;
        }
    }

    // === Recalculation ===

    /// Re-evaluate every formula cell in row-major order
    ///
    /// Failing cells keep their previous value; the sweep always visits
    /// every cell.
    pub fn recalculate(&mut self) -> RecalcReport {
        let mut report = RecalcReport::default();

        for address in self.grid.addresses() {
            let cell = self.grid.cell(address);
            if !cell.is_formula() {
                continue;
            }

            let contents = cell.contents().to_string();
            match evaluate(&contents, &mut self.grid) {
                Ok(evaluation) => {
                    let cell = self.grid.cell_mut(address);
                    cell.set_value(evaluation.value);
                    cell.insert_flags(CellFlags::CALCULATED);
                    report.calculated += 1;
                }
                Err(err) => report
                    .errors
                    .push(format!("{}: {} (Pos {})", address, err, err.position())),
            }
        }

        debug!(
            calculated = report.calculated,
            errors = report.errors.len(),
            "recalculated sheet"
        );
        report
    }

    // === Formatting ===

    /// Set the display format of `column` for rows `from_row..=to_row`
    ///
    /// The rows may be given in either order and are clamped into the grid.
    /// A field wider than the default locks (and blanks) the cell in the
    /// next column of each row; a default-or-narrower field unlocks it.
    pub fn format_range(
        &mut self,
        column: char,
        from_row: i64,
        to_row: i64,
        decimals: i64,
        field_width: i64,
    ) -> Result<()> {
        let col = CellAddress::letter_to_column(column)?;

        let (from_row, to_row) = if from_row > to_row {
            (to_row, from_row)
        } else {
            (from_row, to_row)
        };
        let rows = i64::from(ROW_COUNT);
        let from_row = from_row.clamp(1, rows) as u32;
        let to_row = to_row.clamp(1, rows) as u32;

        for row in from_row..=to_row {
            let address = CellAddress::from_indices(col, row)?;
            let cell = self.grid.cell_mut(address);
            cell.set_format(decimals, field_width);
            let wide = cell.field_width() > DEFAULT_FIELD_WIDTH;

            if let Some(neighbor) = address.right_neighbor() {
                let neighbor = self.grid.cell_mut(neighbor);
                if wide {
                    neighbor.clear();
                    neighbor.insert_flags(CellFlags::LOCKED);
                } else {
                    neighbor.remove_flags(CellFlags::LOCKED);
                }
            }
        }

        debug!(%column, from_row, to_row, decimals, field_width, "formatted range");
        Ok(())
    }

    // === Navigation ===

    /// The first selectable cell one or more steps from `start`
    ///
    /// Locked and continuation cells are skipped. Gives up after one full
    /// traversal of the grid and returns `start`.
    pub fn move_from(&self, start: CellAddress, direction: Direction) -> CellAddress {
        let mut current = start;
        for _ in 0..CELL_COUNT {
            current = current.step(direction);
            if self.grid.cell(current).flags().is_selectable() {
                return current;
            }
        }
        start
    }

    /// Move the cursor and return its new position
    pub fn move_cursor(&mut self, direction: Direction) -> CellAddress {
        self.cursor = self.move_from(self.cursor, direction);
        self.cursor
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Starts like a number or a formula
fn looks_numeric(input: &str) -> bool {
    input
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | '(' | ')'))
}

fn is_expression_like(input: &str) -> bool {
    if looks_numeric(input) {
        return true;
    }

    if input
        .split_whitespace()
        .next()
        .is_some_and(|token| CellAddress::parse(token).is_ok())
    {
        return true;
    }

    if input.contains(['>', '+', '-', '*', '/', '^']) {
        return true;
    }

    let upper = input.to_uppercase();
    function_registry()
        .names()
        .iter()
        .any(|name| upper.strip_prefix(name).is_some_and(|rest| rest.starts_with('(')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    #[test]
    fn test_classification() {
        assert!(is_expression_like("12"));
        assert!(is_expression_like("(1)"));
        assert!(is_expression_like("b7"));
        assert!(is_expression_like("A1 total"));
        assert!(is_expression_like("net-income"));
        assert!(is_expression_like("sqrt(2)"));
        assert!(!is_expression_like("Revenue"));
        assert!(!is_expression_like("SQRT 2"));
        assert!(!is_expression_like("H1"));

        assert!(looks_numeric("-x"));
        assert!(!looks_numeric(" 1"));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("äöü", 2), "äö");
        assert_eq!(truncate_chars("ab", 5), "ab");
    }

    #[test]
    fn test_edit_messages() {
        let mut sheet = Sheet::new();
        assert_eq!(sheet.edit(addr("A1"), "10").message, "value stored");
        assert_eq!(sheet.edit(addr("A2"), "A1+5").message, "formula stored");
        assert_eq!(sheet.edit(addr("A3"), "Total").message, "text stored");
        assert_eq!(sheet.edit(addr("A3"), "   ").message, "cell cleared");
        assert_eq!(sheet.kind_text(addr("A1")), "Numeric");
        assert_eq!(sheet.kind_text(addr("A2")), "Formula");
        assert_eq!(sheet.kind_text(addr("A3")), "Text");
    }

    #[test]
    fn test_rejected_expression_leaves_cell_unchanged() {
        let mut sheet = Sheet::new();
        sheet.edit(addr("B2"), "7");

        let outcome = sheet.edit(addr("B2"), "1/0");
        assert_eq!(
            outcome,
            EditOutcome {
                success: false,
                message: "division by zero".into(),
                error_position: Some(4),
            }
        );
        assert_eq!(sheet.cell(addr("B2")).contents(), "7");
        assert_eq!(sheet.cell(addr("B2")).value(), 7.0);
    }

    #[test]
    fn test_ambiguous_input_degrades_to_text() {
        let mut sheet = Sheet::new();
        let outcome = sheet.edit(addr("A1"), "net-income");
        assert!(outcome.success);
        assert_eq!(outcome.message, "text stored");
        assert!(sheet.cell(addr("A1")).is_text());
        assert_eq!(sheet.cell(addr("A1")).contents(), "net-income");
    }

    #[test]
    fn test_input_is_trimmed_and_truncated() {
        let mut sheet = Sheet::new();
        sheet.edit(addr("A1"), "5   ");
        assert_eq!(sheet.cell(addr("A1")).contents(), "5");

        sheet.edit(addr("A2"), &"x".repeat(90));
        assert_eq!(sheet.cell(addr("A2")).contents().len(), CELL_INPUT_LIMIT);
    }

    #[test]
    fn test_overflow_reservation() {
        let mut sheet = Sheet::new();
        // 30 chars: budget 20, then 9, then exhausted
        sheet.edit(addr("A1"), "This heading is thirty chars!!");

        assert!(sheet.cell(addr("B1")).is_overwritten());
        assert!(sheet.cell(addr("C1")).is_overwritten());
        assert!(!sheet.cell(addr("D1")).is_overwritten());

        // shorter text releases the tail it no longer needs
        sheet.edit(addr("A1"), "Fifteen chars!!");
        assert!(sheet.cell(addr("B1")).is_overwritten());
        assert!(!sheet.cell(addr("C1")).is_overwritten());
        assert_eq!(sheet.cell(addr("C1")).flags(), CellFlags::TEXT);
    }

    #[test]
    fn test_overflow_stops_at_occupied_cell() {
        let mut sheet = Sheet::new();
        sheet.edit(addr("C1"), "42");
        sheet.edit(addr("A1"), "A rather long label that spills over");

        assert!(sheet.cell(addr("B1")).is_overwritten());
        assert_eq!(sheet.cell(addr("C1")).value(), 42.0);
        assert!(!sheet.cell(addr("C1")).is_overwritten());
        assert!(!sheet.cell(addr("D1")).is_overwritten());
    }

    #[test]
    fn test_editing_clears_previous_overflow() {
        let mut sheet = Sheet::new();
        sheet.edit(addr("A1"), "A rather long label that spills over");
        assert!(sheet.cell(addr("B1")).is_overwritten());

        sheet.edit(addr("A1"), "3");
        assert!(!sheet.cell(addr("B1")).is_overwritten());
        assert!(!sheet.cell(addr("C1")).is_overwritten());
    }

    #[test]
    fn test_locked_cell_rejects_edits() {
        let mut sheet = Sheet::new();
        sheet.format_range('A', 1, 1, 2, 15).unwrap();

        let outcome = sheet.edit(addr("B1"), "5");
        assert!(!outcome.success);
        assert_eq!(outcome.message, "cell is locked");
        assert_eq!(sheet.cell(addr("B1")).contents(), "");
    }

    #[test]
    fn test_format_range_normalizes_rows() {
        let mut sheet = Sheet::new();
        sheet.format_range('c', 30, -4, 40, 0).unwrap();

        for row in 1..=ROW_COUNT {
            let cell = sheet.cell(CellAddress::new('C', row).unwrap());
            assert_eq!((cell.decimals(), cell.field_width()), (11, 1));
        }
        assert!(sheet.format_range('H', 1, 2, 2, 10).is_err());
    }

    #[test]
    fn test_format_range_clamps_wide_inputs() {
        let mut sheet = Sheet::new();
        sheet
            .format_range('D', i64::MIN, i64::MAX, i64::from(i32::MAX) + 1, i64::MAX)
            .unwrap();

        for row in 1..=ROW_COUNT {
            let cell = sheet.cell(CellAddress::new('D', row).unwrap());
            assert_eq!((cell.decimals(), cell.field_width()), (11, 20));
            assert!(sheet.cell(CellAddress::new('E', row).unwrap()).is_locked());
        }
    }

    #[test]
    fn test_format_last_column_has_no_neighbor() {
        let mut sheet = Sheet::new();
        sheet.format_range('G', 1, 1, 2, 20).unwrap();
        assert_eq!(sheet.cell(addr("G1")).field_width(), 20);
        assert!(!sheet.cell(addr("A2")).is_locked());
    }

    #[test]
    fn test_move_skips_unselectable_cells() {
        let mut sheet = Sheet::new();
        sheet.format_range('A', 1, 1, 2, 15).unwrap();
        assert_eq!(sheet.move_from(addr("A1"), Direction::Right), addr("C1"));

        assert_eq!(sheet.move_from(addr("G1"), Direction::Right), addr("A2"));
        assert_eq!(sheet.move_from(addr("A1"), Direction::Up), addr("A21"));
        assert_eq!(sheet.move_from(addr("A1"), Direction::Left), addr("G21"));
    }

    #[test]
    fn test_move_on_fully_locked_sheet_stays_put() {
        let mut sheet = Sheet::new();
        for address in sheet.grid.addresses() {
            sheet.grid.cell_mut(address).insert_flags(CellFlags::LOCKED);
        }
        assert_eq!(sheet.move_from(addr("D4"), Direction::Down), addr("D4"));
    }

    #[test]
    fn test_move_cursor() {
        let mut sheet = Sheet::new();
        assert_eq!(sheet.move_cursor(Direction::Down), addr("A2"));
        assert_eq!(sheet.cursor(), addr("A2"));
    }

    #[test]
    fn test_clear_resets_state() {
        let mut sheet = Sheet::new().with_auto_calc(false);
        sheet.edit(addr("A1"), "1");
        sheet.set_cursor(addr("C3"));

        sheet.clear();
        assert_eq!(sheet, Sheet::new());
    }

    #[test]
    fn test_recalculate_marks_calculated() {
        let mut sheet = Sheet::new().with_auto_calc(false);
        sheet.edit(addr("A1"), "2");
        sheet.edit(addr("A2"), "A1*10");
        assert!(!sheet.cell(addr("A2")).flags().contains(CellFlags::CALCULATED));

        let report = sheet.recalculate();
        assert_eq!(report, RecalcReport { calculated: 1, errors: vec![] });
        assert!(sheet.cell(addr("A2")).flags().contains(CellFlags::CALCULATED));
    }
}
