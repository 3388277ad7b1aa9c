//! Fixed-layout text rendering of a sheet

use crate::sheet::Sheet;
use microcalc_core::{CELL_DISPLAY_WIDTH, ROW_COUNT};

/// Column header line of the rendered grid
pub const GRID_HEADER: &str =
    "    A           B           C           D           E           F           G";

impl Sheet {
    /// Render the header and every row, one 11-character field per cell
    ///
    /// The cursor's field keeps its inner nine characters between brackets.
    pub fn render_grid(&self) -> String {
        let mut lines = Vec::with_capacity(ROW_COUNT as usize + 1);
        lines.push(GRID_HEADER.to_string());

        for row in 1..=ROW_COUNT {
            let mut line = format!("{:02} ", row);
            for address in self.grid().row_addresses(row) {
                let field = self.cell(address).display_field(CELL_DISPLAY_WIDTH);
                if address == self.cursor() {
                    let inner: String = field.chars().skip(1).take(CELL_DISPLAY_WIDTH - 2).collect();
                    line.push('[');
                    line.push_str(&inner);
                    line.push(']');
                } else {
                    line.push_str(&field);
                }
            }
            lines.push(line);
        }

        lines.join("\n")
    }

    /// `"<address>  <kind>  AutoCalc: ON|OFF"` for the cursor cell
    pub fn status_line(&self) -> String {
        format!(
            "{}  {}  AutoCalc: {}",
            self.cursor(),
            self.kind_text(self.cursor()),
            if self.auto_calc() { "ON" } else { "OFF" }
        )
    }
}
