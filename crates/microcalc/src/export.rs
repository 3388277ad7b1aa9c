//! Plain-text export ("print")

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::sheet::Sheet;
use microcalc_core::{CELL_DISPLAY_WIDTH, ROW_COUNT};

/// Options for plain-text export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Spaces written before every row
    pub left_margin: usize,
}

impl ExportOptions {
    /// Options with a margin; negative margins become zero
    pub fn with_margin(left_margin: i64) -> Self {
        Self {
            left_margin: left_margin.max(0) as usize,
        }
    }
}

/// Plain-text sheet exporter
pub struct TextExporter;

impl TextExporter {
    /// Export a sheet to a file
    pub fn write_file<P: AsRef<Path>>(sheet: &Sheet, path: P, options: &ExportOptions) -> Result<()> {
        let file = File::create(path)?;
        Self::write(sheet, BufWriter::new(file), options)
    }

    /// Export a sheet to a writer
    pub fn write<W: Write>(sheet: &Sheet, mut writer: W, options: &ExportOptions) -> Result<()> {
        writer.write_all(Self::render(sheet, options).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Two empty lines, then one line per row
    ///
    /// Every cell is padded to the display width but never truncated, and
    /// trailing whitespace is trimmed before the margin is applied.
    pub fn render(sheet: &Sheet, options: &ExportOptions) -> String {
        let margin = " ".repeat(options.left_margin);
        let mut out = String::from("\n\n");

        for row in 1..=ROW_COUNT {
            let line: String = sheet
                .grid()
                .row_addresses(row)
                .map(|address| {
                    format!(
                        "{:<width$}",
                        sheet.cell(address).display_text(),
                        width = CELL_DISPLAY_WIDTH
                    )
                })
                .collect();

            out.push_str(&margin);
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }
}
