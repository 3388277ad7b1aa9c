//! JSON sheet documents
//!
//! A document holds the auto-calculation flag and one entry per grid
//! address in row-major order:
//!
//! ```json
//! {
//!   "auto_calc": true,
//!   "cells": [
//!     { "address": "A1", "flags": "CONSTANT", "contents": "42",
//!       "value": 42.0, "decimals": 2, "field_width": 10 }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::sheet::Sheet;
use microcalc_core::{CellAddress, CellFlags, DEFAULT_DECIMALS, DEFAULT_FIELD_WIDTH};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Serialize, Deserialize)]
struct SheetDocument {
    #[serde(default)]
    auto_calc: bool,
    #[serde(default)]
    cells: Vec<CellDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CellDocument {
    address: String,
    #[serde(default)]
    flags: CellFlags,
    #[serde(default)]
    contents: Option<String>,
    #[serde(default)]
    value: f64,
    #[serde(default = "default_decimals")]
    decimals: i64,
    #[serde(default = "default_field_width")]
    field_width: i64,
}

fn default_decimals() -> i64 {
    i64::from(DEFAULT_DECIMALS)
}

fn default_field_width() -> i64 {
    i64::from(DEFAULT_FIELD_WIDTH)
}

/// Reads and writes sheets as JSON documents
pub struct JsonStorage;

impl JsonStorage {
    /// Write a sheet to a file
    pub fn write_file<P: AsRef<Path>>(sheet: &Sheet, path: P) -> Result<()> {
        let file = File::create(path)?;
        Self::write(sheet, BufWriter::new(file))
    }

    /// Write a sheet to a writer as pretty-printed JSON
    pub fn write<W: Write>(sheet: &Sheet, mut writer: W) -> Result<()> {
        let document = SheetDocument {
            auto_calc: sheet.auto_calc(),
            cells: sheet
                .grid()
                .iter()
                .map(|(address, cell)| CellDocument {
                    address: address.to_string(),
                    flags: cell.flags(),
                    contents: Some(cell.contents().to_string()),
                    value: cell.value(),
                    decimals: i64::from(cell.decimals()),
                    field_width: i64::from(cell.field_width()),
                })
                .collect(),
        };

        serde_json::to_writer_pretty(&mut writer, &document)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a sheet from a file
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Sheet> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a sheet from a reader
    pub fn read<R: Read>(reader: R) -> Result<Sheet> {
        let mut sheet = Sheet::new();
        Self::read_into(reader, &mut sheet)?;
        Ok(sheet)
    }

    /// Replace the contents of `sheet` with a document
    ///
    /// The sheet is only touched once the whole document has parsed. It is
    /// then cleared, and entries whose address does not parse are skipped.
    /// Formats are clamped and contents truncated as they are applied.
    pub fn read_into<R: Read>(reader: R, sheet: &mut Sheet) -> Result<()> {
        let document: SheetDocument = serde_json::from_reader(reader)?;

        sheet.clear();
        sheet.set_auto_calc(document.auto_calc);

        let mut applied = 0usize;
        for entry in document.cells {
            let address = match CellAddress::parse(&entry.address) {
                Ok(address) => address,
                Err(err) => {
                    warn!(address = %entry.address, error = %err, "skipping cell entry");
                    continue;
                }
            };

            let cell = sheet.grid_mut().cell_mut(address);
            cell.set_flags(entry.flags);
            cell.set_contents(entry.contents.unwrap_or_default());
            cell.set_value(entry.value);
            cell.set_format(entry.decimals, entry.field_width);
            applied += 1;
        }

        debug!(applied, auto_calc = document.auto_calc, "loaded sheet document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    #[test]
    fn test_document_shape() {
        let mut sheet = Sheet::new();
        sheet.edit(addr("A1"), "A2+1");

        let mut buffer = Vec::new();
        JsonStorage::write(&sheet, &mut buffer).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(json["auto_calc"], true);
        let cells = json["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 147);
        assert_eq!(cells[0]["address"], "A1");
        assert_eq!(cells[0]["flags"], "CONSTANT | FORMULA | CALCULATED");
        assert_eq!(cells[0]["contents"], "A2+1");
        assert_eq!(cells[0]["value"], 1.0);
        assert_eq!(cells[1]["address"], "B1");
        assert_eq!(cells[146]["address"], "G21");
    }

    #[test]
    fn test_load_skips_bad_addresses_and_clamps() {
        let json = r#"{
            "auto_calc": false,
            "cells": [
                { "address": "Z9", "flags": "CONSTANT", "contents": "1", "value": 1.0 },
                { "address": "b2", "flags": "CONSTANT", "contents": "3", "value": 3.0,
                  "decimals": 99, "field_width": -3 },
                { "address": "C3", "flags": "TEXT" },
                { "address": "D4", "decimals": -9000000000, "field_width": 9000000000 }
            ]
        }"#;

        let sheet = JsonStorage::read(json.as_bytes()).unwrap();
        assert!(!sheet.auto_calc());

        let b2 = sheet.cell(addr("B2"));
        assert_eq!(b2.value(), 3.0);
        assert_eq!((b2.decimals(), b2.field_width()), (11, 1));
        assert_eq!(sheet.cell(addr("C3")).contents(), "");
        assert_eq!(sheet.cell(addr("C3")).decimals(), DEFAULT_DECIMALS);

        let d4 = sheet.cell(addr("D4"));
        assert_eq!((d4.decimals(), d4.field_width()), (-1, 20));
    }

    #[test]
    fn test_failed_load_keeps_sheet() {
        let mut sheet = Sheet::new();
        sheet.edit(addr("A1"), "5");

        assert!(JsonStorage::read_into("{ not json".as_bytes(), &mut sheet).is_err());
        assert_eq!(sheet.cell(addr("A1")).value(), 5.0);
    }

    #[test]
    fn test_load_resets_existing_cells() {
        let mut sheet = Sheet::new();
        sheet.edit(addr("D4"), "hello");

        JsonStorage::read_into(r#"{ "auto_calc": true, "cells": [] }"#.as_bytes(), &mut sheet)
            .unwrap();
        assert_eq!(sheet, Sheet::new());
    }
}
