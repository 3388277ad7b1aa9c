//! Interactive line editor
//!
//! Reads one command per line and prints the grid and status line after
//! each one:
//!
//! ```text
//! A1 Revenue          edit A1 and select it
//! = 2+3*4             edit the selected cell
//! up | down | left | right
//! goto B7
//! recalc
//! format B 1 21 2 14  column, rows, decimals, width
//! auto [on|off]
//! save [PATH]        defaults to the sheet file
//! load [PATH]
//! print [PATH|-] [MARGIN]
//! clear
//! help [PAGE]
//! quit
//! ```

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use microcalc::prelude::*;
use tracing::debug;

use crate::help::HelpDocument;

enum Flow {
    Continue,
    Quit,
}

/// Line-mode session over one sheet file
pub struct Repl {
    sheet: Sheet,
    sheet_path: PathBuf,
    help: HelpDocument,
}

impl Repl {
    pub fn new(sheet: Sheet, sheet_path: &Path, help: HelpDocument) -> Self {
        Self {
            sheet,
            sheet_path: sheet_path.to_path_buf(),
            help,
        }
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    /// Run until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        self.show(&mut output, None)?;

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let message = match self.execute(line, &mut output) {
                Ok((Flow::Quit, _)) => break,
                Ok((Flow::Continue, message)) => message,
                Err(err) => Some(format!("error: {:#}", err)),
            };
            self.show(&mut output, message.as_deref())?;
        }

        output.flush()?;
        Ok(())
    }

    fn show<W: Write>(&self, output: &mut W, message: Option<&str>) -> Result<()> {
        writeln!(output, "{}", self.sheet.render_grid())?;
        writeln!(output, "{}", self.sheet.status_line())?;
        if let Some(message) = message {
            writeln!(output, "{}", message)?;
        }
        Ok(())
    }

    fn execute<W: Write>(&mut self, line: &str, output: &mut W) -> Result<(Flow, Option<String>)> {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim_start()),
            None => (line, ""),
        };

        let message = match command.to_lowercase().as_str() {
            "quit" | "exit" => return Ok((Flow::Quit, None)),
            "up" => self.step(Direction::Up),
            "down" => self.step(Direction::Down),
            "left" => self.step(Direction::Left),
            "right" => self.step(Direction::Right),
            "goto" => {
                let address: CellAddress = rest
                    .parse()
                    .with_context(|| format!("Invalid address '{}'", rest))?;
                self.sheet.set_cursor(address);
                None
            }
            "=" => Some(self.edit(self.sheet.cursor(), rest)),
            "recalc" => Some(recalc_summary(&self.sheet.recalculate())),
            "format" => Some(self.format(rest)?),
            "auto" => {
                match rest.to_lowercase().as_str() {
                    "" => self.sheet.toggle_auto_calc(),
                    "on" => self.sheet.set_auto_calc(true),
                    "off" => self.sheet.set_auto_calc(false),
                    other => bail!("Expected 'on' or 'off', got '{}'", other),
                }
                None
            }
            "save" => {
                let path = self.file_argument(rest);
                JsonStorage::write_file(&self.sheet, &path)
                    .with_context(|| format!("Failed to save '{}'", path.display()))?;
                debug!(path = %path.display(), "saved sheet");
                Some(format!("saved {}", path.display()))
            }
            "load" => {
                let path = self.file_argument(rest);
                self.sheet = JsonStorage::read_file(&path)
                    .with_context(|| format!("Failed to load '{}'", path.display()))?;
                debug!(path = %path.display(), "loaded sheet");
                Some(format!("loaded {}", path.display()))
            }
            "print" => self.print(rest, output)?,
            "clear" => {
                self.sheet.clear();
                Some("sheet cleared".to_string())
            }
            "help" => {
                let page = if rest.is_empty() {
                    1
                } else {
                    rest.parse()
                        .with_context(|| format!("Invalid page '{}'", rest))?
                };
                writeln!(output, "{}", self.help.render_page(page))?;
                None
            }
            _ => match command.parse::<CellAddress>() {
                Ok(address) => {
                    self.sheet.set_cursor(address);
                    Some(self.edit(address, rest))
                }
                Err(_) => bail!("Unknown command '{}'", command),
            },
        };

        Ok((Flow::Continue, message))
    }

    fn file_argument(&self, rest: &str) -> PathBuf {
        if rest.is_empty() {
            self.sheet_path.clone()
        } else {
            PathBuf::from(rest)
        }
    }

    fn print<W: Write>(&self, args: &str, output: &mut W) -> Result<Option<String>> {
        let mut parts = args.split_whitespace();
        let path = parts.next().filter(|path| *path != "-");
        let margin = match parts.next() {
            Some(margin) => margin
                .parse()
                .with_context(|| format!("Invalid margin '{}'", margin))?,
            None => 0,
        };
        if parts.next().is_some() {
            bail!("Usage: print [PATH|-] [MARGIN]");
        }

        let options = ExportOptions::with_margin(margin);
        match path {
            Some(path) => {
                TextExporter::write_file(&self.sheet, path, &options)
                    .with_context(|| format!("Failed to write '{}'", path))?;
                Ok(Some(format!("printed to {}", path)))
            }
            None => {
                TextExporter::write(&self.sheet, &mut *output, &options)?;
                Ok(None)
            }
        }
    }

    fn step(&mut self, direction: Direction) -> Option<String> {
        self.sheet.move_cursor(direction);
        None
    }

    fn edit(&mut self, address: CellAddress, text: &str) -> String {
        edit_summary(&self.sheet.edit(address, text))
    }

    fn format(&mut self, args: &str) -> Result<String> {
        let parts: Vec<&str> = args.split_whitespace().collect();
        let [column, from, to, decimals, width] = parts.as_slice() else {
            bail!("Usage: format <COLUMN> <FROM> <TO> <DECIMALS> <WIDTH>");
        };

        let mut letters = column.chars();
        let (Some(column), None) = (letters.next(), letters.next()) else {
            bail!("Invalid column '{}'", column);
        };

        self.sheet.format_range(
            column,
            from.parse().context("Invalid start row")?,
            to.parse().context("Invalid end row")?,
            decimals.parse().context("Invalid decimals")?,
            width.parse().context("Invalid width")?,
        )?;
        Ok("formatted".to_string())
    }
}

/// One-line description of an edit outcome
pub fn edit_summary(outcome: &EditOutcome) -> String {
    match outcome.error_position {
        Some(position) => format!("{} (Pos {})", outcome.message, position),
        None => outcome.message.clone(),
    }
}

/// One-line description of a recalculation
pub fn recalc_summary(report: &RecalcReport) -> String {
    if report.is_success() {
        format!("recalculated {} cells", report.calculated)
    } else {
        report.errors.join("\n")
    }
}
