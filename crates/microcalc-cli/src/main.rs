//! MicroCalc CLI - a small spreadsheet on the command line

mod help;
mod repl;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use microcalc::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::help::HelpDocument;
use crate::repl::{edit_summary, recalc_summary, Repl};

#[derive(Parser)]
#[command(name = "microcalc")]
#[command(
    author,
    version,
    about = "Seven-column spreadsheet with formulas, formatting and text export",
    disable_help_subcommand = true
)]
struct Cli {
    /// Sheet file to work on
    #[arg(long, global = true, env = "MICROCALC_SHEET", default_value = "sheet.mcalc.json")]
    sheet: PathBuf,

    /// Help text file
    #[arg(long, global = true, env = "MICROCALC_HELP", default_value = "CALC.HLP")]
    help_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression against the sheet without storing it
    Eval {
        /// Expression, e.g. "(A1>A4)*2"
        expression: String,
    },

    /// Store text, a number or a formula in a cell
    Set {
        /// Cell address (A1..G21)
        address: CellAddress,

        /// Cell input
        text: String,
    },

    /// Recalculate every expression cell
    Recalc,

    /// Set number format and width for part of a column
    Format {
        /// Column letter (A..G)
        column: char,

        /// First row
        #[arg(allow_negative_numbers = true)]
        from: i64,

        /// Last row
        #[arg(allow_negative_numbers = true)]
        to: i64,

        /// Decimal places; -1 for scientific notation
        #[arg(short, long, default_value = "2", allow_negative_numbers = true)]
        decimals: i64,

        /// Field width; wider than 10 locks the column to the right
        #[arg(short, long, default_value = "10", allow_negative_numbers = true)]
        width: i64,
    },

    /// Display the grid and status line
    Show,

    /// Export the sheet as plain text
    Print {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Left margin in spaces
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        margin: i64,
    },

    /// Switch automatic recalculation
    Auto {
        #[arg(value_enum, default_value = "toggle")]
        mode: AutoMode,
    },

    /// Empty every cell and restore default formats
    Clear,

    /// Show a page of the help file
    Help {
        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Edit the sheet interactively, one command per line
    Repl,
}

#[derive(Clone, Copy, ValueEnum)]
enum AutoMode {
    On,
    Off,
    Toggle,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "microcalc=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let path = cli.sheet.as_path();

    match cli.command {
        Commands::Eval { expression } => eval(path, &expression),
        Commands::Set { address, text } => set(path, address, &text),
        Commands::Recalc => recalc(path),
        Commands::Format {
            column,
            from,
            to,
            decimals,
            width,
        } => format(path, column, from, to, decimals, width),
        Commands::Show => show(path),
        Commands::Print { output, margin } => print(path, output.as_deref(), margin),
        Commands::Auto { mode } => auto(path, mode),
        Commands::Clear => save_sheet(&Sheet::new(), path),
        Commands::Help { page } => {
            let help = load_help(&cli.help_file)?;
            println!("{}", help.render_page(page));
            Ok(())
        }
        Commands::Repl => {
            let sheet = load_sheet(path)?;
            let help = load_help(&cli.help_file)?;
            let mut repl = Repl::new(sheet, path, help);
            let stdin = io::stdin();
            repl.run(stdin.lock(), io::stdout().lock())
        }
    }
}

/// Load the sheet file, starting empty when it does not exist yet
fn load_sheet(path: &Path) -> Result<Sheet> {
    if !path.exists() {
        debug!(path = %path.display(), "no sheet file, starting empty");
        return Ok(Sheet::new());
    }
    let sheet = JsonStorage::read_file(path)
        .with_context(|| format!("Failed to load '{}'", path.display()))?;
    debug!(path = %path.display(), "loaded sheet");
    Ok(sheet)
}

fn save_sheet(sheet: &Sheet, path: &Path) -> Result<()> {
    JsonStorage::write_file(sheet, path)
        .with_context(|| format!("Failed to save '{}'", path.display()))?;
    debug!(path = %path.display(), "saved sheet");
    Ok(())
}

fn load_help(path: &Path) -> Result<HelpDocument> {
    HelpDocument::load(path).with_context(|| format!("Failed to read '{}'", path.display()))
}

fn eval(path: &Path, expression: &str) -> Result<()> {
    let mut sheet = load_sheet(path)?;
    match sheet.evaluate(expression) {
        Ok(result) => {
            println!("{}", result.value);
            Ok(())
        }
        Err(err) => bail!("{} (Pos {})", err, err.position()),
    }
}

fn set(path: &Path, address: CellAddress, text: &str) -> Result<()> {
    let mut sheet = load_sheet(path)?;
    let outcome = sheet.edit(address, text);
    let summary = edit_summary(&outcome);

    // a failed sweep still stored the edit
    if outcome.success || outcome.error_position.is_none() {
        save_sheet(&sheet, path)?;
    }
    if !outcome.success {
        bail!("{}: {}", address, summary);
    }

    println!("{}: {}", address, summary);
    Ok(())
}

fn recalc(path: &Path) -> Result<()> {
    let mut sheet = load_sheet(path)?;
    let report = sheet.recalculate();
    save_sheet(&sheet, path)?;

    if !report.is_success() {
        bail!("{}", recalc_summary(&report));
    }
    println!("{}", recalc_summary(&report));
    Ok(())
}

fn format(
    path: &Path,
    column: char,
    from: i64,
    to: i64,
    decimals: i64,
    width: i64,
) -> Result<()> {
    let mut sheet = load_sheet(path)?;
    sheet
        .format_range(column, from, to, decimals, width)
        .with_context(|| format!("Failed to format column '{}'", column))?;
    save_sheet(&sheet, path)
}

fn show(path: &Path) -> Result<()> {
    let sheet = load_sheet(path)?;
    println!("{}", sheet.render_grid());
    println!("{}", sheet.status_line());
    Ok(())
}

fn print(path: &Path, output: Option<&Path>, margin: i64) -> Result<()> {
    let sheet = load_sheet(path)?;
    let options = ExportOptions::with_margin(margin);

    match output {
        Some(output) => {
            TextExporter::write_file(&sheet, output, &options)
                .with_context(|| format!("Failed to write '{}'", output.display()))?;
            eprintln!("Wrote '{}'", output.display());
        }
        None => {
            let stdout = io::stdout();
            TextExporter::write(&sheet, stdout.lock(), &options)
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

fn auto(path: &Path, mode: AutoMode) -> Result<()> {
    let mut sheet = load_sheet(path)?;
    match mode {
        AutoMode::On => sheet.set_auto_calc(true),
        AutoMode::Off => sheet.set_auto_calc(false),
        AutoMode::Toggle => sheet.toggle_auto_calc(),
    }
    save_sheet(&sheet, path)?;

    let mut stdout = io::stdout();
    writeln!(stdout, "AutoCalc: {}", if sheet.auto_calc() { "ON" } else { "OFF" })?;
    Ok(())
}
