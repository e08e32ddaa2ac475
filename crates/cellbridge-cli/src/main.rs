//! Cellbridge CLI - spreadsheet cell inspection and export tool

use anyhow::{Context, Result};
use cellbridge::prelude::*;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cellbridge")]
#[command(author, version, about = "Read spreadsheet cells as text and export records")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all sheets in a workbook
    Sheets {
        /// Input xlsx file
        input: PathBuf,
    },

    /// Print the rows of a single-sheet workbook as column=value pairs
    Rows {
        /// Input xlsx file
        input: PathBuf,
    },

    /// Dump every cell of every sheet
    Cells {
        /// Input xlsx file
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a small sample record set
    Demo {
        /// Output xlsx file
        output: PathBuf,

        /// Sheet name (default: the record type name)
        #[arg(long)]
        sheet_name: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Sheets { input } => list_sheets(&input),
        Commands::Rows { input } => print_rows(&input),
        Commands::Cells {
            input,
            format,
            output,
        } => dump_cells(&input, format, output.as_deref()),
        Commands::Demo { output, sheet_name } => write_demo(&output, sheet_name),
    }
}

/// Log level used when `RUST_LOG` is unset
fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open(input: &Path) -> Result<Document> {
    Document::open(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn list_sheets(input: &Path) -> Result<()> {
    let document = open(input)?;
    log::debug!("{} lists {} sheet(s)", input.display(), document.sheet_count());

    for (i, sheet) in document.sheets().unwrap_or(&[]).iter().enumerate() {
        println!("{}\t{}", i, sheet.name);
    }

    Ok(())
}

fn print_rows(input: &Path) -> Result<()> {
    let document = open(input)?;
    let rows = SheetReader::read_single_sheet(&document)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut count = 0;
    for (i, row) in rows.enumerate() {
        count += 1;
        let mut line = Vec::new();
        for cell in row {
            let cell = cell.with_context(|| format!("Failed to decode row {}", i + 1))?;
            line.push(format!("{}={}", cell.column, cell.value));
        }
        writeln!(out, "{}", line.join("\t")).context("Failed to write to stdout")?;
    }
    log::debug!("printed {} row(s) from {}", count, input.display());

    Ok(())
}

fn dump_cells(input: &Path, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let document = open(input)?;
    let records = SheetReader::read_all_sheets(&document)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    log::debug!("decoded {} cell(s) from {}", records.len(), input.display());

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create '{}'", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(writer);
            for record in &records {
                wtr.serialize(record).context("Failed to write CSV")?;
            }
            wtr.flush().context("Failed to write CSV")?;
        }
        OutputFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, &records).context("Failed to write JSON")?;
            writeln!(writer).context("Failed to write JSON")?;
        }
    }

    if let Some(path) = output {
        eprintln!("Wrote {} cells to '{}'", records.len(), path.display());
    }

    Ok(())
}

struct Sample {
    name: &'static str,
    age: i32,
    joined: NaiveDate,
    active: bool,
}

impl Record for Sample {
    fn schema() -> Schema<Self> {
        Schema::new("Sample")
            .field("Name", |s: &Sample| s.name)
            .field("Age", |s: &Sample| s.age)
            .field("Joined", |s: &Sample| s.joined)
            .field("Active", |s: &Sample| s.active)
    }
}

fn sample_date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("Invalid sample date {}-{}-{}", year, month, day))
}

fn write_demo(output: &Path, sheet_name: Option<String>) -> Result<()> {
    let samples = [
        Sample {
            name: "Alice",
            age: 30,
            joined: sample_date(2021, 5, 1)?,
            active: true,
        },
        Sample {
            name: "Bob",
            age: 41,
            joined: sample_date(2019, 11, 15)?,
            active: false,
        },
    ];

    log::debug!("writing {} sample record(s)", samples.len());
    let options = WriteOptions {
        sheet_name,
        ..Default::default()
    };
    cellbridge::write_records_with(&samples, output, options)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    eprintln!("Wrote {} records to '{}'", samples.len(), output.display());

    Ok(())
}
