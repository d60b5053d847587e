//! CLI argument definitions for the data quality pipeline.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dq",
    version,
    about = "Data quality pipeline - score, clean, and load tabular files",
    long_about = "Score tabular files for data quality, route them by score,\n\
                  repair the ones worth cleaning, and load the result.\n\n\
                  Supports CSV and JSON (array-of-objects) inputs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score a table and show its issues without touching it.
    Check(CheckArgs),

    /// Run the full pipeline: score, clean if worthwhile, and load.
    Run(RunArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the table file (CSV or JSON).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub quality: QualityArgs,

    /// Emit the report as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Table files or directories of table files to process.
    #[arg(value_name = "PATH", num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Directory for destination CSV files (default: ./output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Score and clean but skip the destination load.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Emit run summaries as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,

    #[command(flatten)]
    pub quality: QualityArgs,
}

/// Quality engine tuning shared by both commands.
#[derive(Args)]
pub struct QualityArgs {
    /// Identifier column used as the default duplicate key.
    #[arg(long = "id-column", value_name = "COLUMN")]
    pub id_column: Option<String>,

    /// Explicit duplicate-key columns (comma separated); overrides --id-column.
    #[arg(long = "key-columns", value_name = "COLUMNS", value_delimiter = ',')]
    pub key_columns: Option<Vec<String>>,

    /// Spread multiple defining the acceptable numeric range.
    #[arg(long = "outlier-multiple", value_name = "MULTIPLE")]
    pub outlier_multiple: Option<f64>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
