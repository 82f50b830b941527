//! CLI argument definitions for savcheck.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "savcheck",
    version,
    about = "Check SPSS survey exports for duplicated interview IDs",
    long_about = "Load an SPSS .sav export, normalize it, resolve categorical codes\n\
                  to labels, and report every record whose interview ID is shared\n\
                  with another non-cancelled record."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Run the duplicate-ID check over a .sav file.
    Check(CheckArgs),

    /// Print the variable dictionary of a .sav file.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the .sav file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Text columns to upper-case, comma separated.
    #[arg(long = "upper", value_name = "COLS", default_value = "")]
    pub upper_columns: String,

    /// Columns to coerce to integer, comma separated.
    #[arg(long = "int", value_name = "COLS", default_value = "SBJNUM,ID")]
    pub int_columns: String,

    /// Categorical columns to replace with dictionary labels, comma separated.
    #[arg(long = "labels", value_name = "COLS", default_value = "")]
    pub label_columns: String,

    /// Columns the detector requires, comma separated.
    #[arg(long = "subset", value_name = "COLS", default_value = "SBJNUM,ID,STATUS")]
    pub required_subset: String,

    /// Column holding the record status.
    #[arg(long = "status-column", value_name = "NAME", default_value = "STATUS")]
    pub status_column: String,

    /// Status value that excludes a record from the check.
    #[arg(long = "cancelled", value_name = "VALUE", default_value = "Cancelada")]
    pub cancelled_status: String,

    /// Identifier column compared for duplicates.
    #[arg(long = "id-column", value_name = "NAME", default_value = "ID")]
    pub id_column: String,

    /// Subject-number column used as the report index.
    #[arg(long = "subject-column", value_name = "NAME", default_value = "SBJNUM")]
    pub subject_column: String,

    /// Write the duplicate report to a CSV file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the report and diagnostics as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,

    /// Drop missing required columns without prompting.
    ///
    /// Without this flag a missing required column blocks on an interactive
    /// prompt; there is no timeout and no default answer.
    #[arg(long = "proceed-on-missing")]
    pub proceed_on_missing: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Path to the .sav file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
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
