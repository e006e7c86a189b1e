//! CLI argument definitions for the AGS4 explorer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ags_ingest::{LoadOptions, MAX_FILE_SIZE};
use ags_session::{DEFAULT_GRID_ROWS, GridOptions, LoadFailurePolicy, SessionConfig};

#[derive(Parser)]
#[command(
    name = "ags-explorer",
    version,
    about = "AGS4 File Explorer - browse and export the tables of an AGS4 file",
    long_about = "Browse the groups of an AGS4 geotechnical data file as tables.\n\n\
                  Each GROUP becomes a table whose columns are HEADING followed by\n\
                  the group headings. The active table can be exported as CSV."
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
    /// List the tables of an AGS4 file.
    Tables(TablesArgs),

    /// Print a table of an AGS4 file.
    Show(ShowArgs),

    /// Export a table of an AGS4 file as CSV.
    Export(ExportArgs),

    /// Browse AGS4 files interactively.
    Explore(ExploreArgs),
}

/// Options shared by every command that reads a file.
#[derive(Args, Clone)]
pub struct LoadArgs {
    /// Largest accepted file, in bytes.
    #[arg(long = "max-file-size", value_name = "BYTES", default_value_t = MAX_FILE_SIZE)]
    pub max_file_size: u64,

    /// Accept files without the `.ags` extension.
    #[arg(long = "any-extension")]
    pub any_extension: bool,
}

impl LoadArgs {
    pub fn options(&self) -> LoadOptions {
        LoadOptions {
            max_file_size: self.max_file_size,
            require_ags_extension: !self.any_extension,
        }
    }
}

#[derive(Parser)]
pub struct TablesArgs {
    /// AGS4 file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub load: LoadArgs,

    /// Print the table list as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// AGS4 file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub load: LoadArgs,

    /// Table to show (default: the first table in the file).
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// Maximum number of rows to print.
    #[arg(long = "max-rows", value_name = "N", default_value_t = DEFAULT_GRID_ROWS)]
    pub max_rows: usize,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// AGS4 file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub load: LoadArgs,

    /// Table to export (default: the first table in the file).
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// Destination file, `-` for stdout (default: `<TABLE>.csv`).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ExploreArgs {
    /// AGS4 file to open on start.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub load: LoadArgs,

    /// What a failed load does to the tables already shown.
    #[arg(long = "on-load-failure", value_enum, default_value = "clear")]
    pub on_load_failure: LoadFailureArg,

    /// Maximum number of rows printed by `show`.
    #[arg(long = "max-rows", value_name = "N", default_value_t = DEFAULT_GRID_ROWS)]
    pub max_rows: usize,
}

impl ExploreArgs {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            load_failure_policy: match self.on_load_failure {
                LoadFailureArg::Clear => LoadFailurePolicy::Clear,
                LoadFailureArg::KeepPrevious => LoadFailurePolicy::KeepPrevious,
            },
            grid: GridOptions {
                max_rows: self.max_rows,
            },
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LoadFailureArg {
    Clear,
    KeepPrevious,
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
