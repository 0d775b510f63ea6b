//! CLI argument definitions for the mood diary synchronizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use moodsync_core::DEFAULT_MAX_RECORDS;

#[derive(Parser)]
#[command(
    name = "moodsync",
    version,
    about = "Mood diary synchronizer - migrate CSV mood exports into Notion",
    long_about = "Migrate mood diary records from a CSV export into a Notion database.\n\n\
                  Each new record gets a generated short title; records whose timestamp\n\
                  already exists in the database are skipped, so reruns are safe."
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

    /// Allow diary content (notes, titles) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Synchronize a CSV export into the target database.
    Sync(SyncArgs),

    /// Show the target database schema (property names and types).
    Schema,
}

#[derive(Parser)]
pub struct SyncArgs {
    /// Path to the mood diary CSV export.
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: PathBuf,

    /// Maximum rows processed in one run; remaining rows are left for the
    /// next invocation.
    #[arg(long = "max-records", value_name = "N", default_value_t = DEFAULT_MAX_RECORDS)]
    pub max_records: usize,

    /// Read and dedup-check only; write nothing and generate no titles.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Title generation model override.
    #[arg(long = "model", value_name = "MODEL")]
    pub model: Option<String>,
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
