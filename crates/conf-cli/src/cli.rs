//! CLI argument definitions for the conference tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "conference",
    version,
    about = "Manifest conference - verify received loads item by item",
    long_about = "Verify a driver's load against the shipment manifest, item by item.\n\n\
                  Manifests live in a JSON store; starts, confirmations, and finishes\n\
                  run through the conference engine before anything is saved."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the JSON manifest store.
    #[arg(
        long = "store",
        value_name = "PATH",
        global = true,
        default_value = "manifests.json"
    )]
    pub store: PathBuf,

    /// Operator id used for conference actions.
    #[arg(long = "user-id", value_name = "ID", global = true, default_value = "1")]
    pub user_id: String,

    /// Operator display name shown on the conference lock.
    #[arg(
        long = "user-name",
        value_name = "NAME",
        global = true,
        default_value = "Operator"
    )]
    pub user_name: String,

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
    /// List manifests scheduled for a date.
    List(ListArgs),

    /// Show the conference session view of a manifest.
    Show(ShowArgs),

    /// Start a conference, requesting the lock from the system of record.
    Start(ManifestArgs),

    /// Confirm one counted item.
    Confirm(ConfirmArgs),

    /// Locate a pending item from a decoded barcode.
    Scan(ScanArgs),

    /// Search pending items with accent-insensitive terms.
    Search(SearchArgs),

    /// Finish a conference once every item is confirmed.
    Finish(FinishArgs),
}

#[derive(Parser)]
pub struct ListArgs {
    /// Manifest date (YYYY-MM-DD).
    #[arg(value_name = "DATE")]
    pub date: NaiveDate,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Manifest id.
    #[arg(value_name = "MANIFEST")]
    pub manifest: String,
}

#[derive(Parser)]
pub struct ManifestArgs {
    /// Manifest id.
    #[arg(value_name = "MANIFEST")]
    pub manifest: String,
}

#[derive(Parser)]
pub struct ConfirmArgs {
    /// Manifest id.
    #[arg(value_name = "MANIFEST")]
    pub manifest: String,

    /// Item id within the manifest.
    #[arg(value_name = "ITEM")]
    pub item: String,

    /// Counted quantity as typed (comma or dot decimals accepted).
    #[arg(long = "qty", value_name = "QUANTITY")]
    pub quantity: String,

    /// Divergence justification, required when the count falls short.
    #[arg(long = "note", value_name = "TEXT")]
    pub note: Option<String>,
}

#[derive(Parser)]
pub struct ScanArgs {
    /// Manifest id.
    #[arg(value_name = "MANIFEST")]
    pub manifest: String,

    /// Decoded barcode: product code, EAN, or short barcode.
    #[arg(value_name = "CODE")]
    pub code: String,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Manifest id.
    #[arg(value_name = "MANIFEST")]
    pub manifest: String,

    /// Search terms; all must match (order does not matter).
    #[arg(value_name = "QUERY")]
    pub query: String,
}

#[derive(Parser)]
pub struct FinishArgs {
    /// Manifest id.
    #[arg(value_name = "MANIFEST")]
    pub manifest: String,

    /// Optional closing note attached to the completion.
    #[arg(long = "note", value_name = "TEXT")]
    pub note: Option<String>,
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
