//! jobtrack: a local-first job application tracker.
//!
//! The core is a record store over a canonical schema: a versioned snapshot
//! blob on disk, dense 1-based `Index` identity renumbered on every
//! structural change, and an import-reconciliation path that maps arbitrary
//! external spreadsheets onto the canonical columns without silent data
//! loss. The CLI here is one thin presentation adapter over that core;
//! other front ends wire up the same handful of calls.
//!
//! # Architecture
//!
//! - [`core::schema`]: canonical field registry and snapshot upgrade
//! - [`core::store`]: CRUD + atomic whole-table persistence
//! - [`core::import`] / [`core::export`]: tabular reconciliation and export
//! - [`core::attachments`]: resume / cover-letter folders
//! - [`core::report`]: read-only count projections
//! - [`commands`]: clap command groups (the UI layer)
//!
//! All state lives under one store root (`~/JobApplicationTracker` by
//! default) with exactly one writer assumed; see DESIGN.md for the
//! concurrency caveat.
//!
//! # Examples
//!
//! ```bash
//! jobtrack entry add --set "Company Name=Acme" --set "Job Title=Engineer" ...
//! jobtrack entry list --query acme --sort-by "Application Date"
//! jobtrack transfer import --path export.csv --map "Company Name=Employer"
//! jobtrack report counts --field Status
//! ```

pub mod commands;
pub mod core;

use crate::commands::{attach, entry, report, transfer};
use crate::core::error::TrackerError;
use crate::core::schema;
use crate::core::store::{self, RecordStore};

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "jobtrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track job applications from the terminal: add, search, import, export, report."
)]
struct Cli {
    /// Store root directory (default: $JOBTRACK_HOME, else ~/JobApplicationTracker).
    #[clap(long, global = true)]
    dir: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create, inspect, edit, and delete entries
    #[clap(name = "entry", visible_alias = "e")]
    Entry(entry::EntryCli),

    /// Export and import spreadsheet files
    #[clap(name = "transfer", visible_alias = "t")]
    Transfer(transfer::TransferCli),

    /// Manage resume and cover-letter attachments
    #[clap(name = "attach", visible_alias = "a")]
    Attach(attach::AttachCli),

    /// Counts and summaries over the table
    #[clap(name = "report", visible_alias = "r")]
    Report(report::ReportCli),

    /// Print the canonical schema (field order, kinds, required markers)
    #[clap(name = "schema")]
    Schema,
}

pub fn run() -> Result<(), TrackerError> {
    let cli = Cli::parse();
    let root = match cli.dir {
        Some(dir) => dir,
        None => store::default_root()?,
    };
    let store = RecordStore::new(root);

    match cli.command {
        Command::Entry(group) => entry::run(group, &store),
        Command::Transfer(group) => transfer::run(group, &store),
        Command::Attach(group) => attach::run(group, &store),
        Command::Report(group) => report::run(group, &store),
        Command::Schema => {
            print_schema();
            Ok(())
        }
    }
}

fn print_schema() {
    println!("{}  (system, always first, renumbered 1..N)", schema::INDEX_COLUMN.bold());
    for field in schema::canonical_schema() {
        let required = if field.required { " *required" } else { "" };
        let kind = match &field.kind {
            schema::FieldKind::Text => "text".to_string(),
            schema::FieldKind::LongText => "long text".to_string(),
            schema::FieldKind::Date => "date (YYYY-MM-DD or empty)".to_string(),
            schema::FieldKind::Select(choices) => format!("one of: {}", choices.join(", ")),
            schema::FieldKind::FileSelect(kind) => {
                format!("file from {}/", kind.folder())
            }
        };
        println!("{}{}  [{}]", field.name.bold(), required.red(), kind);
    }
}
