//! Resume and cover-letter attachment management.

use crate::commands::{print_json, OutputFormat};
use crate::core::attachments::{ingest, list_files, AttachmentKind};
use crate::core::error::TrackerError;
use crate::core::store::RecordStore;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[clap(about = "Manage uploaded resume and cover-letter files.")]
pub struct AttachCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: AttachCommand,
}

#[derive(Subcommand, Debug)]
enum AttachCommand {
    /// List stored files for one attachment kind.
    List {
        #[clap(long, value_enum)]
        kind: AttachmentKind,
    },
    /// Copy a file into the attachment folder.
    Ingest {
        #[clap(long, value_enum)]
        kind: AttachmentKind,
        #[clap(long)]
        path: PathBuf,
        /// Keep the original filename instead of embedding the ingestion
        /// date before the extension.
        #[clap(long)]
        no_date_suffix: bool,
    },
}

pub fn run(cli: AttachCli, store: &RecordStore) -> Result<(), TrackerError> {
    match cli.command {
        AttachCommand::List { kind } => {
            let files = list_files(store.root(), kind)?;
            match cli.format {
                OutputFormat::Text => {
                    if files.is_empty() {
                        println!("No files.");
                    }
                    for name in &files {
                        println!("{name}");
                    }
                }
                OutputFormat::Json => print_json(&serde_json::json!({
                    "status": "ok",
                    "files": files,
                })),
            }
        }
        AttachCommand::Ingest {
            kind,
            path,
            no_date_suffix,
        } => {
            let stored = ingest(store.root(), &path, kind, !no_date_suffix)?;
            match cli.format {
                OutputFormat::Text => println!("{} stored as {}", "✓".green(), stored),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "status": "ok",
                    "stored": stored,
                })),
            }
        }
    }
    Ok(())
}
