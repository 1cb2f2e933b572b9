//! Export to delimited files and import with column reconciliation.

use crate::commands::{confirm, parse_assignment, print_json, OutputFormat};
use crate::core::error::TrackerError;
use crate::core::export::{export_table, ExportFormat};
use crate::core::import::{propose_mapping, read_tabular, reconcile, ColumnMapping};
use crate::core::schema;
use crate::core::store::RecordStore;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[clap(about = "Move entries between the store and spreadsheet files.")]
pub struct TransferCli {
    /// Output format for this command group.
    #[clap(long, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: TransferCommand,
}

#[derive(Subcommand, Debug)]
enum TransferCommand {
    /// Write the full table, Index first, in canonical column order.
    Export {
        #[clap(long)]
        path: PathBuf,
        #[clap(long, value_enum, default_value = "csv")]
        format: ExportFormat,
    },
    /// Replace all entries with the contents of a tabular file.
    Import {
        #[clap(long)]
        path: PathBuf,
        /// Mapping override, repeatable: --map "Company Name=Employer".
        /// Columns with canonical names map automatically.
        #[clap(long = "map", value_parser = parse_assignment, value_name = "FIELD=COLUMN")]
        map: Vec<(String, String)>,
        /// Show the effective mapping and row count without importing.
        #[clap(long)]
        dry_run: bool,
        /// Skip the confirmation prompt.
        #[clap(long)]
        yes: bool,
    },
}

pub fn run(cli: TransferCli, store: &RecordStore) -> Result<(), TrackerError> {
    match cli.command {
        TransferCommand::Export { path, format } => {
            let table = store.load()?;
            export_table(&table, &path, format)?;
            match cli.format {
                OutputFormat::Text => println!(
                    "{} {} entries exported to {}",
                    "✓".green(),
                    table.len(),
                    path.display()
                ),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "status": "ok",
                    "exported": table.len(),
                    "path": path.display().to_string(),
                })),
            }
        }
        TransferCommand::Import {
            path,
            map,
            dry_run,
            yes,
        } => {
            let external = read_tabular(&path)?;
            let mut mapping = propose_mapping(&external.headers);
            for (canonical, column) in map {
                mapping.set(canonical, column);
            }
            mapping.validate(&external.headers)?;

            if dry_run {
                match cli.format {
                    OutputFormat::Text => print_mapping_preview(&mapping, external.rows.len()),
                    OutputFormat::Json => {
                        let mapped: serde_json::Map<String, serde_json::Value> = schema::field_names()
                            .iter()
                            .map(|name| {
                                let column = mapping
                                    .external_for(name)
                                    .map(|c| serde_json::Value::String(c.to_string()))
                                    .unwrap_or(serde_json::Value::Null);
                                (name.to_string(), column)
                            })
                            .collect();
                        print_json(&serde_json::json!({
                            "status": "ok",
                            "dry_run": true,
                            "rows": external.rows.len(),
                            "mapping": mapped,
                        }));
                    }
                }
                return Ok(());
            }

            let mut table = store.load()?;
            let prompt = format!(
                "Importing {} rows will replace all {} current entries. Continue?",
                external.rows.len(),
                table.len()
            );
            if !confirm(&prompt, yes)? {
                println!("Aborted.");
                return Ok(());
            }

            let replacement = reconcile(&external, &mapping);
            let imported = replacement.len();
            store.replace(&mut table, replacement)?;
            match cli.format {
                OutputFormat::Text => println!(
                    "{} {} entries imported; previous entries replaced",
                    "✓".green(),
                    imported
                ),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "status": "ok",
                    "imported": imported,
                })),
            }
        }
    }
    Ok(())
}

fn print_mapping_preview(mapping: &ColumnMapping, rows: usize) {
    println!("{}", "Proposed mapping:".bold());
    for name in schema::field_names() {
        match mapping.external_for(name) {
            Some(column) => println!("  {name} <- {column}"),
            None => println!("  {name} <- {}", "(unmapped, will be empty)".dimmed()),
        }
    }
    println!("{rows} rows would be imported.");
}
