//! Entry CRUD, search, and sort.

use crate::commands::{confirm, parse_assignment, print_json, OutputFormat};
use crate::core::error::TrackerError;
use crate::core::output;
use crate::core::schema;
use crate::core::store::RecordStore;
use crate::core::table::{sort_records, Record};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::collections::BTreeMap;

#[derive(Args, Debug)]
#[clap(about = "Create, inspect, edit, and delete application entries.")]
pub struct EntryCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: EntryCommand,
}

#[derive(Subcommand, Debug)]
enum EntryCommand {
    /// Add a new entry.
    Add {
        /// Field assignment, repeatable: --set "Company Name=Acme"
        #[clap(long = "set", value_parser = parse_assignment, value_name = "FIELD=VALUE")]
        set: Vec<(String, String)>,
    },
    /// List entries, optionally filtered and sorted.
    List {
        /// Case-insensitive substring filter over all field values.
        #[clap(long)]
        query: Option<String>,
        /// Field to sort by (numeric-aware; "Index" sorts by identity).
        #[clap(long)]
        sort_by: Option<String>,
        #[clap(long)]
        descending: bool,
    },
    /// Show one entry in full.
    Get {
        #[clap(long)]
        index: usize,
    },
    /// Edit field values of an existing entry.
    Edit {
        #[clap(long)]
        index: usize,
        #[clap(long = "set", value_parser = parse_assignment, value_name = "FIELD=VALUE")]
        set: Vec<(String, String)>,
    },
    /// Delete one entry; remaining entries are renumbered.
    Delete {
        #[clap(long)]
        index: usize,
        /// Skip the confirmation prompt.
        #[clap(long)]
        yes: bool,
    },
    /// Delete every entry.
    DeleteAll {
        #[clap(long)]
        yes: bool,
    },
}

pub fn run(cli: EntryCli, store: &RecordStore) -> Result<(), TrackerError> {
    let mut table = store.load()?;
    match cli.command {
        EntryCommand::Add { set } => {
            let values: BTreeMap<String, String> = set.into_iter().collect();
            let index = store.add(&mut table, &values)?;
            match cli.format {
                OutputFormat::Text => {
                    println!("{} entry {} added", "✓".green(), index);
                }
                OutputFormat::Json => print_json(&serde_json::json!({
                    "status": "ok",
                    "index": index,
                })),
            }
        }
        EntryCommand::List {
            query,
            sort_by,
            descending,
        } => {
            let mut records: Vec<Record> = table
                .search(query.as_deref().unwrap_or(""))
                .cloned()
                .collect();
            if let Some(field) = sort_by {
                if field != schema::INDEX_COLUMN && schema::field(&field).is_none() {
                    return Err(TrackerError::UnknownField(field));
                }
                sort_records(&mut records, &field, descending);
            }
            match cli.format {
                OutputFormat::Text => print_listing(&records),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "status": "ok",
                    "count": records.len(),
                    "records": records,
                })),
            }
        }
        EntryCommand::Get { index } => {
            let record = table
                .get(index)
                .ok_or(TrackerError::NotFound { index })?;
            match cli.format {
                OutputFormat::Text => print_full(record),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "status": "ok",
                    "record": record,
                })),
            }
        }
        EntryCommand::Edit { index, set } => {
            let values: BTreeMap<String, String> = set.into_iter().collect();
            store.update(&mut table, index, &values)?;
            match cli.format {
                OutputFormat::Text => println!("{} entry {} updated", "✓".green(), index),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "status": "ok",
                    "index": index,
                })),
            }
        }
        EntryCommand::Delete { index, yes } => {
            if !confirm(&format!("Delete entry {index}?"), yes)? {
                println!("Aborted.");
                return Ok(());
            }
            store.delete(&mut table, index)?;
            match cli.format {
                OutputFormat::Text => println!(
                    "{} entry {} deleted, {} remaining",
                    "✓".green(),
                    index,
                    table.len()
                ),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "status": "ok",
                    "deleted": index,
                    "remaining": table.len(),
                })),
            }
        }
        EntryCommand::DeleteAll { yes } => {
            let count = table.len();
            if !confirm(
                &format!("Delete all {count} entries? This cannot be undone."),
                yes,
            )? {
                println!("Aborted.");
                return Ok(());
            }
            store.delete_all(&mut table)?;
            match cli.format {
                OutputFormat::Text => println!("{} {} entries deleted", "✓".green(), count),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "status": "ok",
                    "deleted": count,
                })),
            }
        }
    }
    Ok(())
}

const LISTING_COLUMNS: &[(&str, usize)] = &[
    ("Company Name", 20),
    ("Job Title", 20),
    ("Status", 20),
    ("Application Date", 16),
    ("Priority", 8),
];

fn print_listing(records: &[Record]) {
    if records.is_empty() {
        println!("No entries.");
        return;
    }
    let mut header = format!("{:>5}  ", schema::INDEX_COLUMN);
    for (name, width) in LISTING_COLUMNS {
        header.push_str(&output::cell(name, *width));
        header.push_str("  ");
    }
    println!("{}", header.bold());
    for record in records {
        let mut line = format!("{:>5}  ", record.index);
        for (name, width) in LISTING_COLUMNS {
            line.push_str(&output::cell(record.value(name), *width));
            line.push_str("  ");
        }
        println!("{}", line.trim_end());
    }
    println!("{} entries", records.len());
}

fn print_full(record: &Record) {
    println!("{}: {}", schema::INDEX_COLUMN.bold(), record.index);
    for field in schema::canonical_schema() {
        let marker = if field.required { "*" } else { "" };
        println!("{}{}: {}", field.name.bold(), marker, record.value(field.name));
    }
}
