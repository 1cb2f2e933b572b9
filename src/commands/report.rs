//! Tabulated reporting over the stored entries.

use crate::commands::{print_json, OutputFormat};
use crate::core::error::TrackerError;
use crate::core::report::{summary, value_counts};
use crate::core::store::RecordStore;
use clap::{Args, Subcommand};
use colored::Colorize;

#[derive(Args, Debug)]
#[clap(about = "Read-only counts over the application table.")]
pub struct ReportCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: ReportCommand,
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Total applications plus per-status counts.
    Summary,
    /// Count of entries per distinct value of one field.
    Counts {
        #[clap(long)]
        field: String,
    },
}

pub fn run(cli: ReportCli, store: &RecordStore) -> Result<(), TrackerError> {
    let table = store.load()?;
    match cli.command {
        ReportCommand::Summary => {
            let s = summary(&table);
            match cli.format {
                OutputFormat::Text => {
                    println!("{} {}", "Total applications:".bold(), s.total);
                    for (status, count) in &s.by_status {
                        println!("  {status}: {count}");
                    }
                }
                OutputFormat::Json => {
                    let by_status: serde_json::Map<String, serde_json::Value> = s
                        .by_status
                        .iter()
                        .map(|(status, count)| (status.clone(), (*count).into()))
                        .collect();
                    print_json(&serde_json::json!({
                        "status": "ok",
                        "total": s.total,
                        "by_status": by_status,
                    }));
                }
            }
        }
        ReportCommand::Counts { field } => {
            let counts = value_counts(&table, &field)?;
            match cli.format {
                OutputFormat::Text => {
                    println!("{}", format!("Applications by {field}:").bold());
                    for (value, count) in &counts {
                        let label = if value.is_empty() { "(empty)" } else { value };
                        println!("  {label}: {count}");
                    }
                }
                OutputFormat::Json => {
                    let buckets: Vec<serde_json::Value> = counts
                        .iter()
                        .map(|(value, count)| {
                            serde_json::json!({ "value": value, "count": count })
                        })
                        .collect();
                    print_json(&serde_json::json!({
                        "status": "ok",
                        "field": field,
                        "counts": buckets,
                    }));
                }
            }
        }
    }
    Ok(())
}
