//! CLI command groups. Each group owns its clap surface and translates user
//! actions into record-store calls; destructive actions are confirmed here,
//! never inside the store.

pub mod attach;
pub mod entry;
pub mod report;
pub mod transfer;

use crate::core::error::TrackerError;
use clap::ValueEnum;
use std::io::{self, BufRead, Write};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Parse a `FIELD=VALUE` assignment as passed to `--set` / `--map`.
pub(crate) fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got \"{raw}\"")),
    }
}

pub(crate) fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Ask the user to confirm a destructive action. `assume_yes` skips the
/// prompt (scripting path).
pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, TrackerError> {
    if assume_yes {
        return Ok(true);
    }
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
