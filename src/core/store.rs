//! Record store: sole owner of the persisted application table.
//!
//! Every mutation is wholly in-memory followed by a full synchronous persist
//! of the snapshot blob. On any failure the in-memory table is restored to
//! its last-good state and nothing is written. There is no file locking; the
//! store assumes a single running instance, and two instances racing on
//! `save` will lose writes (inherited hazard, documented in DESIGN.md).

use crate::core::error::TrackerError;
use crate::core::schema::{self, Snapshot};
use crate::core::table::{Record, Table};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Snapshot file name under the store root.
pub const DATA_FILE: &str = "job_applications.json";

/// Environment override for the store root.
pub const ROOT_ENV: &str = "JOBTRACK_HOME";

/// Default store root: `$JOBTRACK_HOME`, else `~/JobApplicationTracker`.
pub fn default_root() -> Result<PathBuf, TrackerError> {
    if let Ok(dir) = env::var(ROOT_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    dirs::home_dir()
        .map(|home| home.join("JobApplicationTracker"))
        .ok_or_else(|| TrackerError::Path("could not determine a home directory".to_string()))
}

/// Handle on one store root directory.
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        RecordStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_path(&self) -> PathBuf {
        self.root.join(DATA_FILE)
    }

    /// Load the persisted table, upgraded to the canonical schema. A missing
    /// file yields an empty table; unparseable bytes are `CorruptStore`, and
    /// whether to abort or reinitialize is the caller's policy.
    pub fn load(&self) -> Result<Table, TrackerError> {
        let bytes = match fs::read_to_string(self.data_path()) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Table::new()),
            Err(e) => return Err(TrackerError::Io(e)),
        };
        let snapshot: Snapshot = serde_json::from_str(&bytes)
            .map_err(|e| TrackerError::CorruptStore(e.to_string()))?;
        if snapshot.snapshot_version > schema::SNAPSHOT_VERSION {
            return Err(TrackerError::CorruptStore(format!(
                "snapshot version {} is newer than this build supports ({})",
                snapshot.snapshot_version,
                schema::SNAPSHOT_VERSION
            )));
        }
        Ok(schema::upgrade(snapshot))
    }

    /// Persist the full table, replacing any prior snapshot. Writes to a
    /// temp file in the same directory and renames over the target so a
    /// crash mid-write never leaves a torn snapshot.
    pub fn save(&self, table: &Table) -> Result<(), TrackerError> {
        fs::create_dir_all(&self.root)?;
        let blob = serde_json::to_string_pretty(&Snapshot::of(table))
            .map_err(|e| TrackerError::CorruptStore(e.to_string()))?;
        let target = self.data_path();
        let tmp = self.root.join(format!("{DATA_FILE}.tmp"));
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }

    /// Append a record built from `values` and persist. Returns the new
    /// index. Rejects unknown field names and empty required fields before
    /// touching the table.
    pub fn add(
        &self,
        table: &mut Table,
        values: &BTreeMap<String, String>,
    ) -> Result<usize, TrackerError> {
        check_known_fields(values)?;
        let record = build_record(table.len() + 1, values);
        check_required(&record)?;

        table.records.push(record);
        if let Err(e) = self.save(table) {
            table.records.pop();
            return Err(e);
        }
        Ok(table.len())
    }

    /// Replace the named field values of the record at `index` and persist.
    /// The record's index is unchanged; an edit may not blank a required
    /// field.
    pub fn update(
        &self,
        table: &mut Table,
        index: usize,
        values: &BTreeMap<String, String>,
    ) -> Result<(), TrackerError> {
        check_known_fields(values)?;
        let pos = table
            .position(index)
            .ok_or(TrackerError::NotFound { index })?;

        let mut merged = table.records[pos].clone();
        for (name, value) in values {
            merged.values.insert(name.clone(), value.clone());
        }
        check_required(&merged)?;

        let previous = std::mem::replace(&mut table.records[pos], merged);
        if let Err(e) = self.save(table) {
            table.records[pos] = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Remove the record at `index`, renumber densely, persist.
    pub fn delete(&self, table: &mut Table, index: usize) -> Result<(), TrackerError> {
        let pos = table
            .position(index)
            .ok_or(TrackerError::NotFound { index })?;

        let previous = table.records.clone();
        table.records.remove(pos);
        table.reindex();
        if let Err(e) = self.save(table) {
            table.records = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Empty the table (schema retained) and persist.
    pub fn delete_all(&self, table: &mut Table) -> Result<(), TrackerError> {
        let previous = std::mem::take(&mut table.records);
        if let Err(e) = self.save(table) {
            table.records = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Replace the whole table with `replacement` and persist. The import
    /// path; destructive, so callers confirm before invoking.
    pub fn replace(&self, table: &mut Table, replacement: Table) -> Result<(), TrackerError> {
        let previous = std::mem::replace(table, replacement);
        if let Err(e) = self.save(table) {
            *table = previous;
            return Err(e);
        }
        Ok(())
    }
}

fn check_known_fields(values: &BTreeMap<String, String>) -> Result<(), TrackerError> {
    for name in values.keys() {
        if schema::field(name).is_none() {
            return Err(TrackerError::UnknownField(name.clone()));
        }
    }
    Ok(())
}

/// Full record from partial input: every canonical field present, missing
/// ones empty.
fn build_record(index: usize, values: &BTreeMap<String, String>) -> Record {
    let values = schema::canonical_schema()
        .iter()
        .map(|f| {
            let value = values.get(f.name).cloned().unwrap_or_default();
            (f.name.to_string(), value)
        })
        .collect();
    Record { index, values }
}

fn check_required(record: &Record) -> Result<(), TrackerError> {
    let missing: Vec<String> = schema::required_fields()
        .into_iter()
        .filter(|name| record.value(name).trim().is_empty())
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(TrackerError::MissingFields(missing))
    }
}
