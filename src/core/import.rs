//! Import reconciliation: mapping an externally authored tabular file onto
//! the canonical schema.
//!
//! External files bring their own column names and order. Reconciliation is
//! a per-canonical-field mapping to at most one external column; unmapped
//! fields land as empty strings (partial imports are refined later by
//! editing, not rejected). The committed result replaces the whole table,
//! so the calling layer confirms with the user first.

use crate::core::error::TrackerError;
use crate::core::schema;
use crate::core::table::{Record, Table};
use std::collections::BTreeMap;
use std::path::Path;

/// Header row plus string rows, as read from disk.
#[derive(Debug)]
pub struct ExternalTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Canonical field name → external column name. Fields absent from the map
/// are unmapped and populate as empty.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    entries: BTreeMap<String, String>,
}

impl ColumnMapping {
    pub fn set(&mut self, canonical: impl Into<String>, external: impl Into<String>) {
        self.entries.insert(canonical.into(), external.into());
    }

    pub fn external_for(&self, canonical: &str) -> Option<&str> {
        self.entries.get(canonical).map(String::as_str)
    }

    /// Every canonical name must be a schema field (`Index` is system-owned
    /// and always regenerated, so it is not mappable), and every external
    /// name must appear in the file's header row.
    pub fn validate(&self, headers: &[String]) -> Result<(), TrackerError> {
        for (canonical, external) in &self.entries {
            if schema::field(canonical).is_none() {
                return Err(TrackerError::UnknownField(canonical.clone()));
            }
            if !headers.iter().any(|h| h == external) {
                return Err(TrackerError::ImportParse(format!(
                    "column \"{external}\" (mapped to \"{canonical}\") is not in the file header"
                )));
            }
        }
        Ok(())
    }
}

/// Read a delimited file: `.tsv`/`.tab` are tab-separated, everything else
/// comma-separated. The current table is never touched by a failed read.
pub fn read_tabular(path: &Path) -> Result<ExternalTable, TrackerError> {
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    };
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|e| TrackerError::ImportParse(e.to_string()))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| TrackerError::ImportParse(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(TrackerError::ImportParse(
            "file has no header row".to_string(),
        ));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| TrackerError::ImportParse(e.to_string()))?;
        // Ragged rows are padded/truncated to the header width.
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }
    Ok(ExternalTable { headers, rows })
}

/// Default mapping: each canonical field maps to the external column of the
/// identical name, if one exists.
pub fn propose_mapping(headers: &[String]) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();
    for field in schema::canonical_schema() {
        if headers.iter().any(|h| h == field.name) {
            mapping.set(field.name, field.name);
        }
    }
    mapping
}

/// Build the replacement table from a validated mapping. Mapped fields copy
/// the external cell with null markers normalized to empty; unmapped fields
/// are empty for every record; `Index` is regenerated as 1..=M regardless of
/// any index-like external column.
pub fn reconcile(external: &ExternalTable, mapping: &ColumnMapping) -> Table {
    let column_of: BTreeMap<&str, usize> = external
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.as_str(), i))
        .collect();

    let records = external
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let values = schema::canonical_schema()
                .iter()
                .map(|field| {
                    let value = mapping
                        .external_for(field.name)
                        .and_then(|ext| column_of.get(ext))
                        .and_then(|&col| row.get(col))
                        .map(|cell| normalize_cell(cell))
                        .unwrap_or_default();
                    (field.name.to_string(), value)
                })
                .collect();
            Record { index: i + 1, values }
        })
        .collect();
    Table { records }
}

/// Null markers from spreadsheet tooling become empty strings.
fn normalize_cell(cell: &str) -> String {
    let trimmed = cell.trim();
    match trimmed.to_lowercase().as_str() {
        "nan" | "null" | "none" => String::new(),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn proposal_maps_identical_names_only() {
        let mapping = propose_mapping(&headers(&["Company Name", "Role", "Notes"]));
        assert_eq!(mapping.external_for("Company Name"), Some("Company Name"));
        assert_eq!(mapping.external_for("Notes"), Some("Notes"));
        assert_eq!(mapping.external_for("Job Title"), None);
    }

    #[test]
    fn validate_rejects_unknown_canonical_and_missing_external() {
        let hs = headers(&["Company"]);

        let mut mapping = ColumnMapping::default();
        mapping.set("Index", "Company");
        assert!(matches!(
            mapping.validate(&hs),
            Err(TrackerError::UnknownField(_))
        ));

        let mut mapping = ColumnMapping::default();
        mapping.set("Company Name", "Employer");
        assert!(matches!(
            mapping.validate(&hs),
            Err(TrackerError::ImportParse(_))
        ));
    }

    #[test]
    fn reconcile_fills_unmapped_fields_and_regenerates_index() {
        let external = ExternalTable {
            headers: headers(&["Index", "Company", "Role"]),
            rows: vec![
                vec!["90".into(), "Acme".into(), "Engineer".into()],
                vec!["91".into(), "Globex".into(), "nan".into()],
                vec!["92".into(), "NULL".into(), "Analyst".into()],
            ],
        };
        let mut mapping = ColumnMapping::default();
        mapping.set("Company Name", "Company");
        mapping.set("Job Title", "Role");
        mapping.validate(&external.headers).unwrap();

        let table = reconcile(&external, &mapping);
        let indexes: Vec<usize> = table.records.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![1, 2, 3], "external Index column is ignored");
        assert_eq!(table.records[0].value("Company Name"), "Acme");
        assert_eq!(table.records[1].value("Job Title"), "", "nan becomes empty");
        assert_eq!(table.records[2].value("Company Name"), "", "NULL becomes empty");
        for record in &table.records {
            assert_eq!(record.value("Status"), "", "unmapped fields are empty");
            assert_eq!(record.values.len(), schema::canonical_schema().len());
        }
    }
}
