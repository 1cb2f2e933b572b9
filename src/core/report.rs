//! Read-only reporting projections over the table.
//!
//! Chart rendering belongs to external consumers; these functions produce
//! the tabulated counts those dashboards draw from.

use crate::core::error::TrackerError;
use crate::core::schema;
use crate::core::table::Table;
use std::collections::BTreeMap;

/// Count per distinct field value, descending by count then ascending by
/// value. Empty values bucket under `""` and appear only when present.
pub fn value_counts(table: &Table, field: &str) -> Result<Vec<(String, usize)>, TrackerError> {
    if schema::field(field).is_none() {
        return Err(TrackerError::UnknownField(field.to_string()));
    }
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in &table.records {
        *counts.entry(record.value(field).to_string()).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(out)
}

/// Total application count plus per-status counts, in the status choice
/// order the form presents.
pub struct Summary {
    pub total: usize,
    pub by_status: Vec<(String, usize)>,
}

pub fn summary(table: &Table) -> Summary {
    let mut by_status = Vec::new();
    for status in schema::STATUS_CHOICES {
        let count = table
            .records
            .iter()
            .filter(|r| r.value("Status") == *status)
            .count();
        by_status.push((status.to_string(), count));
    }
    Summary {
        total: table.len(),
        by_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::Record;
    use std::collections::BTreeMap;

    fn record(index: usize, status: &str, industry: &str) -> Record {
        let mut values: BTreeMap<String, String> = schema::field_names()
            .iter()
            .map(|n| (n.to_string(), String::new()))
            .collect();
        values.insert("Status".to_string(), status.to_string());
        values.insert("Industry".to_string(), industry.to_string());
        Record { index, values }
    }

    #[test]
    fn counts_order_by_frequency_then_value() {
        let table = Table {
            records: vec![
                record(1, "Applied", "Fintech"),
                record(2, "Applied", "Robotics"),
                record(3, "Rejected", "Fintech"),
            ],
        };
        let counts = value_counts(&table, "Industry").unwrap();
        assert_eq!(
            counts,
            vec![("Fintech".to_string(), 2), ("Robotics".to_string(), 1)]
        );
    }

    #[test]
    fn counts_reject_unknown_field() {
        let table = Table::new();
        assert!(matches!(
            value_counts(&table, "Moodiness"),
            Err(TrackerError::UnknownField(_))
        ));
    }

    #[test]
    fn summary_counts_every_status_choice() {
        let table = Table {
            records: vec![record(1, "Applied", ""), record(2, "Offer Received", "")],
        };
        let s = summary(&table);
        assert_eq!(s.total, 2);
        assert_eq!(s.by_status.len(), schema::STATUS_CHOICES.len());
        assert!(s.by_status.contains(&("Applied".to_string(), 1)));
        assert!(s.by_status.contains(&("Rejected".to_string(), 0)));
    }
}
