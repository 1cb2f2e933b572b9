//! Owned table of application records.
//!
//! The table is a plain value: operations take it in and hand it back (or
//! mutate through `&mut`), there is no ambient global. Identity is the dense
//! 1-based `index`, renumbered on every structural change; it reflects the
//! current storage order, nothing more.

use crate::core::schema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One job-application entry. Holds a value (possibly empty) for every
/// canonical schema field, keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub index: usize,
    pub values: BTreeMap<String, String>,
}

impl Record {
    /// Field value by name; empty string for anything unset.
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// All field values concatenated in canonical order, the haystack for
    /// whole-record search.
    pub fn rendered(&self) -> String {
        let mut out = String::new();
        for name in schema::field_names() {
            out.push_str(self.value(name));
            out.push(' ');
        }
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub records: Vec<Record>,
}

impl Table {
    /// Fresh empty table under the canonical schema.
    pub fn new() -> Self {
        Table::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record with the given 1-based index, if present.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.iter().find(|r| r.index == index)
    }

    pub(crate) fn position(&self, index: usize) -> Option<usize> {
        self.records.iter().position(|r| r.index == index)
    }

    /// Renumber indexes densely as 1..=N in current order.
    pub fn reindex(&mut self) {
        for (i, record) in self.records.iter_mut().enumerate() {
            record.index = i + 1;
        }
    }

    /// Records whose textual rendering contains `query`, case-insensitively.
    /// Lazy and restartable; table order preserved; empty query matches all.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Record> + 'a {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(move |r| needle.is_empty() || r.rendered().to_lowercase().contains(&needle))
    }
}

/// Sort key ladder: integer parse, then float parse, then case-insensitive
/// text. Numbers order before text so a numeric column with stray blanks
/// still sorts sensibly.
#[derive(Debug, Clone)]
enum SortKey {
    Int(i64),
    Float(f64),
    Text(String),
}

impl SortKey {
    fn of(value: &str) -> Self {
        if let Ok(n) = value.parse::<i64>() {
            SortKey::Int(n)
        } else if let Ok(x) = value.parse::<f64>() {
            SortKey::Float(x)
        } else {
            SortKey::Text(value.to_lowercase())
        }
    }

    fn cmp(&self, other: &Self) -> Ordering {
        use SortKey::*;
        match (self, other) {
            (Int(a), Int(b)) => a.cmp(b),
            (Int(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Int(b)) => a.total_cmp(&(*b as f64)),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Int(_) | Float(_), Text(_)) => Ordering::Less,
            (Text(_), Int(_) | Float(_)) => Ordering::Greater,
        }
    }
}

/// Stable sort by one column. `Index` sorts on the system index; any other
/// name sorts on that field's value. Ties keep their prior relative order.
pub fn sort_records(records: &mut [Record], field: &str, descending: bool) {
    records.sort_by(|a, b| {
        let ord = if field == schema::INDEX_COLUMN {
            a.index.cmp(&b.index)
        } else {
            SortKey::of(a.value(field)).cmp(&SortKey::of(b.value(field)))
        };
        if descending { ord.reverse() } else { ord }
    });
}
