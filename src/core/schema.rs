//! Canonical schema registry for the application table.
//!
//! The registry owns three things: the ordered canonical field list for the
//! running version, the persisted snapshot shape, and the `upgrade` rule that
//! carries snapshots written under older field lists forward. Older releases
//! shipped without the Position/Industry/Term columns; their snapshots load
//! through the same path as current ones, no special cases.

use crate::core::attachments::AttachmentKind;
use crate::core::table::{Record, Table};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version tag written into every snapshot blob.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Name of the system identity column. Logically first everywhere, never a
/// schema field, never accepted from field input.
pub const INDEX_COLUMN: &str = "Index";

pub const STATUS_CHOICES: &[&str] = &[
    "Applied",
    "Interview Scheduled",
    "Rejected",
    "Offer Received",
];

pub const PRIORITY_CHOICES: &[&str] = &["Low", "Medium", "High"];

pub const APPLICATION_METHOD_CHOICES: &[&str] = &[
    "Company's Website",
    "LinkedIn",
    "Indeed",
    "Glassdoor",
    "Referral",
    "Email",
    "Job Board",
    "Other",
];

/// Value shape of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line free text.
    Text,
    /// Multi-line free text (notes and similar).
    LongText,
    /// ISO `YYYY-MM-DD` date, or empty string for "no date".
    Date,
    /// One of a fixed set of choices.
    Select(&'static [&'static str]),
    /// Free text whose suggested choices come from an attachment folder.
    FileSelect(AttachmentKind),
}

/// One column definition in the canonical schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Ordered canonical field list for the running version. `Index` is not
/// listed; it is a system column that precedes these everywhere.
pub fn canonical_schema() -> &'static [Field] {
    use FieldKind::*;
    static CANONICAL: &[Field] = &[
        Field { name: "Company Name", kind: Text, required: true },
        Field { name: "Job Title", kind: Text, required: true },
        Field { name: "Position", kind: Text, required: false },
        Field { name: "Industry", kind: Text, required: false },
        Field { name: "Term", kind: Text, required: true },
        Field { name: "Application Date", kind: Date, required: false },
        Field { name: "Status", kind: Select(STATUS_CHOICES), required: true },
        Field { name: "Job URL", kind: Text, required: false },
        Field { name: "Company Website", kind: Text, required: true },
        Field { name: "Location", kind: Text, required: true },
        Field { name: "Salary Range", kind: Text, required: false },
        Field { name: "Contact Person", kind: Text, required: false },
        Field { name: "Contact Email/Phone", kind: Text, required: false },
        Field {
            name: "Application Method",
            kind: Select(APPLICATION_METHOD_CHOICES),
            required: true,
        },
        Field {
            name: "Resume Version",
            kind: FileSelect(AttachmentKind::Resume),
            required: true,
        },
        Field {
            name: "Cover Letter Version",
            kind: FileSelect(AttachmentKind::CoverLetter),
            required: false,
        },
        Field { name: "Interview Date", kind: Date, required: false },
        Field { name: "Follow-up Date", kind: Date, required: false },
        Field { name: "Notes", kind: LongText, required: false },
        Field { name: "Next Steps", kind: LongText, required: false },
        Field { name: "Priority", kind: Select(PRIORITY_CHOICES), required: false },
    ];
    CANONICAL
}

/// Canonical field names in order.
pub fn field_names() -> Vec<&'static str> {
    canonical_schema().iter().map(|f| f.name).collect()
}

/// Look up a canonical field by exact name.
pub fn field(name: &str) -> Option<&'static Field> {
    canonical_schema().iter().find(|f| f.name == name)
}

/// Names of the required fields, in schema order.
pub fn required_fields() -> Vec<&'static str> {
    canonical_schema()
        .iter()
        .filter(|f| f.required)
        .map(|f| f.name)
        .collect()
}

/// Persisted table snapshot. `fields` records the names present at write
/// time so the blob stays self-describing across schema versions.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub snapshot_version: u32,
    pub fields: Vec<String>,
    pub records: Vec<Record>,
}

impl Snapshot {
    pub fn of(table: &Table) -> Self {
        Snapshot {
            snapshot_version: SNAPSHOT_VERSION,
            fields: field_names().iter().map(|n| n.to_string()).collect(),
            records: table.records.clone(),
        }
    }
}

/// Carry a loaded snapshot forward to the canonical schema.
///
/// Canonical fields absent from a record are added with empty values at
/// their canonical position; fields no longer in the canonical schema are
/// dropped; `Index` is recomputed from scratch as 1..N in loaded order,
/// never trusted from disk. Idempotent.
pub fn upgrade(snapshot: Snapshot) -> Table {
    let records = snapshot
        .records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let mut values = BTreeMap::new();
            for field in canonical_schema() {
                let value = record.values.get(field.name).cloned().unwrap_or_default();
                values.insert(field.name.to_string(), value);
            }
            Record { index: i + 1, values }
        })
        .collect();
    Table { records }
}
