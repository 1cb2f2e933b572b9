//! Core domain: schema registry, record store, import reconciliation, and
//! the supporting projections. No terminal concerns except `output`, which
//! the command layer shares.

pub mod attachments;
pub mod error;
pub mod export;
pub mod import;
pub mod output;
pub mod report;
pub mod schema;
pub mod store;
pub mod table;
