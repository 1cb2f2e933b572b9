use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("store snapshot could not be parsed: {0}")]
    CorruptStore(String),
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("no record with index {index}")]
    NotFound { index: usize },
    #[error("import file could not be read: {0}")]
    ImportParse(String),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("attachment error: {0}")]
    InvalidAttachment(String),
    #[error("path error: {0}")]
    Path(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
