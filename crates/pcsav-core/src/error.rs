//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a [`RecordReader`](crate::probe::RecordReader) to produce a summary.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// The only outcome a probe reports on failure; detail is logged, not carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("record is unreadable")]
pub struct Unreadable;

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("picker is closed")]
    Closed,

    #[error("nothing selected")]
    NothingSelected,

    #[error("no record available to name a new career")]
    MissingRecord,

    #[error("load mode requires an existing save")]
    LoadRequiresExistingSave,

    #[error("new careers and saves can only be chosen in save mode")]
    SaveModeOnly,

    #[error("no free save number left in {0}")]
    SequenceExhausted(PathBuf),

    #[error("not part of the current listing: {0}")]
    UnknownEntry(PathBuf),
}

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, PickerError>;
