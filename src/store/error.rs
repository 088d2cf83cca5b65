//! Tag-store-specific error types
//!
//! Covers construction over an invalid base path, record file I/O and a
//! malformed persisted record. A record that fails to parse is surfaced as
//! an error rather than silently replaced by an empty store.

use std::path::PathBuf;
use thiserror::Error;

/// Tag store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Base path does not exist or is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Represents an I/O error while reading or writing the record
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted tag record could not be parsed
    #[error("Malformed tag record: {0}")]
    Json(#[from] serde_json::Error),
}
