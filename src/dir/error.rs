//! Directory-operation error types

use thiserror::Error;

use crate::store::StoreError;

/// Directory state machine errors
#[derive(Debug, Error)]
pub enum DirError {
    /// Filter mode was neither `any` nor `all`
    #[error("Invalid filter mode '{0}': expected 'any' or 'all'")]
    InvalidMode(String),

    /// Pattern filter received an invalid regular expression
    #[error("Invalid tag pattern: {0}")]
    BadPattern(#[from] regex::Error),

    /// Represents an I/O error while listing or moving files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tag store error
    #[error(transparent)]
    Store(#[from] StoreError),
}
