//! Tagdir - sidecar tag management for a single directory
//!
//! This library attaches free-form tags to the files of one directory,
//! persists them in a JSON record next to the files, and selects subsets of
//! files by tag predicates. A physical filter moves its matches into a
//! result subdirectory; a reset restores the flat layout.

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod dir;
pub mod output;
pub mod store;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TagdirError {
    /// Tag store error
    #[error("Store error: {0}")]
    StoreError(#[from] store::StoreError),
    /// Directory operation error
    #[error("Directory error: {0}")]
    DirError(#[from] dir::DirError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
