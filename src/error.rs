//! Error types shared by the snippet store and the view controller.
//!
//! None of these are fatal: the popup reports them as a notice and keeps
//! running so the user can retry.

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Top-level error for store and controller operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Snippet {0} no longer exists")]
    NotFound(Uuid),
}

/// Rejected input at save time. No store mutation happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in both title and content (title is empty)")]
    EmptyTitle,

    #[error("Please fill in both title and content (content is empty)")]
    EmptyText,
}

/// Failure of the backing key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stored data is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unexpected storage layout: {0}")]
    Layout(String),

    #[error("{0}")]
    Unavailable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Short label used in the status bar.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation",
            Error::Storage(_) => "storage",
            Error::NotFound(_) => "not found",
        }
    }
}
