//! Storage error types for stockbook-storage.
//!
//! [`StorageError`] covers the failures a snapshot store cannot recover from
//! on its own. Absent or unparsable snapshots are not errors: the high-level
//! `load` substitutes an empty default for them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading, creating or writing a snapshot file failed.
    #[error("i/o error on {path}: {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Moving a fully written temp file over the snapshot failed.
    #[error("failed to persist snapshot {path}: {source}", path = path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
