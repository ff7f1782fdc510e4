use std::path::PathBuf;

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by the file store when a document cannot be persisted.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The document could not be serialized before writing.
    #[error("failed to serialize `{}`: {source}", path.display())]
    Serialize {
        /// Target file path.
        path: PathBuf,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the temporary file or renaming it into place failed.
    #[error("failed to write `{}`: {source}", path.display())]
    Write {
        /// Target file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
