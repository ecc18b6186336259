//! Indexer error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during indexing operations.
///
/// The scanner only returns [`IndexerError::NotADirectory`]; unreadable files
/// and walk errors degrade to empty values instead. `Io` and `Serialization`
/// come from reading and writing index JSON, which the cache swallows.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// The scan root does not exist or is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for IndexerError {
    fn from(e: serde_json::Error) -> Self {
        IndexerError::Serialization(e.to_string())
    }
}
