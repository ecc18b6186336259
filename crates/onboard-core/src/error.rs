//! Core error types for Onboard.

use onboard_indexer::IndexerError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in core operations
#[derive(Debug, Error)]
pub enum CoreError {
    /// No task with this id in the task source
    #[error("Task '{0}' not found")]
    TaskNotFound(String),

    /// Task source could not be read or parsed
    #[error("Failed to load tasks: {0}")]
    TaskSource(String),

    /// Codebase root is missing or not a directory
    #[error("Codebase root is not a directory: {0}")]
    InvalidRoot(PathBuf),

    /// Chat model call failed
    #[error("Model error: {0}")]
    Model(String),

    /// Configuration file could not be loaded
    #[error("Config error: {0}")]
    Config(String),

    /// Blocking indexing task panicked or was cancelled
    #[error("Indexing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IndexerError> for CoreError {
    fn from(e: IndexerError) -> Self {
        match e {
            IndexerError::NotADirectory(path) => CoreError::InvalidRoot(path),
            IndexerError::Io(e) => CoreError::Io(e),
            IndexerError::Serialization(msg) => {
                CoreError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, msg))
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
