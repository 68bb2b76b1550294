//! Domain errors for the Redline review system.

use std::path::PathBuf;

use thiserror::Error;

/// Domain-level errors that can occur in the Redline system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Batch not found: {0}")]
    BatchNotFound(String),

    #[error("Suggestion not found: {0}")]
    SuggestionNotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Invalid state transition from {from} to {to}: {reason}")]
    InvalidStateTransition {
        from: String,
        to: String,
        reason: String,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Backup file missing: {0}")]
    BackupMissing(PathBuf),

    #[error("Suggestion {0} has no recorded backup")]
    BackupNotRecorded(String),

    #[error("Suggestion {0} has no recorded file path")]
    MissingFilePath(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
