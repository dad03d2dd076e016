//! Typed error definitions for files_manager.
//! Provides a small set of well-known failure modes for better logs and tests.
//! Library calls return `anyhow::Result`; callers `downcast_ref::<FilesError>()` to branch.

use thiserror::Error;

use crate::record::RecordId;

#[derive(Debug, Error)]
pub enum FilesError {
    #[error("Disk '{0}' is not configured")]
    UnknownDisk(String),

    #[error("File record {0} not found")]
    RecordNotFound(RecordId),

    #[error("Content for '{path}' is missing on disk '{disk}'")]
    MissingContent { disk: String, path: String },

    #[error("Refusing unsafe storage path: {0}")]
    UnsafePath(String),

    #[error("Name '{name}' is already taken in {namespace}")]
    NameTaken { namespace: String, name: String },

    #[error("Duplication of '{name}' failed: {reason}")]
    DuplicationFailed { name: String, reason: String },

    #[error("Batch copy aborted at element {index} after {completed} completed copies")]
    BatchAborted { index: usize, completed: usize },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl FilesError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            FilesError::UnknownDisk(_) => 10,
            FilesError::RecordNotFound(_) => 11,
            FilesError::MissingContent { .. } => 12,
            FilesError::UnsafePath(_) => 13,
            FilesError::NameTaken { .. } => 20,
            FilesError::DuplicationFailed { .. } => 30,
            FilesError::BatchAborted { .. } => 31,
            FilesError::Interrupted => 130,
        }
    }
}
