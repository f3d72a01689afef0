//! Error types for the audit-log crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while recording an audit line
#[derive(Error, Debug)]
pub enum AuditError {
    /// The log file could not be opened or written
    #[error("Failed to append to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The writer is behind and the queue is at capacity; the record was dropped
    #[error("Audit queue is full, record dropped")]
    QueueFull,

    /// The writer task is gone
    #[error("Audit writer has stopped")]
    Closed,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, AuditError>;
