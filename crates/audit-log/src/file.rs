//! The flat, append-only audit file.
//!
//! Each record becomes exactly one line:
//!
//! ```text
//! movie_search: 2024/01/31 18:04:05 /movie.SearchMovie/SearchMovie/ SearchMovieRequest { .. }
//! ```
//!
//! The file is opened in create-or-append mode for every line and closed
//! again straight after, so it can be moved away by external tooling
//! without restarting the gateway. The file is never rotated or truncated.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::{AuditError, Result};

/// Prefix written in front of every line.
pub const DEFAULT_PREFIX: &str = "movie_search:";

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Location and line format of the audit file.
#[derive(Debug, Clone)]
pub struct AuditFile {
    path: PathBuf,
    prefix: String,
}

impl AuditFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line for `record`, stamped with the local time.
    ///
    /// Not safe to call concurrently for the same path; the
    /// [`AuditLog`](crate::AuditLog) writer task is the only caller in the
    /// gateway.
    pub async fn append(&self, record: &str) -> Result<()> {
        let line = self.format_line(record, Local::now().naive_local());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))?;

        Ok(())
    }

    /// Render a record as a single newline-terminated line.
    pub fn format_line(&self, record: &str, at: NaiveDateTime) -> String {
        // One record, one line
        let record = record.replace(['\r', '\n'], " ");
        format!("{} {} {}\n", self.prefix, at.format(TIMESTAMP_FORMAT), record)
    }

    fn io_error(&self, source: std::io::Error) -> AuditError {
        AuditError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
