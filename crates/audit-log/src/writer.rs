//! Single-writer dispatch for audit records.
//!
//! Request paths never touch the file. They push the record onto a bounded
//! channel and return; one background task owns the [`AuditFile`] and
//! appends records in the order they were queued. With a single writer
//! there is no way for two lines to interleave.
//!
//! ```ignore
//! let (log, writer) = AuditLog::spawn(AuditFile::new("search.log"), 1024);
//! log.try_append("/movie.SearchMovie/SearchMovie/ ...")?;
//!
//! // On shutdown: drop every handle, then let the writer drain
//! drop(log);
//! writer.finish(Duration::from_secs(5)).await;
//! ```

use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use movie_domain::AuditSink;

use crate::error::{AuditError, Result};
use crate::file::AuditFile;

/// Queue capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Cloneable handle used to queue audit records.
#[derive(Debug, Clone)]
pub struct AuditLog {
    tx: mpsc::Sender<String>,
}

/// The background task that owns the audit file.
///
/// The task exits once every [`AuditLog`] handle is dropped and the queue
/// is empty.
#[derive(Debug)]
pub struct AuditWriter {
    handle: JoinHandle<u64>,
}

impl AuditLog {
    /// Start the writer task on the current tokio runtime.
    ///
    /// # Arguments
    /// * `file` - Destination file
    /// * `capacity` - Maximum number of records waiting to be written
    ///   (values below 1 are raised to 1)
    pub fn spawn(file: AuditFile, capacity: usize) -> (AuditLog, AuditWriter) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(run_writer(file, rx));
        (AuditLog { tx }, AuditWriter { handle })
    }

    /// Queue a record without waiting.
    ///
    /// # Returns
    /// * `AuditError::QueueFull` - the writer is behind, the record was dropped
    /// * `AuditError::Closed` - the writer task has stopped
    pub fn try_append(&self, record: impl Into<String>) -> Result<()> {
        self.tx.try_send(record.into()).map_err(|e| match e {
            TrySendError::Full(_) => AuditError::QueueFull,
            TrySendError::Closed(_) => AuditError::Closed,
        })
    }
}

impl AuditSink for AuditLog {
    fn append(&self, record: String) -> anyhow::Result<()> {
        Ok(self.try_append(record)?)
    }
}

impl AuditWriter {
    /// Wait for the writer to drain its queue and stop.
    ///
    /// Only completes early once every [`AuditLog`] handle has been dropped.
    /// If the queue is not drained within `grace`, the task is aborted and
    /// the remaining records are lost.
    ///
    /// # Returns
    /// Number of records written, or `None` if the writer was aborted or
    /// panicked
    pub async fn finish(mut self, grace: Duration) -> Option<u64> {
        match tokio::time::timeout(grace, &mut self.handle).await {
            Ok(Ok(written)) => Some(written),
            Ok(Err(e)) => {
                error!("Audit writer task failed: {}", e);
                None
            }
            Err(_) => {
                warn!("Audit writer did not drain within {:?}, aborting", grace);
                self.handle.abort();
                None
            }
        }
    }
}

async fn run_writer(file: AuditFile, mut rx: mpsc::Receiver<String>) -> u64 {
    info!("Audit writer started for {}", file.path().display());

    let mut written = 0;
    while let Some(record) = rx.recv().await {
        match file.append(&record).await {
            Ok(()) => {
                written += 1;
                debug!("Audit record written");
            }
            Err(e) => error!("Failed to write audit record: {}", e),
        }
    }

    info!("Audit writer stopped after {} records", written);
    written
}
