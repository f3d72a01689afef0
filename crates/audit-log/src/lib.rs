//! # Audit Log Crate
//!
//! Best-effort request audit trail for the movie gateway.
//!
//! ## Main Components
//!
//! - **file**: `AuditFile`, formats and appends one line per record
//! - **writer**: `AuditLog` handle + `AuditWriter` task, a bounded queue
//!   with a single consumer so concurrent requests never interleave lines
//! - **error**: `AuditError`
//!
//! Producers never wait on disk I/O: a record is either queued or rejected
//! immediately, and the caller decides what to do with the rejection (the
//! gateway logs it and moves on).

pub mod error;
pub mod file;
pub mod writer;

pub use error::{AuditError, Result};
pub use file::{AuditFile, DEFAULT_PREFIX};
pub use writer::{AuditLog, AuditWriter, DEFAULT_CAPACITY};
