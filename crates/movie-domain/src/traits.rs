//! Capability interfaces between the layers of the gateway.
//!
//! Each layer only sees the trait of the layer below it, so the handler
//! and the use case can be exercised against hand-written fakes.

use anyhow::Result;
use async_trait::async_trait;

use crate::types::{MovieDetail, MovieSearch};

/// Source of movie metadata (the OMDb adapter in production).
///
/// ## Design Note
/// - An `Err` means the lookup itself failed (transport, status, decoding).
/// - A lookup that reached the API but found nothing is an `Ok` whose
///   record carries an embedded error.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Search titles. `title` is already form-encoded by the caller.
    async fn search_movies(&self, title: &str, page: u32) -> Result<MovieSearch>;

    /// Fetch the full record for an IMDb identifier.
    async fn get_movie_detail(&self, id: &str) -> Result<MovieDetail>;
}

/// Destination for audit records.
///
/// Implementations must not block the caller on I/O.
pub trait AuditSink: Send + Sync {
    fn append(&self, record: String) -> Result<()>;
}

/// What the request handler and interceptor depend on.
#[async_trait]
pub trait MovieUsecase: Send + Sync {
    async fn search_movies(&self, title: &str, page: u32) -> Result<MovieSearch>;

    async fn get_movie_detail(&self, id: &str) -> Result<MovieDetail>;

    /// Hand a record to the audit log. Returns once the record is queued.
    fn log(&self, record: String) -> Result<()>;
}
