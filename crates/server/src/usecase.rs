//! # Movie Catalog Use Case
//!
//! Sits between the request handler and the adapters:
//! - lookups go straight to the [`MovieRepository`] and come back unchanged,
//!   errors included
//! - audit records go to the [`AuditSink`]
//!
//! Audit records are produced once per request by the interceptor, so
//! lookups here do not log on their own.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use movie_domain::{AuditSink, MovieDetail, MovieRepository, MovieSearch, MovieUsecase};

/// Production implementation of [`MovieUsecase`]
#[derive(Clone)]
pub struct MovieCatalog {
    repository: Arc<dyn MovieRepository>,
    audit: Arc<dyn AuditSink>,
}

impl MovieCatalog {
    pub fn new(repository: Arc<dyn MovieRepository>, audit: Arc<dyn AuditSink>) -> Self {
        Self { repository, audit }
    }
}

#[async_trait]
impl MovieUsecase for MovieCatalog {
    async fn search_movies(&self, title: &str, page: u32) -> Result<MovieSearch> {
        self.repository.search_movies(title, page).await
    }

    async fn get_movie_detail(&self, id: &str) -> Result<MovieDetail> {
        self.repository.get_movie_detail(id).await
    }

    fn log(&self, record: String) -> Result<()> {
        self.audit.append(record)
    }
}
