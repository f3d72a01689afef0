//! Request audit interceptor.
//!
//! `tonic::service::Interceptor` only sees metadata, not the decoded
//! message, so auditing is done one level up: [`Interceptor`] wraps any
//! `SearchMovie` implementation and records `"<full method>/ <request>"`
//! before delegating. Queueing the record never waits on disk I/O, and a
//! rejected record is only reported in the server log.

use std::fmt::Debug;
use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::warn;

use movie_domain::MovieUsecase;
use movie_rpc::movie::search_movie_server::SearchMovie;
use movie_rpc::movie::{
    GetMovieDetailRequest, GetMovieDetailResponse, SearchMovieRequest, SearchMovieResponse,
};
use movie_rpc::{GET_MOVIE_DETAIL_METHOD, SEARCH_MOVIE_METHOD};

/// Audit decorator around a `SearchMovie` service
pub struct Interceptor<S> {
    inner: S,
    usecase: Arc<dyn MovieUsecase>,
}

impl<S> Interceptor<S> {
    pub fn new(inner: S, usecase: Arc<dyn MovieUsecase>) -> Self {
        Self { inner, usecase }
    }

    fn record<T: Debug>(&self, method: &str, request: &Request<T>) {
        let record = format!("{}/ {:?}", method, request.get_ref());
        if let Err(e) = self.usecase.log(record) {
            warn!("Failed to queue audit record for {}: {:#}", method, e);
        }
    }
}

#[tonic::async_trait]
impl<S: SearchMovie> SearchMovie for Interceptor<S> {
    async fn search_movie(
        &self,
        request: Request<SearchMovieRequest>,
    ) -> Result<Response<SearchMovieResponse>, Status> {
        self.record(SEARCH_MOVIE_METHOD, &request);
        self.inner.search_movie(request).await
    }

    async fn get_movie_detail(
        &self,
        request: Request<GetMovieDetailRequest>,
    ) -> Result<Response<GetMovieDetailResponse>, Status> {
        self.record(GET_MOVIE_DETAIL_METHOD, &request);
        self.inner.get_movie_detail(request).await
    }
}
