//! HTTP/JSON facade over the gRPC service.
//!
//! Every route calls the same `SearchMovie` object the gRPC server uses,
//! so validation, error classification and auditing are identical on both
//! surfaces.
//!
//! ```text
//! GET /health                                   -> "ok"
//! GET /v1/movies?searchword=<s>&pagination=<n>  -> SearchMovie
//! GET /v1/movies/{id}                           -> GetMovieDetail
//! ```
//!
//! Errors are returned as `{"code": <grpc code>, "message": ..., "details": []}`
//! with the HTTP status conventionally paired with the gRPC code.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response as HttpResponse},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tonic::{Code, Request, Status};
use tower_http::trace::TraceLayer;
use tracing::debug;

use movie_rpc::movie::search_movie_server::SearchMovie;
use movie_rpc::movie::{
    GetMovieDetailRequest, GetMovieDetailResponse, SearchMovieRequest, SearchMovieResponse,
};

/// The service shared between the gRPC server and this router
pub type SharedService = Arc<dyn SearchMovie>;

/// Query string of `GET /v1/movies`
///
/// `pagination` is kept as text: a value that is not a number counts as
/// "no page", which the handler turns into the first page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub searchword: String,
    pub pagination: String,
}

impl SearchParams {
    pub fn page(&self) -> i32 {
        self.pagination.trim().parse().unwrap_or(0)
    }
}

/// Create the axum router for the HTTP gateway
pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/movies", get(search_movie))
        .route("/v1/movies/:id", get(get_movie_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn health_check() -> &'static str {
    "ok"
}

async fn search_movie(
    State(service): State<SharedService>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchMovieResponse>, GatewayError> {
    let Query(params) =
        params.map_err(|rejection| Status::invalid_argument(rejection.body_text()))?;
    let request = Request::new(SearchMovieRequest {
        pagination: params.page(),
        searchword: params.searchword,
    });
    let response = service.search_movie(request).await?;
    Ok(Json(response.into_inner()))
}

async fn get_movie_detail(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<GetMovieDetailResponse>, GatewayError> {
    let response = service
        .get_movie_detail(Request::new(GetMovieDetailRequest { id }))
        .await?;
    Ok(Json(response.into_inner()))
}

/// A gRPC status rendered as an HTTP error response
#[derive(Debug)]
pub struct GatewayError(pub Status);

impl From<Status> for GatewayError {
    fn from(status: Status) -> Self {
        Self(status)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> HttpResponse {
        let code = self.0.code();
        let status = http_status(code);
        debug!("Gateway error {:?} -> {}", code, status);

        let body = json!({
            "code": code as i32,
            "message": self.0.message(),
            "details": [],
        });
        (status, Json(body)).into_response()
    }
}

/// HTTP status for a gRPC code, following the usual gRPC-gateway table.
pub fn http_status(code: Code) -> StatusCode {
    match code {
        Code::Ok => StatusCode::OK,
        // nginx's "client closed request"
        Code::Cancelled => {
            StatusCode::from_u16(499).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Code::InvalidArgument | Code::FailedPrecondition | Code::OutOfRange => {
            StatusCode::BAD_REQUEST
        }
        Code::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        Code::NotFound => StatusCode::NOT_FOUND,
        Code::AlreadyExists | Code::Aborted => StatusCode::CONFLICT,
        Code::PermissionDenied => StatusCode::FORBIDDEN,
        Code::Unauthenticated => StatusCode::UNAUTHORIZED,
        Code::ResourceExhausted => StatusCode::TOO_MANY_REQUESTS,
        Code::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        Code::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        Code::Unknown | Code::Internal | Code::DataLoss => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
