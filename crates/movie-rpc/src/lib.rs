//! gRPC definition of the movie gateway, plus a small client.
//!
//! This crate provides:
//! - The generated protobuf messages and the `SearchMovie` service (client and server halves)
//! - The full method names used in audit records
//! - `MovieClient`, a thin wrapper over the generated client used by the CLI

use thiserror::Error;
use tonic::transport::Channel;
use tracing::{debug, error, info};

// Include the generated protobuf code
pub mod movie {
    tonic::include_proto!("movie");
}

use movie::{
    search_movie_client::SearchMovieClient, GetMovieDetailRequest, GetMovieDetailResponse,
    SearchMovieRequest, SearchMovieResponse,
};

/// Full gRPC method path of `SearchMovie`.
pub const SEARCH_MOVIE_METHOD: &str = "/movie.SearchMovie/SearchMovie";

/// Full gRPC method path of `GetMovieDetail`.
pub const GET_MOVIE_DETAIL_METHOD: &str = "/movie.SearchMovie/GetMovieDetail";

/// Errors that can occur when calling the gateway
#[derive(Error, Debug)]
pub enum MovieClientError {
    #[error("Failed to connect to movie gateway: {0}")]
    ConnectionError(String),

    #[error("Request rejected ({:?}): {}", .0.code(), .0.message())]
    Rpc(#[from] tonic::Status),
}

/// Client for the gateway's gRPC surface.
///
/// This wraps the auto-generated gRPC client and keeps the request
/// construction in one place.
#[derive(Clone)]
pub struct MovieClient {
    client: SearchMovieClient<Channel>,
    service_addr: String,
}

impl MovieClient {
    /// Connect to a running gateway.
    ///
    /// # Arguments
    /// * `addr` - Address of the gRPC service (e.g., "http://localhost:50051")
    pub async fn connect(addr: impl Into<String>) -> Result<Self, MovieClientError> {
        let addr = addr.into();
        info!("Connecting to movie gateway at {}", addr);

        let channel = Channel::from_shared(addr.clone())
            .map_err(|e| MovieClientError::ConnectionError(e.to_string()))?
            .connect()
            .await
            .map_err(|e| {
                error!("Failed to connect to {}: {}", addr, e);
                MovieClientError::ConnectionError(e.to_string())
            })?;

        Ok(MovieClient {
            client: SearchMovieClient::new(channel),
            service_addr: addr,
        })
    }

    /// Search titles by phrase.
    ///
    /// The phrase is sent as typed; the gateway takes care of encoding it
    /// and of normalizing `page`.
    pub async fn search(
        &mut self,
        searchword: impl Into<String>,
        page: i32,
    ) -> Result<SearchMovieResponse, MovieClientError> {
        let request = SearchMovieRequest {
            searchword: searchword.into(),
            pagination: page,
        };
        debug!("SearchMovie {:?}", request);

        let response = self.client.search_movie(request).await?;
        Ok(response.into_inner())
    }

    /// Fetch the full record for an IMDb identifier.
    pub async fn detail(
        &mut self,
        id: impl Into<String>,
    ) -> Result<GetMovieDetailResponse, MovieClientError> {
        let request = GetMovieDetailRequest { id: id.into() };
        debug!("GetMovieDetail {:?}", request);

        let response = self.client.get_movie_detail(request).await?;
        Ok(response.into_inner())
    }

    /// Get the address of the gateway this client is connected to.
    pub fn service_address(&self) -> &str {
        &self.service_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie::search_movie_server::{SearchMovie, SearchMovieServer};
    use movie::{Rating, Search};
    use tokio::net::TcpListener;
    use tokio_stream::wrappers::TcpListenerStream;
    use tonic::transport::Server;
    use tonic::{Request, Response, Status};

    /// Echoes the request back so the test can see what went over the wire
    #[derive(Default)]
    struct EchoService;

    #[tonic::async_trait]
    impl SearchMovie for EchoService {
        async fn search_movie(
            &self,
            request: Request<SearchMovieRequest>,
        ) -> Result<Response<SearchMovieResponse>, Status> {
            let req = request.into_inner();
            Ok(Response::new(SearchMovieResponse {
                results: vec![Search {
                    title: req.searchword,
                    ..Default::default()
                }],
                total: req.pagination.to_string(),
            }))
        }

        async fn get_movie_detail(
            &self,
            request: Request<GetMovieDetailRequest>,
        ) -> Result<Response<GetMovieDetailResponse>, Status> {
            Err(Status::not_found(format!("{} not found", request.get_ref().id)))
        }
    }

    async fn start_echo_service() -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind echo service");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            Server::builder()
                .add_service(SearchMovieServer::new(EchoService))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("Echo service failed");
        });

        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn test_client_round_trip() {
        let (addr, handle) = start_echo_service().await;
        let mut client = MovieClient::connect(addr.clone()).await.expect("Failed to connect");
        assert_eq!(client.service_address(), addr);

        let response = client.search("iron man", 3).await.unwrap();
        assert_eq!(response.results[0].title, "iron man");
        assert_eq!(response.total, "3");

        let err = client.detail("tt0000001").await.unwrap_err();
        match err {
            MovieClientError::Rpc(status) => {
                assert_eq!(status.code(), tonic::Code::NotFound);
                assert_eq!(status.message(), "tt0000001 not found");
            }
            other => panic!("expected Rpc error, got {other:?}"),
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_connect_failure() {
        let result = MovieClient::connect("http://127.0.0.1:1").await;
        assert!(matches!(result, Err(MovieClientError::ConnectionError(_))));
    }

    #[test]
    fn test_json_uses_lower_camel_case() {
        let response = GetMovieDetailResponse {
            imdb_id: "tt0371746".into(),
            box_office: "$1".into(),
            r#type: "movie".into(),
            ratings: vec![Rating {
                source: "Metacritic".into(),
                value: "79/100".into(),
            }],
            ..Default::default()
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["imdbId"], "tt0371746");
        assert_eq!(json["boxOffice"], "$1");
        assert_eq!(json["type"], "movie");
        assert_eq!(json["ratings"][0]["source"], "Metacritic");
    }
}
