//! # gRPC Request Handler
//!
//! Translates `SearchMovie` RPCs into use-case calls:
//! 1. Validate / normalize the request
//! 2. Delegate to the [`MovieUsecase`]
//! 3. Classify the outcome into a gRPC status
//! 4. Map the domain record onto the response message
//!
//! ## Error classification
//!
//! | Outcome | Code |
//! |---|---|
//! | empty search phrase, malformed IMDb id | `INVALID_ARGUMENT` |
//! | OMDb answered with an embedded `Error` | `NOT_FOUND` |
//! | the lookup itself failed | `INTERNAL` |
//!
//! Clients only ever see the fixed messages below; the upstream error is
//! logged here and not forwarded.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::{debug, error};

use movie_domain::{MovieDetail, MovieSearch, MovieUsecase};
use movie_rpc::movie::search_movie_server::SearchMovie;
use movie_rpc::movie::{
    GetMovieDetailRequest, GetMovieDetailResponse, Rating, Search, SearchMovieRequest,
    SearchMovieResponse,
};

pub const INCORRECT_IMDB_ID: &str = "incorrect IMDB ID";
pub const EMPTY_SEARCHWORD: &str = "searchword must not be empty";
pub const MOVIE_NOT_FOUND: &str = "movie not found";
pub const INTERNAL_ERROR: &str = "internal error";

/// Implementation of the generated `SearchMovie` service.
///
/// Stateless apart from the shared use case, so one instance serves every
/// connection.
#[derive(Clone)]
pub struct MovieServer {
    usecase: Arc<dyn MovieUsecase>,
}

impl MovieServer {
    pub fn new(usecase: Arc<dyn MovieUsecase>) -> Self {
        Self { usecase }
    }
}

#[tonic::async_trait]
impl SearchMovie for MovieServer {
    async fn search_movie(
        &self,
        request: Request<SearchMovieRequest>,
    ) -> Result<Response<SearchMovieResponse>, Status> {
        let req = request.into_inner();
        if req.searchword.trim().is_empty() {
            return Err(Status::invalid_argument(EMPTY_SEARCHWORD));
        }

        let page = normalize_page(req.pagination);
        let searchword = encode_search_phrase(&req.searchword);

        let search = self
            .usecase
            .search_movies(&searchword, page)
            .await
            .map_err(|e| {
                error!("Search for '{}' failed: {:#}", searchword, e);
                Status::internal(INTERNAL_ERROR)
            })?;

        if let Some(reason) = search.embedded_error() {
            debug!("No results for '{}': {}", searchword, reason);
            return Err(Status::not_found(MOVIE_NOT_FOUND));
        }

        Ok(Response::new(to_search_response(search)))
    }

    async fn get_movie_detail(
        &self,
        request: Request<GetMovieDetailRequest>,
    ) -> Result<Response<GetMovieDetailResponse>, Status> {
        let id = request.into_inner().id;
        validate_imdb_id(&id)?;

        let detail = self.usecase.get_movie_detail(&id).await.map_err(|e| {
            error!("Detail lookup for {} failed: {:#}", id, e);
            Status::internal(INTERNAL_ERROR)
        })?;

        if let Some(reason) = detail.embedded_error() {
            debug!("No detail for {}: {}", id, reason);
            return Err(Status::not_found(MOVIE_NOT_FOUND));
        }

        Ok(Response::new(to_detail_response(detail)))
    }
}

/// Pages are 1-based; anything below 1 means the first page.
pub fn normalize_page(page: i32) -> u32 {
    if page <= 0 {
        1
    } else {
        page as u32
    }
}

/// Form-encode a search phrase for the OMDb query string (`"iron man"` -> `"iron+man"`).
pub fn encode_search_phrase(phrase: &str) -> String {
    url::form_urlencoded::byte_serialize(phrase.as_bytes()).collect()
}

/// An IMDb id must contain `tt`, and what is left after removing every `tt`
/// must parse as an integer.
///
/// Note that `"ttt5154542"` is rejected: removing `tt` leaves `"t5154542"`.
pub fn validate_imdb_id(id: &str) -> Result<(), Status> {
    if !id.contains("tt") {
        return Err(Status::invalid_argument(INCORRECT_IMDB_ID));
    }

    id.replace("tt", "")
        .parse::<i64>()
        .map(|_| ())
        .map_err(|_| Status::invalid_argument(INCORRECT_IMDB_ID))
}

fn to_search_response(search: MovieSearch) -> SearchMovieResponse {
    SearchMovieResponse {
        results: search
            .search
            .into_iter()
            .map(|item| Search {
                title: item.title,
                year: item.year,
                imdb_id: item.imdb_id,
                poster: item.poster,
                r#type: item.kind,
            })
            .collect(),
        total: search.total_results,
    }
}

fn to_detail_response(detail: MovieDetail) -> GetMovieDetailResponse {
    GetMovieDetailResponse {
        title: detail.title,
        year: detail.year,
        rated: detail.rated,
        released: detail.released,
        runtime: detail.runtime,
        genre: detail.genre,
        director: detail.director,
        writer: detail.writer,
        actors: detail.actors,
        plot: detail.plot,
        language: detail.language,
        country: detail.country,
        awards: detail.awards,
        poster: detail.poster,
        ratings: detail
            .ratings
            .into_iter()
            .map(|rating| Rating {
                source: rating.source,
                value: rating.value,
            })
            .collect(),
        metascore: detail.metascore,
        imdb_rating: detail.imdb_rating,
        imdb_votes: detail.imdb_votes,
        imdb_id: detail.imdb_id,
        r#type: detail.kind,
        dvd: detail.dvd,
        box_office: detail.box_office,
        production: detail.production,
        website: detail.website,
    }
}
