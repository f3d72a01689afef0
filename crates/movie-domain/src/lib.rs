//! # Movie Domain Crate
//!
//! Shared records and capability traits for the movie gateway.
//!
//! ## Main Components
//!
//! - **types**: records decoded from the OMDb API (`MovieSearch`, `MovieDetail`)
//! - **traits**: `MovieRepository`, `AuditSink` and `MovieUsecase`
//!
//! Nothing in here performs I/O; the adapters live in `omdb-client` and
//! `audit-log`, the orchestration in `server`.

pub mod traits;
pub mod types;

pub use traits::{AuditSink, MovieRepository, MovieUsecase};
pub use types::{MovieDetail, MovieRating, MovieSearch, SearchItem};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_search_response() {
        let body = r#"{
            "Search": [
                {"Title": "Iron Man", "Year": "2008", "imdbID": "tt0371746", "Type": "movie", "Poster": "p1"},
                {"Title": "Iron Man 2", "Year": "2010", "imdbID": "tt1228705", "Type": "movie", "Poster": "p2"}
            ],
            "totalResults": "2",
            "Response": "True"
        }"#;

        let search: MovieSearch = serde_json::from_str(body).unwrap();

        assert_eq!(search.search.len(), 2);
        assert_eq!(search.search[0].title, "Iron Man");
        assert_eq!(search.search[0].imdb_id, "tt0371746");
        assert_eq!(search.search[1].kind, "movie");
        assert_eq!(search.total_results, "2");
        assert_eq!(search.embedded_error(), None);
    }

    #[test]
    fn test_decode_not_found_response() {
        let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;

        let search: MovieSearch = serde_json::from_str(body).unwrap();

        assert!(search.search.is_empty());
        assert_eq!(search.response, "False");
        assert_eq!(search.embedded_error(), Some("Movie not found!"));
    }

    #[test]
    fn test_decode_rejects_wrong_field_type() {
        let body = r#"{"Search": [{"Title": "title", "Poster": ["poster"]}], "Response": "True"}"#;
        assert!(serde_json::from_str::<MovieSearch>(body).is_err());

        let body = r#"{"Title": "title", "Ratings": "ratings"}"#;
        assert!(serde_json::from_str::<MovieDetail>(body).is_err());
    }

    #[test]
    fn test_decode_detail_keeps_rating_order() {
        let body = r#"{
            "Title": "Iron Man",
            "Year": "2008",
            "Rated": "PG-13",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "7.9/10"},
                {"Source": "Rotten Tomatoes", "Value": "94%"},
                {"Source": "Metacritic", "Value": "79/100"}
            ],
            "imdbRating": "7.9",
            "imdbVotes": "1,000,000",
            "imdbID": "tt0371746",
            "Type": "movie",
            "DVD": "30 Sep 2008",
            "BoxOffice": "$319,034,126",
            "Website": "N/A",
            "Response": "True"
        }"#;

        let detail: MovieDetail = serde_json::from_str(body).unwrap();

        assert_eq!(detail.rated, "PG-13");
        assert_eq!(detail.imdb_rating, "7.9");
        assert_eq!(detail.dvd, "30 Sep 2008");
        assert_eq!(detail.box_office, "$319,034,126");
        let sources: Vec<_> = detail.ratings.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, ["Internet Movie Database", "Rotten Tomatoes", "Metacritic"]);
        // Absent fields default to empty
        assert_eq!(detail.plot, "");
        assert_eq!(detail.embedded_error(), None);
    }

    #[test]
    fn test_detail_embedded_error() {
        let detail = MovieDetail {
            error: "Incorrect IMDb ID.".to_string(),
            ..Default::default()
        };
        assert_eq!(detail.embedded_error(), Some("Incorrect IMDb ID."));
    }
}
