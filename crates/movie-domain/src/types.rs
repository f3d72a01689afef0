//! Records decoded from the OMDb API.
//!
//! OMDb answers every request with HTTP 200 and a JSON object; missing
//! fields are simply left out, and a failed lookup is reported in-band
//! through the `Response` / `Error` pair. These types mirror that shape:
//! every field defaults to an empty string, and a field that is present
//! with the wrong JSON type is a decode error.

use serde::{Deserialize, Serialize};

// =============================================================================
// Search
// =============================================================================

/// One entry of the `Search` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SearchItem {
    pub title: String,
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// "movie", "series" or "episode"
    #[serde(rename = "Type")]
    pub kind: String,
    pub poster: String,
}

/// Result of a title search.
///
/// `total_results` is kept as the string OMDb sends; it is forwarded
/// verbatim and never aggregated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MovieSearch {
    pub search: Vec<SearchItem>,
    #[serde(rename = "totalResults")]
    pub total_results: String,
    pub response: String,
    pub error: String,
}

impl MovieSearch {
    /// The in-band error message, if OMDb reported one.
    pub fn embedded_error(&self) -> Option<&str> {
        non_empty(&self.error)
    }
}

// =============================================================================
// Detail
// =============================================================================

/// A single `{Source, Value}` rating pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MovieRating {
    pub source: String,
    pub value: String,
}

/// Full record for a single title, looked up by IMDb identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MovieDetail {
    pub title: String,
    pub year: String,
    pub rated: String,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub plot: String,
    pub language: String,
    pub country: String,
    pub awards: String,
    pub poster: String,
    /// Ratings in the order OMDb lists them.
    pub ratings: Vec<MovieRating>,
    pub metascore: String,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "DVD")]
    pub dvd: String,
    pub box_office: String,
    pub production: String,
    pub website: String,
    pub response: String,
    pub error: String,
}

impl MovieDetail {
    /// The in-band error message, if OMDb reported one.
    pub fn embedded_error(&self) -> Option<&str> {
        non_empty(&self.error)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}
