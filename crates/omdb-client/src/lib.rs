//! HTTP client for the OMDb movie API.
//!
//! This crate provides the outbound adapter of the gateway. It handles:
//! - Building the `apikey` / `s` / `i` / `page` query for each lookup
//! - Sending the GET request and reading the whole body
//! - Turning HTTP failures (status >= 400) into errors
//! - Decoding the JSON body into `movie_domain` records
//!
//! There is deliberately no retry, caching or custom timeout here; a failed
//! call is logged and handed back to the caller unchanged.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, warn};

use movie_domain::{MovieDetail, MovieRepository, MovieSearch};

/// Public OMDb endpoint, used when no other base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com";

/// Errors that can occur when talking to OMDb
#[derive(Error, Debug)]
pub enum OmdbError {
    #[error("Invalid OMDb base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to reach OMDb: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to read OMDb response body: {0}")]
    Body(#[source] reqwest::Error),

    /// OMDb answered with a status >= 400. The body is not inspected.
    #[error("OMDb request failed with status {status}")]
    RequestFailed { status: u16 },

    #[error("Malformed OMDb response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Connection settings for [`OmdbClient`].
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    pub base_url: String,
    pub api_key: String,
}

impl OmdbConfig {
    /// Settings for the public endpoint with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the client somewhere else (a proxy, or a mock server in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Client for the OMDb API.
///
/// Cheap to share behind an `Arc`; the inner `reqwest::Client` pools
/// connections.
pub struct OmdbClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl OmdbClient {
    /// Build a client from its configuration.
    ///
    /// # Returns
    /// `OmdbError::InvalidBaseUrl` if `config.base_url` is not an absolute URL
    pub fn new(config: OmdbConfig) -> Result<Self, OmdbError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| OmdbError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(OmdbError::InvalidBaseUrl {
                url: config.base_url,
                reason: "not a base URL".into(),
            });
        }

        Ok(Self {
            http: Client::new(),
            base_url,
            api_key: config.api_key,
        })
    }

    /// Search titles.
    ///
    /// # Arguments
    /// * `title` - Search phrase, already form-encoded (`"iron+man"`); it is
    ///   placed into the query string as-is
    /// * `page` - 1-based result page
    pub async fn search(&self, title: &str, page: u32) -> Result<MovieSearch, OmdbError> {
        debug!("Searching OMDb for '{}' (page {})", title, page);
        let query = format!("apikey={}&s={}&page={}", encode(&self.api_key), title, page);
        self.fetch(&query).await
    }

    /// Look up a single title by IMDb identifier.
    pub async fn get_detail(&self, id: &str) -> Result<MovieDetail, OmdbError> {
        debug!("Fetching OMDb detail for {}", id);
        let query = format!("apikey={}&i={}", encode(&self.api_key), encode(id));
        self.fetch(&query).await
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(Some(query));
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, query: &str) -> Result<T, OmdbError> {
        let url = self.endpoint(query);

        // reqwest errors carry the URL, which carries the API key.
        let response = self.http.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            error!("OMDb request failed: {}", e);
            OmdbError::Transport(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            let e = e.without_url();
            error!("Failed to read OMDb response body: {}", e);
            OmdbError::Body(e)
        })?;

        if status.as_u16() >= 400 {
            warn!("OMDb responded with status {}", status);
            return Err(OmdbError::RequestFailed {
                status: status.as_u16(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            warn!("Malformed OMDb response: {}", e);
            OmdbError::Decode(e)
        })
    }
}

#[async_trait]
impl MovieRepository for OmdbClient {
    async fn search_movies(&self, title: &str, page: u32) -> anyhow::Result<MovieSearch> {
        Ok(self.search(title, page).await?)
    }

    async fn get_movie_detail(&self, id: &str) -> anyhow::Result<MovieDetail> {
        Ok(self.get_detail(id).await?)
    }
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
