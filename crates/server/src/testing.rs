//! Test fixtures shared by the handler, interceptor and gateway tests.

use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use movie_domain::{MovieDetail, MovieRating, MovieSearch, MovieUsecase, SearchItem};

/// Scripted use case that records every call it receives
pub struct FakeUsecase {
    search_result: std::result::Result<MovieSearch, String>,
    detail_result: std::result::Result<MovieDetail, String>,
    fail_log: bool,
    search_calls: Mutex<Vec<(String, u32)>>,
    detail_calls: Mutex<Vec<String>>,
    logs: Mutex<Vec<String>>,
}

impl Default for FakeUsecase {
    fn default() -> Self {
        Self {
            search_result: Ok(MovieSearch::default()),
            detail_result: Ok(MovieDetail::default()),
            fail_log: false,
            search_calls: Mutex::new(Vec::new()),
            detail_calls: Mutex::new(Vec::new()),
            logs: Mutex::new(Vec::new()),
        }
    }
}

impl FakeUsecase {
    pub fn searching(result: MovieSearch) -> Self {
        Self {
            search_result: Ok(result),
            ..Default::default()
        }
    }

    pub fn detailing(detail: MovieDetail) -> Self {
        Self {
            detail_result: Ok(detail),
            ..Default::default()
        }
    }

    /// Every lookup fails as if OMDb was unreachable
    pub fn failing(message: &str) -> Self {
        Self {
            search_result: Err(message.to_string()),
            detail_result: Err(message.to_string()),
            ..Default::default()
        }
    }

    pub fn with_failing_log(mut self) -> Self {
        self.fail_log = true;
        self
    }

    pub fn search_calls(&self) -> Vec<(String, u32)> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }

    pub fn logs(&self) -> Vec<String> {
        self.logs.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieUsecase for FakeUsecase {
    async fn search_movies(&self, title: &str, page: u32) -> Result<MovieSearch> {
        self.search_calls
            .lock()
            .unwrap()
            .push((title.to_string(), page));
        self.search_result.clone().map_err(|e| anyhow!(e))
    }

    async fn get_movie_detail(&self, id: &str) -> Result<MovieDetail> {
        self.detail_calls.lock().unwrap().push(id.to_string());
        self.detail_result.clone().map_err(|e| anyhow!(e))
    }

    fn log(&self, record: String) -> Result<()> {
        if self.fail_log {
            bail!("audit queue is full");
        }
        self.logs.lock().unwrap().push(record);
        Ok(())
    }
}

/// Two-item search result, as OMDb returns it for "ironman"
pub fn two_results() -> MovieSearch {
    MovieSearch {
        search: vec![
            SearchItem {
                title: "Iron Man".into(),
                year: "2008".into(),
                imdb_id: "tt0371746".into(),
                kind: "movie".into(),
                poster: "poster1".into(),
            },
            SearchItem {
                title: "Captain America".into(),
                year: "2011".into(),
                imdb_id: "tt0458339".into(),
                kind: "movie".into(),
                poster: "poster2".into(),
            },
        ],
        total_results: "2".into(),
        response: "True".into(),
        error: String::new(),
    }
}

/// A detail record with every field set and a single rating
pub fn iron_man_detail() -> MovieDetail {
    MovieDetail {
        title: "Iron Man".into(),
        year: "2008".into(),
        rated: "PG-13".into(),
        released: "02 May 2008".into(),
        runtime: "126 min".into(),
        genre: "Action, Adventure, Sci-Fi".into(),
        director: "Jon Favreau".into(),
        writer: "Mark Fergus".into(),
        actors: "Robert Downey Jr.".into(),
        plot: "After being held captive...".into(),
        language: "English".into(),
        country: "United States".into(),
        awards: "Nominated for 2 Oscars".into(),
        poster: "poster".into(),
        ratings: vec![MovieRating {
            source: "Internet Movie Database".into(),
            value: "7.9/10".into(),
        }],
        metascore: "79".into(),
        imdb_rating: "7.9".into(),
        imdb_votes: "1,000,000".into(),
        imdb_id: "tt1234567".into(),
        kind: "movie".into(),
        dvd: "30 Sep 2008".into(),
        box_office: "$319,034,126".into(),
        production: "Paramount".into(),
        website: "https://www.marvel.com".into(),
        response: "True".into(),
        error: String::new(),
    }
}
