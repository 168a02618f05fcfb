use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetails, SearchResult},
};

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        image_base_url: String,
        rps: u32,
    ) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("no TMDB_API_KEY provided, movie searches will be rejected upstream");
        }

        let rps = NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_second(rps)));
        Self { client, api_key, base_url, image_base_url, limiter }
    }

    pub async fn search_by_title(&self, title: &str) -> AppResult<Vec<SearchResult>> {
        self.limiter.until_ready().await;

        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let resp: SearchResponse = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let results: Vec<SearchResult> = resp
            .results
            .into_iter()
            .map(|m| SearchResult {
                id: m.id,
                title: m.title,
                release_date: m.release_date.unwrap_or_default(),
            })
            .collect();

        debug!(query = %title, count = results.len(), "searched TMDB");
        Ok(results)
    }

    pub async fn fetch_details(&self, external_id: i64) -> AppResult<MovieDetails> {
        self.limiter.until_ready().await;

        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), external_id);
        let resp: DetailsResponse = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let overview = resp
            .overview
            .ok_or_else(|| AppError::Data(format!("movie {external_id} has no overview")))?;
        let backdrop_path = resp
            .backdrop_path
            .ok_or_else(|| AppError::Data(format!("movie {external_id} has no backdrop image")))?;

        debug!(external_id = external_id, "fetched TMDB details");
        Ok(MovieDetails { overview, backdrop_path })
    }

    pub fn image_url(&self, path: &str) -> String {
        format!("{}/{}", self.image_base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchMovie>,
}

#[derive(Debug, Deserialize)]
struct SearchMovie {
    id: i64,
    title: String,
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    overview: Option<String>,
    backdrop_path: Option<String>,
}
