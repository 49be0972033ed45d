use std::collections::HashSet;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{PosterSource, SourceOutcome};
use crate::utils::Error;

/// List endpoints queried for posters, in order.
pub const POSTER_ENDPOINTS: &[&str] = &["movie/now_playing", "movie/popular", "movie/top_rated"];

/// Remote results are accepted only if they hold at least this many posters
/// (or the requested count, when smaller).
pub const MIN_ACCEPTED_REMOTE: usize = 4;

#[derive(Debug, Clone)]
pub struct TmdbClient {
    base_url: String,
    api_key: String,
    language: String,
    image_base: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(base_url: String, api_key: String, language: String, image_base: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            language,
            image_base: image_base.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn image_url(&self, poster_path: &str) -> String {
        format!("{}/{}", self.image_base, poster_path.trim_start_matches('/'))
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path);
        let resp = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
                ("page", "1"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Other(format!(
                "TMDB request failed: HTTP {status} body={body}"
            )));
        }

        Ok(resp.json::<T>().await?)
    }

    pub async fn movie_list(&self, endpoint: &str) -> Result<MovieListResponse, Error> {
        self.get_json(endpoint).await
    }

    /// Unique poster URLs gathered across [`POSTER_ENDPOINTS`] until
    /// `min_count` are found. Failing endpoints are skipped, so total failure
    /// gives an empty list.
    pub async fn fetch_posters(&self, min_count: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for endpoint in POSTER_ENDPOINTS {
            if urls.len() >= min_count {
                break;
            }
            let page = match self.movie_list(endpoint).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(target: "reelview::posters", endpoint = %endpoint, "Skipping TMDB endpoint: {e}");
                    continue;
                }
            };
            debug!(target: "reelview::posters", endpoint = %endpoint, results = page.results.len(), "TMDB page fetched");

            for poster_path in page.results.iter().filter_map(|m| m.poster_path.as_deref()) {
                let url = self.image_url(poster_path);
                if seen.insert(url.clone()) {
                    urls.push(url);
                }
            }
        }

        urls.truncate(min_count);
        urls
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieListResponse {
    #[serde(default)]
    pub results: Vec<MovieResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieResult {
    pub poster_path: Option<String>,
}

pub struct TmdbPosterSource {
    client: TmdbClient,
}

impl TmdbPosterSource {
    pub fn new(client: TmdbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PosterSource for TmdbPosterSource {
    fn name(&self) -> &'static str {
        "TMDB"
    }

    async fn supply(&self, count: usize) -> SourceOutcome {
        let urls = self.client.fetch_posters(count).await;
        if urls.len() >= count.min(MIN_ACCEPTED_REMOTE) {
            SourceOutcome::Supplied(urls)
        } else {
            info!(target: "reelview::posters", found = urls.len(), requested = count, "Not enough TMDB posters, discarding");
            SourceOutcome::Unavailable
        }
    }
}
