pub mod local;
pub mod tmdb;

use async_trait::async_trait;
use tracing::{debug, info};

pub use local::{LocalPoolSource, POSTER_CANDIDATES};
pub use tmdb::{TmdbClient, TmdbPosterSource};

/// Result of asking one source for posters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Supplied(Vec<String>),
    Unavailable,
}

#[async_trait]
pub trait PosterSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn supply(&self, count: usize) -> SourceOutcome;
}

/// Poster sources tried in priority order; the first one that supplies wins.
pub struct PosterSupplier {
    sources: Vec<Box<dyn PosterSource>>,
}

impl PosterSupplier {
    pub fn new(sources: Vec<Box<dyn PosterSource>>) -> Self {
        Self { sources }
    }

    /// TMDB first when an API key is configured, then the local pool.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let mut sources: Vec<Box<dyn PosterSource>> = Vec::new();

        if let Some(api_key) = config.tmdb.api_key() {
            let client = TmdbClient::new(
                config.tmdb.base_url.clone(),
                api_key.to_string(),
                config.tmdb.language.clone(),
                config.tmdb.image_base.clone(),
            );
            sources.push(Box::new(TmdbPosterSource::new(client)));
        } else {
            debug!("No TMDB api key configured, using local posters only");
        }

        sources.push(Box::new(LocalPoolSource::default()));
        Self::new(sources)
    }

    pub fn local_only() -> Self {
        Self::new(vec![Box::new(LocalPoolSource::default())])
    }

    /// Up to `count` poster URLs from the first source able to supply them.
    pub async fn supply_poster_urls(&self, count: usize) -> Vec<String> {
        for source in &self.sources {
            match source.supply(count).await {
                SourceOutcome::Supplied(urls) => {
                    info!("Using {} poster(s) from {}", urls.len(), source.name());
                    return urls;
                }
                SourceOutcome::Unavailable => {
                    debug!("Poster source {} unavailable, trying next", source.name());
                }
            }
        }
        Vec::new()
    }
}
