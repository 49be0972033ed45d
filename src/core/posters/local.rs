use async_trait::async_trait;

use super::{PosterSource, SourceOutcome};
use crate::utils::random::pick_unique_random;

/// Placeholder posters used whenever the remote catalog can't supply enough.
pub const POSTER_CANDIDATES: &[&str] = &[
    "https://via.placeholder.com/300x450/111827/ffffff?text=Latest+Movie+1",
    "https://via.placeholder.com/300x450/1f2937/ffb86b?text=Latest+Movie+2",
    "https://via.placeholder.com/300x450/0b3d91/ffffff?text=Latest+Movie+3",
    "https://via.placeholder.com/300x450/7b2cbf/ffffff?text=Latest+Movie+4",
    "https://via.placeholder.com/300x450/2a9d8f/ffffff?text=Latest+Movie+5",
    "https://via.placeholder.com/300x450/e76f51/ffffff?text=Latest+Movie+6",
    "https://via.placeholder.com/300x450/023e8a/ffffff?text=Latest+Movie+7",
    "https://via.placeholder.com/300x450/ff006e/ffffff?text=Latest+Movie+8",
    "https://via.placeholder.com/300x450/0f172a/ffffff?text=Latest+Movie+9",
    "https://via.placeholder.com/300x450/264653/ffffff?text=Latest+Movie+10",
    "https://via.placeholder.com/300x450/8ac926/ffffff?text=Latest+Movie+11",
    "https://via.placeholder.com/300x450/ffbe0b/111827?text=Latest+Movie+12",
];

/// Random unique picks from a fixed pool. Always supplies.
#[derive(Debug, Clone)]
pub struct LocalPoolSource {
    pool: Vec<String>,
}

impl LocalPoolSource {
    pub fn new(pool: Vec<String>) -> Self {
        Self { pool }
    }
}

impl Default for LocalPoolSource {
    fn default() -> Self {
        Self::new(POSTER_CANDIDATES.iter().map(|s| s.to_string()).collect())
    }
}

#[async_trait]
impl PosterSource for LocalPoolSource {
    fn name(&self) -> &'static str {
        "local pool"
    }

    async fn supply(&self, count: usize) -> SourceOutcome {
        SourceOutcome::Supplied(pick_unique_random(&self.pool, count))
    }
}
