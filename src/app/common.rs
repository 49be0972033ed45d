use std::str::FromStr;

use tracing::Level;

use crate::core::reviews::ReviewStore;
use crate::core::storage::FileStorage;
use crate::utils::Error;

pub fn init_logging(config: &crate::config::Config) {
    tracing_subscriber::fmt()
        .with_max_level(Level::from_str(&config.logs.level).unwrap_or(Level::INFO))
        .init();
}

/// Review store over the configured storage directory, created if missing.
pub fn open_review_store(config: &crate::config::Config) -> Result<ReviewStore, Error> {
    let storage = FileStorage::open(&config.storage.dir)?;
    tracing::debug!(
        "Review storage: '{}' key='{}'",
        storage.root().display(),
        config.storage.key
    );
    Ok(ReviewStore::with_key(Box::new(storage), config.storage.key.clone()))
}
