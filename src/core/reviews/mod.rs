use tracing::{debug, warn};

use crate::core::storage::KeyValueStorage;
use crate::models::{Review, ReviewCollection};
use crate::utils::Error;

/// Storage key holding the whole review collection.
pub const REVIEWS_KEY: &str = "movie_reviews_v1";

/// What was found under the reviews key.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Nothing stored yet (absent key or JSON `null`).
    Missing,
    Loaded(ReviewCollection),
    /// Stored content could not be read back as a collection.
    Corrupt { reason: String },
    /// The storage backend failed to read; stored content is unknown.
    Unreadable { reason: String },
}

impl LoadOutcome {
    /// Fail-open recovery: anything but a loaded collection becomes empty.
    pub fn into_collection(self) -> ReviewCollection {
        match self {
            LoadOutcome::Loaded(collection) => collection,
            LoadOutcome::Missing
            | LoadOutcome::Corrupt { .. }
            | LoadOutcome::Unreadable { .. } => ReviewCollection::new(),
        }
    }
}

pub struct ReviewStore {
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl ReviewStore {
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, REVIEWS_KEY)
    }

    pub fn with_key(storage: Box<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn load_checked(&self) -> LoadOutcome {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::Missing,
            Err(e) => {
                return LoadOutcome::Unreadable {
                    reason: e.to_string(),
                }
            }
        };

        match serde_json::from_str::<Option<ReviewCollection>>(&raw) {
            Ok(Some(collection)) => LoadOutcome::Loaded(collection),
            Ok(None) => LoadOutcome::Missing,
            Err(e) => LoadOutcome::Corrupt {
                reason: e.to_string(),
            },
        }
    }

    /// Current collection; unreadable content is logged and treated as empty.
    pub fn load(&self) -> ReviewCollection {
        let outcome = self.load_checked();
        match &outcome {
            LoadOutcome::Corrupt { reason } => {
                warn!("Stored reviews under '{}' are corrupt, starting empty: {reason}", self.key);
            }
            LoadOutcome::Unreadable { reason } => {
                warn!("Failed to read stored reviews under '{}', showing none: {reason}", self.key);
            }
            _ => {}
        }
        outcome.into_collection()
    }

    /// Overwrite the stored collection. Last writer wins.
    pub fn save(&self, collection: &ReviewCollection) -> Result<(), Error> {
        let raw = serde_json::to_string(collection)?;
        self.storage.set(&self.key, &raw)
    }

    /// Load, append `review` to the end of `movie_id`'s list, save.
    /// Corrupt content is replaced; a failed read aborts without writing.
    pub fn append(&self, movie_id: &str, review: Review) -> Result<(), Error> {
        let mut collection = match self.load_checked() {
            LoadOutcome::Unreadable { reason } => {
                return Err(Error::StorageUnreadable(reason));
            }
            LoadOutcome::Corrupt { reason } => {
                warn!("Replacing corrupt reviews under '{}': {reason}", self.key);
                ReviewCollection::new()
            }
            outcome => outcome.into_collection(),
        };
        collection.push(movie_id, review);
        self.save(&collection)?;
        debug!(
            "Stored review for '{}' ({} total)",
            movie_id,
            collection.reviews_for(movie_id).len()
        );
        Ok(())
    }

    pub fn reviews_for(&self, movie_id: &str) -> Vec<Review> {
        self.load().reviews_for(movie_id).to_vec()
    }
}
