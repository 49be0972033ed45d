pub mod file;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::utils::Error;

pub use file::FileStorage;

/// Key-value capability backing the review store, the local analogue of a
/// browser's `localStorage`.
pub trait KeyValueStorage: Send + Sync {
    /// Raw value under `key`, `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Overwrite `key` with `value`.
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
}

/// Process-local storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let lock = self
            .data
            .read()
            .map_err(|e| Error::Other(format!("Memory storage lock poisoned: {e}")))?;
        Ok(lock.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut lock = self
            .data
            .write()
            .map_err(|e| Error::Other(format!("Memory storage lock poisoned: {e}")))?;
        lock.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
