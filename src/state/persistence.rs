use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tier::Collection;

/// Errors that can occur during state persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize state: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to write state: {0}")]
    WriteError(#[from] std::io::Error),

    /// The storage backend (e.g. browser local storage) rejected the call
    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Invalid state data: {0}")]
    InvalidState(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Whether the board survives a restart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPolicy {
    /// Reload the last snapshot at startup
    #[default]
    Persist,
    /// Start empty and wipe the snapshot slot when the app exits
    ClearOnExit,
}

/// String key/value storage, modelled on browser local storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()>;
    fn remove(&mut self, key: &str) -> PersistenceResult<()>;
}

/// Serialize `collection` into `key`
pub fn save_collection(
    store: &mut dyn KeyValueStore,
    key: &str,
    collection: &Collection,
) -> PersistenceResult<()> {
    let json = serde_json::to_string(collection)?;
    store.set(key, &json)
}

/// Load and validate the collection stored under `key`.
///
/// `Ok(None)` means nothing was stored. A snapshot whose containers differ from
/// `expected` or that holds a placement id twice is rejected as invalid.
pub fn load_collection(
    store: &dyn KeyValueStore,
    key: &str,
    expected: &Collection,
) -> PersistenceResult<Option<Collection>> {
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    let collection: Collection = serde_json::from_str(&json)?;
    if !collection.same_layout(expected) {
        return Err(PersistenceError::InvalidState(
            "container set does not match".to_owned(),
        ));
    }
    if !collection.has_unique_placements() {
        return Err(PersistenceError::InvalidState(
            "duplicate placement ids".to_owned(),
        ));
    }
    Ok(Some(collection))
}

/// In-memory store. Clones share the same backing map, so a test can keep a
/// handle while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set`/`remove` calls so far
    pub fn writes(&self) -> usize {
        self.inner.lock().writes
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.lock().values.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.inner.lock().values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        let mut inner = self.inner.lock();
        inner.values.insert(key.to_owned(), value.to_owned());
        inner.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistenceResult<()> {
        let mut inner = self.inner.lock();
        inner.values.remove(key);
        inner.writes += 1;
        Ok(())
    }
}

/// Browser local storage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn open() -> Self {
        Self
    }

    fn storage() -> PersistenceResult<web_sys::Storage> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| PersistenceError::BackendError("local storage unavailable".to_owned()))
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| PersistenceError::BackendError(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| PersistenceError::BackendError(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> PersistenceResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| PersistenceError::BackendError(format!("{e:?}")))
    }
}

/// One file per key under the user's data directory
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct LocalStore {
    state_dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl LocalStore {
    /// Store under `<data dir>/movie-tier-list`, falling back to the working
    /// directory when the platform has no data dir
    pub fn open() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
        Self::in_dir(base.join("movie-tier-list"))
    }

    pub fn in_dir(state_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    fn path(&self, key: &str) -> std::path::PathBuf {
        self.state_dir.join(format!("{key}.json"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        std::fs::create_dir_all(&self.state_dir)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistenceResult<()> {
        match std::fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
