//! Durable preference storage.
//!
//! The theme preference is one string under one fixed key, read once at
//! controller construction and written on every change. Last-write-wins is
//! the intended semantics; there are no concurrent writers within a page
//! view.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Durable key-value storage for user preferences.
pub trait PreferenceStore {
    /// Read the value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

// =============================================================================
// JSON file store
// =============================================================================

/// File name used by [`JsonFileStore::default_location`].
const STORE_FILE: &str = "preferences.json";

/// Preference store persisted as a flat JSON object in a single file.
///
/// The file is rewritten on every save; reads go through an in-memory copy
/// loaded lazily on first access.
pub struct JsonFileStore {
    path: PathBuf,
    cache: Mutex<Option<FxHashMap<String, String>>>,
}

impl JsonFileStore {
    /// Store backed by the given file (created on first save).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    /// Conventional per-user location: `<config dir>/sitelift/preferences.json`.
    pub fn default_location() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sitelift").join(STORE_FILE))
    }

    fn read_file(path: &Path) -> Result<FxHashMap<String, String>> {
        if !path.exists() {
            return Ok(FxHashMap::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("malformed preference file {}", path.display()))
    }

    fn write_file(path: &Path, entries: &FxHashMap<String, String>) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let mut cache = self.cache.lock();
        if cache.is_none() {
            *cache = Some(Self::read_file(&self.path)?);
        }
        Ok(cache
            .as_ref()
            .and_then(|entries| entries.get(key).cloned()))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut cache = self.cache.lock();
        if cache.is_none() {
            *cache = Some(Self::read_file(&self.path)?);
        }
        if let Some(entries) = cache.as_mut() {
            entries.insert(key.to_string(), value.to_string());
            Self::write_file(&self.path, entries)?;
        }
        Ok(())
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Volatile store for hosts without durable storage (and for tests).
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
