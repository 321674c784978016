//! Persistence gateway: four independently-keyed JSON files in the platform
//! config directory. Each key is loaded on its own; a corrupt or missing
//! file falls back to that key's default without touching the other three.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::catalog::{default_catalog, ContentRecord};
use crate::errors::StoreKey;
use crate::state::Prefs;

/// Everything the gateway restores at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedState {
    pub catalog: Vec<ContentRecord>,
    pub prefs: Prefs,
}

impl Default for LoadedState {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            prefs: Prefs::new(),
        }
    }
}

pub struct PersistStore {
    base_dir: PathBuf,
}

impl PersistStore {
    /// Store rooted at an explicit directory. Tests point this at a tempdir.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Store under the platform config directory, created if needed.
    pub fn open_default() -> Option<Self> {
        let proj = ProjectDirs::from("com", "aflambox", "aflambox")?;
        let dir = proj.config_dir().to_path_buf();
        fs::create_dir_all(&dir).ok()?;
        Some(Self::new(dir))
    }

    fn key_path(&self, key: StoreKey) -> PathBuf {
        self.base_dir.join(format!("{}.json", key.name()))
    }

    /// Read one key, falling back to `default` when the file is absent or
    /// malformed. Parse failures are logged and recovered, never surfaced.
    fn load_key<T: DeserializeOwned>(&self, key: StoreKey, default: T) -> T {
        let path = self.key_path(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return default, // first run: nothing persisted yet
        };
        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = %key, %err, "persisted data corrupt, using default");
                default
            }
        }
    }

    fn save_key<T: Serialize>(&self, key: StoreKey, value: &T) {
        let path = self.key_path(key);
        let result = serde_json::to_string(value)
            .map_err(anyhow::Error::from)
            .and_then(|json| fs::write(&path, json).map_err(anyhow::Error::from));
        if let Err(err) = result {
            warn!(key = %key, %err, "failed to persist key");
        }
    }

    /// Restore all four entities. Guaranteed to run before any mutation is
    /// possible; the caller applies the result wholesale.
    pub fn load(&self) -> LoadedState {
        let watchlist: HashSet<u32> = self.load_key(StoreKey::Watchlist, HashSet::new());
        let ratings: HashMap<u32, u8> = self.load_key(StoreKey::UserRatings, HashMap::new());
        let progress: HashMap<u32, f32> = self.load_key(StoreKey::WatchProgress, HashMap::new());
        let catalog: Vec<ContentRecord> =
            self.load_key(StoreKey::ContentItems, default_catalog());

        LoadedState {
            catalog,
            // from_parts re-clamps progress: the files parse as any f32.
            prefs: Prefs::from_parts(watchlist, ratings, progress),
        }
    }

    /// Write-through of all four entities. Failures are logged; in-memory
    /// state is never rolled back.
    pub fn save(&self, catalog: &[ContentRecord], prefs: &Prefs) {
        self.save_key(StoreKey::Watchlist, &prefs.watchlist);
        self.save_key(StoreKey::UserRatings, &prefs.ratings);
        self.save_key(StoreKey::WatchProgress, &prefs.progress);
        self.save_key(StoreKey::ContentItems, &catalog);
    }
}
