//! Disk-backed cache for candle history responses.
//!
//! Keyed by request parameters; entries carry their write time and are
//! checked against a caller-supplied maximum age. Writes are plain
//! file writes, last writer wins.

use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Cache entry with its write time.
#[derive(Debug, Serialize, serde::Deserialize)]
struct CacheEntry<T> {
    data: T,
    stored_at: u64,
}

/// File-based cache.
pub struct FileCache {
    cache_dir: PathBuf,
}

impl FileCache {
    /// Create a cache rooted at `dir`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let cache_dir = dir.as_ref().to_path_buf();
        if !cache_dir.exists() {
            if let Err(e) = fs::create_dir_all(&cache_dir) {
                warn!("Failed to create cache directory: {}", e);
            }
        }
        Self { cache_dir }
    }

    /// Cache file path for a key.
    fn entry_path(&self, key: &str) -> PathBuf {
        // Sanitize key for the filesystem
        let safe_key = key.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_");
        self.cache_dir.join(format!("{}.json", safe_key))
    }

    /// Get a value if present and younger than `max_age`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, max_age: Duration) -> Option<T> {
        let path = self.entry_path(key);

        let content = fs::read_to_string(&path).ok()?;
        let entry: CacheEntry<T> = match serde_json::from_str(&content) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to parse cache entry {}: {}", key, e);
                return None;
            }
        };

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        if now.saturating_sub(entry.stored_at) > max_age.as_secs() {
            debug!("Cache entry {} expired", key);
            return None;
        }

        Some(entry.data)
    }

    /// Store a value under `key`.
    pub fn set<T: Serialize>(&self, key: &str, data: &T) {
        let path = self.entry_path(key);

        let stored_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let entry = CacheEntry { data, stored_at };

        match serde_json::to_string(&entry) {
            Ok(content) => {
                if let Err(e) = fs::write(&path, content) {
                    warn!("Failed to write cache {}: {}", key, e);
                } else {
                    debug!("Cached {} to disk", key);
                }
            }
            Err(e) => {
                warn!("Failed to serialize cache {}: {}", key, e);
            }
        }
    }

    /// Drop a cache entry.
    pub fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.entry_path(key));
    }
}
