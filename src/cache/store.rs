// Cache store for recent-activity results.
// One JSON document maps composite keys to timestamped event lists; entries
// older than the TTL are treated as absent even if physically present.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::github::ActivityEvent;

/// Entries older than this are stale and must be refetched.
pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// One cached fetch result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// When the data was captured.
    pub time: DateTime<Utc>,
    /// The events captured, most recent first.
    pub data: Vec<ActivityEvent>,
}

impl CacheEntry {
    /// Create an entry capturing the given events now.
    pub fn new(data: Vec<ActivityEvent>) -> Self {
        Self {
            time: Utc::now(),
            data,
        }
    }

    /// Check if this entry has outlived the TTL.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.time)
            .to_std()
            .unwrap_or(Duration::MAX);

        elapsed >= ttl
    }
}

/// Derive the cache key for one parameter combination, so different
/// parameters for the same user never collide.
pub fn cache_key(username: &str, days: i64, max_events: usize) -> String {
    format!("{}_{}_{}", username, days, max_events)
}

/// Whole-file cache store. The full map is loaded up front and written back
/// on every `put`. Without a resolvable path the store is memory-only for
/// the run.
#[derive(Debug)]
pub struct CacheStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, CacheEntry>,
}

impl CacheStore {
    /// Open the store at the platform cache location.
    pub fn open() -> Self {
        match super::paths::cache_file() {
            Some(path) => Self::open_at(path),
            None => {
                log::warn!("no cache directory available, caching disabled for this run");
                Self {
                    path: None,
                    entries: BTreeMap::new(),
                }
            }
        }
    }

    /// Open a store backed by a specific file. A missing file is an empty
    /// cache; an unreadable or corrupt file degrades to empty with a
    /// warning.
    pub fn open_at(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(err) => {
                    log::warn!("ignoring corrupt cache file {}: {}", path.display(), err);
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                log::warn!("could not read cache file {}: {}", path.display(), err);
                BTreeMap::new()
            }
        };

        Self {
            path: Some(path),
            entries,
        }
    }

    /// Look up a fresh entry. Expired entries are treated as absent.
    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(CACHE_TTL))
    }

    /// Upsert an entry and persist the whole map.
    pub fn put(&mut self, key: String, entry: CacheEntry) -> Result<()> {
        self.entries.insert(key, entry);
        self.save()
    }

    /// Serialize the map back to disk, atomically via a temp file.
    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;

        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }
}
