//! Short-TTL JSON file cache for fetch results.
//!
//! One file per brief under the cache directory, keyed by a hash of
//! brand, window, and competitor set. Corrupt or stale entries are treated
//! as misses; write failures are logged and otherwise ignored.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use flash_core::{Mention, MonitorBrief};

pub struct FetchCache {
    dir: PathBuf,
    ttl: chrono::Duration,
}

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    fetched_at: DateTime<Utc>,
    mentions: Vec<Mention>,
}

impl FetchCache {
    #[must_use]
    pub fn new(dir: &Path, ttl_minutes: u64) -> Self {
        Self {
            dir: dir.to_path_buf(),
            ttl: chrono::Duration::minutes(i64::try_from(ttl_minutes).unwrap_or(15)),
        }
    }

    /// Return the cached mentions for this brief if a fresh entry exists.
    #[must_use]
    pub fn get(&self, brief: &MonitorBrief, now: DateTime<Utc>) -> Option<Vec<Mention>> {
        let path = self.path_for(brief);
        let raw = std::fs::read_to_string(&path).ok()?;
        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "corrupt cache entry ignored");
                return None;
            }
        };
        if now - entry.fetched_at > self.ttl {
            return None;
        }
        Some(entry.mentions)
    }

    /// Store the mentions for this brief. Best effort: failures are logged.
    pub fn put(&self, brief: &MonitorBrief, mentions: &[Mention], now: DateTime<Utc>) {
        let entry = CacheEntry {
            fetched_at: now,
            mentions: mentions.to_vec(),
        };
        let path = self.path_for(brief);
        let result = std::fs::create_dir_all(&self.dir)
            .map_err(|e| e.to_string())
            .and_then(|()| serde_json::to_string(&entry).map_err(|e| e.to_string()))
            .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));
        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "cache write failed");
        }
    }

    fn path_for(&self, brief: &MonitorBrief) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(brief)))
    }
}

fn cache_key(brief: &MonitorBrief) -> String {
    let mut competitors: Vec<String> = brief
        .competitors
        .iter()
        .map(|c| c.to_lowercase())
        .collect();
    competitors.sort();
    let raw = format!(
        "{}|{}|{}",
        brief.brand.to_lowercase(),
        brief.lookback_hours,
        competitors.join(",")
    );
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}
