//! Single-slot introspection cache with disk persistence.

use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::observability::metrics;

/// How long a cached introspection response stays live: 30 days.
pub const INTROSPECTION_TTL_MS: u64 = 30 * 24 * 60 * 60 * 1000;

/// On-disk mirror of the cache slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Epoch milliseconds at which the payload was stored.
    pub timestamp: u64,
    /// The cached GraphQL response, opaque to the proxy.
    pub data: Value,
}

#[derive(Debug)]
struct CacheEntry {
    payload: Value,
    stored_at_ms: u64,
}

/// A single-slot cache for the upstream's introspection response.
///
/// The slot is shared lock-free across request tasks; `put` fully overwrites,
/// so concurrent writers can only race toward the same idempotent content
/// (last writer wins). Stale entries are ignored by `get`, never pruned.
pub struct IntrospectionCache {
    slot: ArcSwapOption<CacheEntry>,
    snapshot_path: Option<PathBuf>,
}

impl IntrospectionCache {
    /// Create an empty cache that persists to `snapshot_path` on `put`.
    pub fn new(snapshot_path: Option<PathBuf>) -> Self {
        Self {
            slot: ArcSwapOption::empty(),
            snapshot_path,
        }
    }

    /// Create a cache primed from the snapshot file, if one is present,
    /// parseable, and younger than the TTL. Every failure mode degrades to an
    /// empty cache; startup never fails on cache state.
    pub fn load(snapshot_path: PathBuf) -> Self {
        let cache = Self::new(Some(snapshot_path.clone()));
        match read_snapshot(&snapshot_path, epoch_ms()) {
            Some(entry) => {
                tracing::info!(
                    path = %snapshot_path.display(),
                    stored_at_ms = entry.stored_at_ms,
                    "Loaded introspection cache snapshot"
                );
                cache.slot.store(Some(Arc::new(entry)));
            }
            None => {
                tracing::debug!(
                    path = %snapshot_path.display(),
                    "No usable introspection cache snapshot, starting empty"
                );
            }
        }
        cache
    }

    /// Return the cached payload while it is younger than the TTL.
    pub fn get(&self) -> Option<Value> {
        self.get_at(epoch_ms())
    }

    /// Store `payload` as the new slot content and best-effort persist it.
    pub fn put(&self, payload: Value) {
        self.put_at(payload, epoch_ms());
    }

    fn get_at(&self, now_ms: u64) -> Option<Value> {
        let entry = self.slot.load_full()?;
        if now_ms.saturating_sub(entry.stored_at_ms) < INTROSPECTION_TTL_MS {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    fn put_at(&self, payload: Value, now_ms: u64) {
        self.slot.store(Some(Arc::new(CacheEntry {
            payload: payload.clone(),
            stored_at_ms: now_ms,
        })));
        metrics::record_cache_store();

        // Memory is authoritative; a failed snapshot write only costs us a
        // refetch after the next restart.
        if let Some(path) = &self.snapshot_path {
            if let Err(e) = write_snapshot(path, now_ms, &payload) {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to persist introspection cache snapshot"
                );
            }
        }
    }
}

fn read_snapshot(path: &Path, now_ms: u64) -> Option<CacheEntry> {
    let file = File::open(path).ok()?;
    let snapshot: CacheSnapshot = serde_json::from_reader(BufReader::new(file)).ok()?;
    if now_ms.saturating_sub(snapshot.timestamp) >= INTROSPECTION_TTL_MS {
        return None;
    }
    Some(CacheEntry {
        payload: snapshot.data,
        stored_at_ms: snapshot.timestamp,
    })
}

fn write_snapshot(path: &Path, timestamp: u64, data: &Value) -> std::io::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let snapshot = CacheSnapshot {
        timestamp,
        data: data.clone(),
    };
    serde_json::to_writer(writer, &snapshot)?;
    Ok(())
}

fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_snapshot(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tmdb-proxy-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn round_trip_within_ttl() {
        let cache = IntrospectionCache::new(None);
        assert!(cache.get().is_none());

        let payload = json!({"data": {"__schema": {"types": []}}});
        cache.put(payload.clone());
        assert_eq!(cache.get(), Some(payload));
    }

    #[test]
    fn entry_expires_after_ttl() {
        let cache = IntrospectionCache::new(None);
        let payload = json!({"data": {"__schema": {}}});

        let t0 = 1_000_000;
        cache.put_at(payload.clone(), t0);

        assert_eq!(cache.get_at(t0 + INTROSPECTION_TTL_MS - 1), Some(payload));
        assert!(cache.get_at(t0 + INTROSPECTION_TTL_MS).is_none());
        assert!(cache.get_at(t0 + INTROSPECTION_TTL_MS + 1).is_none());
    }

    #[test]
    fn put_overwrites_previous_entry() {
        let cache = IntrospectionCache::new(None);
        cache.put(json!({"data": 1}));
        cache.put(json!({"data": 2}));
        assert_eq!(cache.get(), Some(json!({"data": 2})));
    }

    #[test]
    fn snapshot_round_trip() {
        let path = temp_snapshot("round-trip");
        let payload = json!({"data": {"__schema": {"queryType": {"name": "Query"}}}});

        let cache = IntrospectionCache::new(Some(path.clone()));
        cache.put(payload.clone());

        let reloaded = IntrospectionCache::load(path.clone());
        assert_eq!(reloaded.get(), Some(payload));

        std::fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn stale_snapshot_starts_empty() {
        let path = temp_snapshot("stale");
        let snapshot = CacheSnapshot {
            timestamp: epoch_ms() - INTROSPECTION_TTL_MS - 1,
            data: json!({"data": {"__schema": {}}}),
        };
        let file = File::create(&path).unwrap();
        serde_json::to_writer(BufWriter::new(file), &snapshot).unwrap();

        let cache = IntrospectionCache::load(path.clone());
        assert!(cache.get().is_none());

        std::fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn missing_snapshot_starts_empty() {
        let cache = IntrospectionCache::load(temp_snapshot("does-not-exist"));
        assert!(cache.get().is_none());
    }

    #[test]
    fn malformed_snapshot_starts_empty() {
        let path = temp_snapshot("malformed");
        std::fs::write(&path, b"not json at all").unwrap();

        let cache = IntrospectionCache::load(path.clone());
        assert!(cache.get().is_none());

        std::fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn persistence_failure_keeps_memory_authoritative() {
        // A directory that cannot exist as a file parent.
        let path = PathBuf::from("/nonexistent-dir/introspection-cache.json");
        let cache = IntrospectionCache::new(Some(path));

        let payload = json!({"data": {"__schema": {}}});
        cache.put(payload.clone());
        assert_eq!(cache.get(), Some(payload));
    }
}
