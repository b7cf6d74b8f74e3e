//! Schedule persistence
//!
//! The store is one JSON document mapping schedule keys to slot lists,
//! the shape the dashboard's local storage kept. [`JsonFileStore`] is
//! the durable implementation; [`MemoryStore`] backs tests and offline
//! runs. Loading sanitizes keys: a parseable non-Monday key is re-keyed
//! to its week's Monday, garbage keys are dropped — nothing downstream
//! ever pattern-matches around a malformed key.

use crate::error::{CoreError, CoreResult};
use crate::week::{parse_date, ScheduleKey};
use shared::models::ScheduleStore;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Well-known schedule document name
pub const SCHEDULES_FILE: &str = "schedules.json";

/// Boundary contract for schedule persistence
pub trait ScheduleRepository {
    /// Load the full store; a missing document is an empty store
    fn load(&self) -> CoreResult<ScheduleStore>;

    /// Durably replace the full store
    fn save(&self, store: &ScheduleStore) -> CoreResult<()>;
}

/// Single-document JSON store on the local filesystem
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the well-known document name inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SCHEDULES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScheduleRepository for JsonFileStore {
    fn load(&self) -> CoreResult<ScheduleStore> {
        if !self.path.exists() {
            return Ok(ScheduleStore::new());
        }
        let bytes = fs::read(&self.path)
            .map_err(|e| CoreError::storage(format!("Failed to read {}: {e}", self.path.display())))?;
        let raw: ScheduleStore = serde_json::from_slice(&bytes)
            .map_err(|e| CoreError::storage(format!("Corrupt schedule document: {e}")))?;
        Ok(sanitize_keys(raw))
    }

    fn save(&self, store: &ScheduleStore) -> CoreResult<()> {
        let json = serde_json::to_vec_pretty(store)
            .map_err(|e| CoreError::storage(format!("Failed to serialize schedules: {e}")))?;

        // Write-then-rename keeps a crash from truncating the document
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json)
            .map_err(|e| CoreError::storage(format!("Failed to write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            CoreError::storage(format!("Failed to replace {}: {e}", self.path.display()))
        })?;
        Ok(())
    }
}

/// In-memory store for tests and offline use
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<ScheduleStore>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial(store: ScheduleStore) -> Self {
        Self {
            inner: Mutex::new(store),
        }
    }
}

impl ScheduleRepository for MemoryStore {
    fn load(&self) -> CoreResult<ScheduleStore> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(sanitize_keys(guard.clone()))
    }

    fn save(&self, store: &ScheduleStore) -> CoreResult<()> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = store.clone();
        Ok(())
    }
}

/// Normalize every stored key to the canonical `{agent_id}_{monday}` form
fn sanitize_keys(raw: ScheduleStore) -> ScheduleStore {
    let mut clean = ScheduleStore::new();
    for (key, week) in raw.0 {
        let Some((agent_id, date_part)) = key.rsplit_once('_') else {
            tracing::warn!(%key, "Dropping schedule entry with malformed key");
            continue;
        };
        if agent_id.is_empty() {
            tracing::warn!(%key, "Dropping schedule entry with empty agent id");
            continue;
        }
        let Ok(date) = parse_date(date_part) else {
            tracing::warn!(%key, "Dropping schedule entry with unparseable date");
            continue;
        };

        let canonical = ScheduleKey::new(agent_id, date).to_string();
        if canonical != key {
            tracing::warn!(from = %key, to = %canonical, "Migrating non-Monday schedule key");
        }
        if clean.contains_key(&canonical) {
            // First writer wins on collision
            tracing::warn!(%canonical, "Duplicate schedule key after migration, keeping existing");
            continue;
        }
        clean.insert(canonical, week);
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::default_schedule;

    #[test]
    fn test_memory_store_round_trip() {
        let repo = MemoryStore::new();
        assert!(repo.load().unwrap().is_empty());

        let mut store = ScheduleStore::new();
        store.insert("A1_2024-06-03", default_schedule());
        repo.save(&store).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_sanitize_migrates_non_monday_key() {
        let mut raw = ScheduleStore::new();
        // Wednesday key, should land on the week's Monday
        raw.insert("A1_2024-06-05", default_schedule());
        let clean = sanitize_keys(raw);
        assert!(clean.contains_key("A1_2024-06-03"));
        assert!(!clean.contains_key("A1_2024-06-05"));
    }

    #[test]
    fn test_sanitize_drops_garbage_keys() {
        let mut raw = ScheduleStore::new();
        raw.insert("no-separator", vec![]);
        raw.insert("A1_notadate", vec![]);
        raw.insert("_2024-06-03", vec![]);
        raw.insert("A1_2024-06-03", default_schedule());
        let clean = sanitize_keys(raw);
        assert_eq!(clean.len(), 1);
        assert!(clean.contains_key("A1_2024-06-03"));
    }

    #[test]
    fn test_sanitize_collision_keeps_existing() {
        let mut raw = ScheduleStore::new();
        // BTreeMap iterates Monday key first; the Tuesday key migrates
        // onto it and loses
        raw.insert("A1_2024-06-03", default_schedule());
        raw.insert("A1_2024-06-04", vec![]);
        let clean = sanitize_keys(raw);
        assert_eq!(clean.len(), 1);
        assert_eq!(clean.get("A1_2024-06-03").unwrap().len(), 16);
    }
}
