//! Storage seam for the daily cache.

use crate::cache::key::CacheKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("Cache lock poisoned: {0}")]
    Poisoned(String),
    #[error("Failed to encode cached value: {0}")]
    Encode(String),
    #[error("Cache key {key} is not current for {today}")]
    NotCurrent { key: String, today: NaiveDate },
}

/// A memoized computation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub key: CacheKey,
    pub value: serde_json::Value,
    pub created_at_local_date: NaiveDate,
}

/// Where cache entries live.
///
/// Implementations only store and fetch; freshness is decided by the
/// caller. Writes are last-writer-wins.
pub trait CacheBackend: Send + Sync {
    fn load(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError>;

    fn store(&self, entry: CacheEntry) -> Result<(), CacheError>;

    /// Returns whether an entry was present.
    fn remove(&self, key: &CacheKey) -> Result<bool, CacheError>;

    fn clear(&self) -> Result<(), CacheError>;

    /// Keep only entries matching `keep`; returns how many were dropped.
    fn retain(&self, keep: &dyn Fn(&CacheEntry) -> bool) -> Result<usize, CacheError>;

    fn len(&self) -> Result<usize, CacheError>;
}

/// In-process backend over a shared `HashMap`. Clones share storage.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<HashMap<CacheKey, CacheEntry>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> CacheError {
    CacheError::Poisoned("memory backend".to_string())
}

impl CacheBackend for MemoryBackend {
    fn load(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn store(&self, entry: CacheEntry) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(entry.key.clone(), entry);
        Ok(())
    }

    fn remove(&self, key: &CacheKey) -> Result<bool, CacheError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        Ok(entries.remove(key).is_some())
    }

    fn clear(&self) -> Result<(), CacheError> {
        self.entries.write().map_err(poisoned)?.clear();
        Ok(())
    }

    fn retain(&self, keep: &dyn Fn(&CacheEntry) -> bool) -> Result<usize, CacheError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        let before = entries.len();
        entries.retain(|_, entry| keep(entry));
        Ok(before - entries.len())
    }

    fn len(&self) -> Result<usize, CacheError> {
        Ok(self.entries.read().map_err(poisoned)?.len())
    }
}
