//! Daily-bucketed memoization over a [`CacheBackend`].
//!
//! An entry is fresh only while the caller's local date equals the date it
//! was created for and its key carries the running [`SCHEMA_VERSION`].
//! Anything else reads as a miss; nothing has to be deleted for that to
//! hold. Backend failures also read as misses, so a broken cache degrades
//! to recomputing every time.

use crate::cache::backend::{CacheBackend, CacheEntry, CacheError, MemoryBackend};
use crate::cache::key::{CacheKey, SCHEMA_VERSION};
use chrono::NaiveDate;
use selene_config::CacheSettings;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

pub struct DailyCache<B: CacheBackend = MemoryBackend> {
    backend: B,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    stores: AtomicU64,
}

fn is_fresh(entry: &CacheEntry, today: NaiveDate) -> bool {
    entry.created_at_local_date == today && entry.key.is_current(today)
}

impl DailyCache<MemoryBackend> {
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::new(MemoryBackend::new()).with_max_entries(settings.max_entries)
    }
}

impl Default for DailyCache<MemoryBackend> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<B: CacheBackend> DailyCache<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            max_entries: CacheSettings::default().max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            stores: AtomicU64::new(0),
        }
    }

    /// Soft cap; exceeding it triggers a stale-entry purge on the next write.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn lookup(&self, key: &CacheKey, today: NaiveDate) -> Option<serde_json::Value> {
        if !key.is_current(today) {
            log::debug!("Cache key {} is not current for {}", key, today);
            return None;
        }
        match self.backend.load(key) {
            Ok(Some(entry)) if is_fresh(&entry, today) => Some(entry.value),
            Ok(_) => None,
            Err(e) => {
                log::warn!("Cache read failed for {}: {}", key, e);
                None
            }
        }
    }

    fn record(&self, key: &CacheKey, hit: bool) {
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("Cache hit: {}", key);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            log::debug!("Cache miss: {}", key);
        }
    }

    /// Fresh value for `key`, or `None` when absent, stale or unreadable.
    pub fn get(&self, key: &CacheKey, today: NaiveDate) -> Option<serde_json::Value> {
        let value = self.lookup(key, today);
        self.record(key, value.is_some());
        value
    }

    /// Like [`get`](Self::get), decoding into `T`. A value that no longer
    /// decodes counts as a miss.
    pub fn get_as<T: DeserializeOwned>(&self, key: &CacheKey, today: NaiveDate) -> Option<T> {
        let decoded = self.lookup(key, today).and_then(|value| {
            serde_json::from_value(value)
                .map_err(|e| log::warn!("Discarding undecodable cache entry {}: {}", key, e))
                .ok()
        });
        self.record(key, decoded.is_some());
        decoded
    }

    /// Store `value` as created on `today`. Last writer wins.
    ///
    /// A key for another day or schema version would never be read back,
    /// so it is refused with [`CacheError::NotCurrent`].
    pub fn set(&self, key: CacheKey, value: serde_json::Value, today: NaiveDate) -> Result<(), CacheError> {
        if !key.is_current(today) {
            return Err(CacheError::NotCurrent {
                key: key.to_string(),
                today,
            });
        }
        let label = key.to_string();
        self.backend.store(CacheEntry {
            key,
            value,
            created_at_local_date: today,
        })?;
        self.stores.fetch_add(1, Ordering::Relaxed);
        log::debug!("Cache store: {}", label);

        self.enforce_cap(today);
        Ok(())
    }

    pub fn set_as<T: Serialize>(&self, key: CacheKey, value: &T, today: NaiveDate) -> Result<(), CacheError> {
        let value = serde_json::to_value(value).map_err(|e| CacheError::Encode(e.to_string()))?;
        self.set(key, value, today)
    }

    /// Return the cached value, or compute, store and return it. A failed
    /// store is logged and the fresh value returned anyway.
    pub fn get_or_compute<T, F>(&self, key: CacheKey, today: NaiveDate, compute: F) -> T
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        if let Some(cached) = self.get_as(&key, today) {
            return cached;
        }
        let value = compute();
        self.store_computed(key, &value, today);
        value
    }

    /// Fallible [`get_or_compute`](Self::get_or_compute). Errors from
    /// `compute` are passed through and nothing is stored.
    pub fn try_get_or_compute<T, E, F>(&self, key: CacheKey, today: NaiveDate, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(cached) = self.get_as(&key, today) {
            return Ok(cached);
        }
        let value = compute()?;
        self.store_computed(key, &value, today);
        Ok(value)
    }

    fn store_computed<T: Serialize>(&self, key: CacheKey, value: &T, today: NaiveDate) {
        let label = key.to_string();
        if let Err(e) = self.set_as(key, value, today) {
            log::warn!("Cache write failed for {}: {}", label, e);
        }
    }

    pub fn remove(&self, key: &CacheKey) -> bool {
        self.backend.remove(key).unwrap_or_else(|e| {
            log::warn!("Cache remove failed for {}: {}", key, e);
            false
        })
    }

    pub fn clear(&self) {
        if let Err(e) = self.backend.clear() {
            log::warn!("Cache clear failed: {}", e);
        }
    }

    /// Drop every entry that is no longer fresh for `today`. Housekeeping
    /// only; stale entries already read as misses.
    pub fn purge_stale(&self, today: NaiveDate) -> usize {
        match self.backend.retain(&|entry| is_fresh(entry, today)) {
            Ok(dropped) => {
                if dropped > 0 {
                    log::debug!("Purged {} stale cache entries (today {}, schema v{})", dropped, today, SCHEMA_VERSION);
                }
                dropped
            }
            Err(e) => {
                log::warn!("Cache purge failed: {}", e);
                0
            }
        }
    }

    pub fn len(&self) -> usize {
        self.backend.len().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
        }
    }

    fn enforce_cap(&self, today: NaiveDate) {
        let len = match self.backend.len() {
            Ok(len) => len,
            Err(_) => return,
        };
        if len > self.max_entries {
            let dropped = self.purge_stale(today);
            if len - dropped > self.max_entries {
                log::debug!(
                    "Cache holds {} fresh entries, above soft cap {}",
                    len - dropped,
                    self.max_entries
                );
            }
        }
    }
}
