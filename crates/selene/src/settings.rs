//! Core types resolved from `selene_config` settings.

use crate::aspects::OrbTable;
use crate::cache::{DailyCache, LocalClock, MemoryBackend};
use crate::transit::TransitBands;
use anyhow::Context;
use selene_config::SeleneSettings;
use std::path::Path;

/// Everything the computations need from configuration, already validated
/// and converted into library types.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreSettings {
    pub orbs: OrbTable,
    pub bands: TransitBands,
    pub clock: LocalClock,
    pub max_cache_entries: usize,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            orbs: OrbTable::default(),
            bands: TransitBands::default(),
            clock: LocalClock::utc(),
            max_cache_entries: selene_config::CacheSettings::default().max_entries,
        }
    }
}

impl CoreSettings {
    pub fn resolve(settings: &SeleneSettings) -> anyhow::Result<Self> {
        let origin = settings
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string());

        let orbs = OrbTable::from_settings(&settings.orbs)
            .with_context(|| format!("Invalid [orbs] in {}", origin))?;
        let clock = LocalClock::from_settings(&settings.cache)
            .with_context(|| format!("Invalid [cache] in {}", origin))?;

        Ok(Self {
            orbs,
            bands: TransitBands::from_settings(&settings.transits),
            clock,
            max_cache_entries: settings.cache.max_entries,
        })
    }

    /// Load from the default search paths, falling back to defaults when no
    /// settings file exists.
    pub fn load() -> anyhow::Result<Self> {
        let settings = selene_config::load_settings_or_default()?;
        Self::resolve(&settings)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let settings = selene_config::load_settings_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?;
        Self::resolve(&settings)
    }

    pub fn new_cache(&self) -> DailyCache<MemoryBackend> {
        DailyCache::in_memory().with_max_entries(self.max_cache_entries)
    }
}
