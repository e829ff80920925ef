use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative locations probed when no explicit settings path is given.
pub const SETTINGS_SEARCH_PATHS: &[&str] = &["configs/selene.toml", "../../configs/selene.toml"];

/// Largest accepted distance from UTC for the local cache day, either side.
pub const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct SeleneSettings {
    pub orbs: OrbSettings,
    pub transits: TransitSettings,
    pub cache: CacheSettings,
    /// File the settings were read from, if any.
    pub source: Option<PathBuf>,
}

/// Orb tolerance (degrees) per aspect type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrbSettings {
    #[serde(default = "default_wide_orb")]
    pub conjunction: f64,
    #[serde(default = "default_wide_orb")]
    pub opposition: f64,
    #[serde(default = "default_wide_orb")]
    pub trine: f64,
    #[serde(default = "default_narrow_orb")]
    pub square: f64,
    #[serde(default = "default_narrow_orb")]
    pub sextile: f64,
}

/// Presentation banding of a transit into beginning/mid/ending phases.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransitSettings {
    #[serde(default = "default_ending_fraction")]
    pub ending_fraction: f64,
    #[serde(default = "default_ending_cap_days")]
    pub ending_cap_days: u32,
    #[serde(default = "default_mid_fraction")]
    pub mid_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CacheSettings {
    /// Offset from UTC that defines the local calendar day for bucketing.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_wide_orb() -> f64 {
    8.0
}

fn default_narrow_orb() -> f64 {
    6.0
}

fn default_ending_fraction() -> f64 {
    0.15
}

fn default_ending_cap_days() -> u32 {
    14
}

fn default_mid_fraction() -> f64 {
    0.5
}

fn default_max_entries() -> usize {
    1000
}

impl Default for OrbSettings {
    fn default() -> Self {
        Self {
            conjunction: default_wide_orb(),
            opposition: default_wide_orb(),
            trine: default_wide_orb(),
            square: default_narrow_orb(),
            sextile: default_narrow_orb(),
        }
    }
}

impl Default for TransitSettings {
    fn default() -> Self {
        Self {
            ending_fraction: default_ending_fraction(),
            ending_cap_days: default_ending_cap_days(),
            mid_fraction: default_mid_fraction(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            max_entries: default_max_entries(),
        }
    }
}

impl Default for SeleneSettings {
    fn default() -> Self {
        Self {
            orbs: OrbSettings::default(),
            transits: TransitSettings::default(),
            cache: CacheSettings::default(),
            source: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    orbs: Option<OrbSettings>,
    #[serde(default)]
    transits: Option<TransitSettings>,
    #[serde(default)]
    cache: Option<CacheSettings>,
}

/// Try the common relative paths for `configs/selene.toml`.
pub fn read_settings_toml_text() -> anyhow::Result<(PathBuf, String)> {
    for p in SETTINGS_SEARCH_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok((PathBuf::from(p), c));
        }
    }
    anyhow::bail!("Could not load selene.toml from {:?}", SETTINGS_SEARCH_PATHS);
}

/// Parse and validate settings from TOML text. Missing sections and fields
/// fall back to defaults.
pub fn parse_settings(text: &str) -> anyhow::Result<SeleneSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse selene settings: {e}"))?;
    let settings = SeleneSettings {
        orbs: root.orbs.unwrap_or_default(),
        transits: root.transits.unwrap_or_default(),
        cache: root.cache.unwrap_or_default(),
        source: None,
    };
    validate_settings(&settings)?;
    Ok(settings)
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<SeleneSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    settings_from_found(path.to_path_buf(), &text)
}

/// Load from the first search path that exists.
pub fn load_settings() -> anyhow::Result<SeleneSettings> {
    let (path, text) = read_settings_toml_text()?;
    settings_from_found(path, &text)
}

fn settings_from_found(path: PathBuf, text: &str) -> anyhow::Result<SeleneSettings> {
    let mut settings = parse_settings(text)?;
    log::info!("Loaded selene settings from {}", path.display());
    settings.source = Some(path);
    Ok(settings)
}

/// Like [`load_settings`], but a missing file yields defaults. A file that
/// exists and fails to parse or validate is still an error.
pub fn load_settings_or_default() -> anyhow::Result<SeleneSettings> {
    match read_settings_toml_text() {
        Ok((path, text)) => settings_from_found(path, &text),
        Err(_) => {
            log::debug!("No selene.toml found, using default settings");
            Ok(SeleneSettings::default())
        }
    }
}

pub fn validate_settings(settings: &SeleneSettings) -> anyhow::Result<()> {
    let orbs = &settings.orbs;
    for (name, orb) in [
        ("conjunction", orbs.conjunction),
        ("opposition", orbs.opposition),
        ("trine", orbs.trine),
        ("square", orbs.square),
        ("sextile", orbs.sextile),
    ] {
        if !orb.is_finite() || !(0.0..90.0).contains(&orb) {
            anyhow::bail!("orbs.{name} must be a finite value in [0, 90), got {orb}");
        }
    }

    let transits = &settings.transits;
    for (name, fraction) in [
        ("ending_fraction", transits.ending_fraction),
        ("mid_fraction", transits.mid_fraction),
    ] {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            anyhow::bail!("transits.{name} must be within [0, 1], got {fraction}");
        }
    }

    if !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&settings.cache.utc_offset_minutes) {
        anyhow::bail!(
            "cache.utc_offset_minutes must be within ±{MAX_UTC_OFFSET_MINUTES}, got {}",
            settings.cache.utc_offset_minutes
        );
    }
    if settings.cache.max_entries == 0 {
        anyhow::bail!("cache.max_entries must be at least 1");
    }
    Ok(())
}
