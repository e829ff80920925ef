use crate::error::{Result, SeleneError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bump whenever the shape or derivation of any cached value changes.
/// Every entry written under an older version reads as a miss.
pub const SCHEMA_VERSION: u32 = 3;

/// What a cached value was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputationKind {
    BirthChart,
    Transits,
    Aspects,
    Synastry,
    Horoscope,
}

impl ComputationKind {
    pub const ALL: [ComputationKind; 5] = [
        ComputationKind::BirthChart,
        ComputationKind::Transits,
        ComputationKind::Aspects,
        ComputationKind::Synastry,
        ComputationKind::Horoscope,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ComputationKind::BirthChart => "birth_chart",
            ComputationKind::Transits => "transits",
            ComputationKind::Aspects => "aspects",
            ComputationKind::Synastry => "synastry",
            ComputationKind::Horoscope => "horoscope",
        }
    }
}

impl fmt::Display for ComputationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ComputationKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ComputationKind::ALL
            .iter()
            .copied()
            .find(|k| k.id() == s.trim())
            .ok_or_else(|| format!("Unknown computation kind: {}", s))
    }
}

/// Identity of one memoized result.
///
/// The bucket date is the local calendar day the value belongs to; a key
/// for yesterday, or for an older schema version, never matches today's
/// lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheKey {
    pub subject_id: String,
    #[serde(rename = "computationKind")]
    pub kind: ComputationKind,
    pub bucket_date: NaiveDate,
    pub schema_version: u32,
}

impl CacheKey {
    pub fn new(
        subject_id: impl Into<String>,
        kind: ComputationKind,
        bucket_date: NaiveDate,
        schema_version: u32,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            kind,
            bucket_date,
            schema_version,
        }
    }

    /// Key for `today` under the running schema version.
    pub fn current(subject_id: impl Into<String>, kind: ComputationKind, today: NaiveDate) -> Self {
        Self::new(subject_id, kind, today, SCHEMA_VERSION)
    }

    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.bucket_date == today && self.schema_version == SCHEMA_VERSION
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:v{}",
            self.subject_id,
            self.kind,
            self.bucket_date.format("%Y-%m-%d"),
            self.schema_version
        )
    }
}

/// Parse a `YYYY-MM-DD` bucket date.
pub fn parse_bucket_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| SeleneError::InvalidBucketDate {
        value: value.to_string(),
    })
}
