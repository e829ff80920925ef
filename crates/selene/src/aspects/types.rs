use crate::ephemeris::CelestialBody;
use crate::error::{Result, SeleneError};
use selene_config::OrbSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Major aspects, declared in canonical tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
}

impl AspectType {
    pub const ALL: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Opposition,
        AspectType::Trine,
        AspectType::Square,
        AspectType::Sextile,
    ];

    pub fn ideal_angle(&self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Opposition => 180.0,
            AspectType::Trine => 120.0,
            AspectType::Square => 90.0,
            AspectType::Sextile => 60.0,
        }
    }

    pub fn nature(&self) -> AspectNature {
        match self {
            AspectType::Conjunction => AspectNature::Intense,
            AspectType::Opposition | AspectType::Square => AspectNature::Challenging,
            AspectType::Trine | AspectType::Sextile => AspectNature::Harmonious,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            AspectType::Conjunction => "conjunction",
            AspectType::Opposition => "opposition",
            AspectType::Trine => "trine",
            AspectType::Square => "square",
            AspectType::Sextile => "sextile",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AspectType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        AspectType::ALL
            .iter()
            .copied()
            .find(|t| t.id() == lower)
            .ok_or_else(|| format!("Unknown aspect type: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectNature {
    Harmonious,
    Challenging,
    Intense,
}

impl AspectNature {
    pub fn is_harmonious(&self) -> bool {
        matches!(self, AspectNature::Harmonious)
    }
}

/// Orb tolerance per aspect type, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbTable {
    orbs: [f64; 5],
}

impl Default for OrbTable {
    fn default() -> Self {
        Self {
            orbs: [8.0, 8.0, 8.0, 6.0, 6.0],
        }
    }
}

fn validate_orb(aspect: AspectType, orb: f64) -> Result<f64> {
    if orb.is_finite() && (0.0..90.0).contains(&orb) {
        Ok(orb)
    } else {
        Err(SeleneError::InvalidOrb {
            aspect: aspect.id().to_string(),
            orb,
        })
    }
}

impl OrbTable {
    /// Orbs given in canonical order (conjunction, opposition, trine,
    /// square, sextile).
    pub fn new(orbs: [f64; 5]) -> Result<Self> {
        for (aspect, orb) in AspectType::ALL.iter().zip(orbs) {
            validate_orb(*aspect, orb)?;
        }
        Ok(Self { orbs })
    }

    pub fn from_settings(settings: &OrbSettings) -> Result<Self> {
        Self::new([
            settings.conjunction,
            settings.opposition,
            settings.trine,
            settings.square,
            settings.sextile,
        ])
    }

    pub fn with_orb(mut self, aspect: AspectType, orb: f64) -> Result<Self> {
        self.orbs[aspect.index()] = validate_orb(aspect, orb)?;
        Ok(self)
    }

    pub fn orb(&self, aspect: AspectType) -> f64 {
        self.orbs[aspect.index()]
    }

    pub fn max_orb(&self) -> f64 {
        self.orbs.iter().copied().fold(0.0, f64::max)
    }
}

/// A named aspect between two longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectRelationship {
    pub aspect_type: AspectType,
    /// Minimal angular distance, `0..=180`.
    pub separation_degrees: f64,
    /// Orb that admitted this aspect.
    pub orb_used: f64,
    /// `|separation - ideal angle|`
    pub residual: f64,
    pub nature: AspectNature,
}

impl AspectRelationship {
    /// Within a tenth of a degree of exact.
    pub fn is_exact(&self) -> bool {
        self.residual < 0.1
    }
}

/// Reference to a body within a named chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectObjectRef {
    pub chart_id: String,
    pub body: CelestialBody,
}

/// An aspect between two bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectPair {
    pub from: AspectObjectRef,
    pub to: AspectObjectRef,
    pub aspect: AspectRelationship,
    /// Significance used for ordering; higher first.
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectSetKind {
    IntraChart,
    Synastry,
}

/// Aspects within one chart or across two
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectSet {
    pub id: String,
    pub label: String,
    pub kind: AspectSetKind,
    pub chart_ids: Vec<String>,
    pub pairs: Vec<AspectPair>,
}
