use crate::angle::checked_normalize;
use crate::error::{Result, SeleneError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bodies and chart points an ephemeris provider can supply.
///
/// Serializes as the snake_case id; deserializes from anything `FromStr`
/// accepts, so display names like `"North Node"` load too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
    NorthNode,
    SouthNode,
    Ascendant,
    Midheaven,
}

impl CelestialBody {
    pub const ALL: [CelestialBody; 15] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
        CelestialBody::Pluto,
        CelestialBody::Chiron,
        CelestialBody::NorthNode,
        CelestialBody::SouthNode,
        CelestialBody::Ascendant,
        CelestialBody::Midheaven,
    ];

    /// Bodies compared between two people's charts.
    pub const SYNASTRY: [CelestialBody; 10] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
        CelestialBody::Pluto,
    ];

    /// Stable identifier, matches the serde form.
    pub fn id(&self) -> &'static str {
        match self {
            CelestialBody::Sun => "sun",
            CelestialBody::Moon => "moon",
            CelestialBody::Mercury => "mercury",
            CelestialBody::Venus => "venus",
            CelestialBody::Mars => "mars",
            CelestialBody::Jupiter => "jupiter",
            CelestialBody::Saturn => "saturn",
            CelestialBody::Uranus => "uranus",
            CelestialBody::Neptune => "neptune",
            CelestialBody::Pluto => "pluto",
            CelestialBody::Chiron => "chiron",
            CelestialBody::NorthNode => "north_node",
            CelestialBody::SouthNode => "south_node",
            CelestialBody::Ascendant => "ascendant",
            CelestialBody::Midheaven => "midheaven",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Uranus => "Uranus",
            CelestialBody::Neptune => "Neptune",
            CelestialBody::Pluto => "Pluto",
            CelestialBody::Chiron => "Chiron",
            CelestialBody::NorthNode => "North Node",
            CelestialBody::SouthNode => "South Node",
            CelestialBody::Ascendant => "Ascendant",
            CelestialBody::Midheaven => "Midheaven",
        }
    }

    /// Chart angles are derived from time and place, not from an orbit.
    pub fn is_angle(&self) -> bool {
        matches!(self, CelestialBody::Ascendant | CelestialBody::Midheaven)
    }

    /// Relative significance used to rank aspect pairs.
    pub fn weight(&self) -> f64 {
        match self {
            CelestialBody::Sun | CelestialBody::Moon => 10.0,
            CelestialBody::Venus | CelestialBody::Mars => 8.0,
            CelestialBody::Mercury => 6.0,
            CelestialBody::Ascendant | CelestialBody::Midheaven => 6.0,
            CelestialBody::Jupiter | CelestialBody::Saturn => 5.0,
            CelestialBody::NorthNode | CelestialBody::SouthNode => 3.0,
            CelestialBody::Uranus | CelestialBody::Neptune | CelestialBody::Pluto => 3.0,
            CelestialBody::Chiron => 2.0,
        }
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CelestialBody {
    type Err = SeleneError;

    /// Accepts ids and display names, case-insensitively
    /// (`"sun"`, `"Sun"`, `"north_node"`, `"North Node"`, `"MC"`).
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        let body = match key.as_str() {
            "asc" => Some(CelestialBody::Ascendant),
            "mc" => Some(CelestialBody::Midheaven),
            "true_node" | "rahu" => Some(CelestialBody::NorthNode),
            "ketu" => Some(CelestialBody::SouthNode),
            other => CelestialBody::ALL.iter().copied().find(|b| b.id() == other),
        };
        body.ok_or_else(|| SeleneError::UnknownBody {
            name: s.to_string(),
        })
    }
}

impl TryFrom<String> for CelestialBody {
    type Error = SeleneError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// A body's location on the ecliptic at one instant.
///
/// The longitude is normalized on construction and never changes; a newer
/// sample supersedes an older one instead of mutating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawAngularPosition")]
pub struct AngularPosition {
    body_id: CelestialBody,
    longitude_degrees: f64,
    sampled_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAngularPosition {
    body_id: CelestialBody,
    longitude_degrees: f64,
    sampled_at: DateTime<Utc>,
}

impl TryFrom<RawAngularPosition> for AngularPosition {
    type Error = SeleneError;

    fn try_from(raw: RawAngularPosition) -> Result<Self> {
        AngularPosition::new(raw.body_id, raw.longitude_degrees, raw.sampled_at)
    }
}

impl AngularPosition {
    pub fn new(body: CelestialBody, longitude: f64, sampled_at: DateTime<Utc>) -> Result<Self> {
        let longitude_degrees = checked_normalize(longitude, body.id())?;
        Ok(Self {
            body_id: body,
            longitude_degrees,
            sampled_at,
        })
    }

    pub fn body(&self) -> CelestialBody {
        self.body_id
    }

    pub fn longitude(&self) -> f64 {
        self.longitude_degrees
    }

    pub fn sampled_at(&self) -> DateTime<Utc> {
        self.sampled_at
    }
}

/// All positions of one chart, one per body, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPositions {
    positions: Vec<AngularPosition>,
}

impl ChartPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw samples; a later sample for the same body replaces an
    /// earlier one in place.
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = AngularPosition>,
    {
        let mut chart = Self::new();
        for p in positions {
            chart.insert(p);
        }
        chart
    }

    pub fn insert(&mut self, position: AngularPosition) {
        match self.positions.iter_mut().find(|p| p.body() == position.body()) {
            Some(existing) => *existing = position,
            None => self.positions.push(position),
        }
    }

    pub fn get(&self, body: CelestialBody) -> Option<&AngularPosition> {
        self.positions.iter().find(|p| p.body() == body)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AngularPosition> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Keep only the listed bodies, preserving order.
    pub fn restricted_to(&self, bodies: &[CelestialBody]) -> Self {
        Self {
            positions: self
                .positions
                .iter()
                .filter(|p| bodies.contains(&p.body()))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_body_from_str_variants() {
        assert_eq!("sun".parse::<CelestialBody>().unwrap(), CelestialBody::Sun);
        assert_eq!("Sun".parse::<CelestialBody>().unwrap(), CelestialBody::Sun);
        assert_eq!("North Node".parse::<CelestialBody>().unwrap(), CelestialBody::NorthNode);
        assert_eq!("north_node".parse::<CelestialBody>().unwrap(), CelestialBody::NorthNode);
        assert_eq!("MC".parse::<CelestialBody>().unwrap(), CelestialBody::Midheaven);
        assert!(matches!(
            "Vulcan".parse::<CelestialBody>(),
            Err(SeleneError::UnknownBody { .. })
        ));
    }

    #[test]
    fn test_every_body_round_trips_through_id() {
        for body in CelestialBody::ALL {
            assert_eq!(body.id().parse::<CelestialBody>().unwrap(), body);
            assert_eq!(body.display_name().parse::<CelestialBody>().unwrap(), body);
        }
    }

    #[test]
    fn test_position_normalizes_longitude() {
        let p = AngularPosition::new(CelestialBody::Moon, -10.0, at(0)).unwrap();
        assert_eq!(p.longitude(), 350.0);
        assert!(AngularPosition::new(CelestialBody::Moon, f64::NAN, at(0)).is_err());
    }

    #[test]
    fn test_position_serializes_camel_case() {
        let p = AngularPosition::new(CelestialBody::NorthNode, 12.5, at(6)).unwrap();
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["bodyId"], "north_node");
        assert_eq!(json["longitudeDegrees"], 12.5);
        assert!(json["sampledAt"].as_str().unwrap().starts_with("2024-04-10T06:00:00"));
    }

    #[test]
    fn test_deserializing_normalizes() {
        let raw = serde_json::json!({
            "bodyId": "sun",
            "longitudeDegrees": 400.0,
            "sampledAt": "2024-04-10T00:00:00Z"
        });
        let p: AngularPosition = serde_json::from_value(raw).unwrap();
        assert_eq!(p.longitude(), 40.0);

        let unknown = serde_json::json!({
            "bodyId": "vulcan",
            "longitudeDegrees": 1.0,
            "sampledAt": "2024-04-10T00:00:00Z"
        });
        assert!(serde_json::from_value::<AngularPosition>(unknown).is_err());
    }

    #[test]
    fn test_deserializing_accepts_display_names() {
        let raw = serde_json::json!({
            "bodyId": "Sun",
            "longitudeDegrees": 45.0,
            "sampledAt": "2024-04-10T00:00:00Z"
        });
        let p: AngularPosition = serde_json::from_value(raw).unwrap();
        assert_eq!(p.body(), CelestialBody::Sun);

        let node: CelestialBody = serde_json::from_value(serde_json::json!("North Node")).unwrap();
        assert_eq!(node, CelestialBody::NorthNode);
        // output stays in id form
        assert_eq!(serde_json::to_value(node).unwrap(), "north_node");
    }

    #[test]
    fn test_chart_positions_last_sample_wins() {
        let chart = ChartPositions::from_positions(vec![
            AngularPosition::new(CelestialBody::Sun, 10.0, at(0)).unwrap(),
            AngularPosition::new(CelestialBody::Moon, 20.0, at(0)).unwrap(),
            AngularPosition::new(CelestialBody::Sun, 11.0, at(1)).unwrap(),
        ]);
        assert_eq!(chart.len(), 2);
        assert_eq!(chart.get(CelestialBody::Sun).unwrap().longitude(), 11.0);
        let order: Vec<_> = chart.iter().map(|p| p.body()).collect();
        assert_eq!(order, vec![CelestialBody::Sun, CelestialBody::Moon]);
    }
}
