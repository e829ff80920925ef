//! Position events: sign ingresses and the Sun's seasonal markers.

use crate::angle::angular_separation;
use crate::ephemeris::{AngularPosition, CelestialBody, ChartPositions};
use crate::error::Result;
use crate::motion::motion_between;
use crate::western::placement::Placement;
use crate::western::signs::{degree_in_sign, sign_for, ZodiacSign};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A body counts as entering a sign within this many degrees of its start.
pub const INGRESS_WINDOW_DEGREES: f64 = 2.0;
/// Narrower window for a retrograde body sitting at the start of a sign.
pub const RETROGRADE_INGRESS_WINDOW_DEGREES: f64 = 1.0;
/// Sun distance from a cardinal point that still counts as the marker.
pub const SEASONAL_WINDOW_DEGREES: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignIngress {
    pub body: CelestialBody,
    pub sign: ZodiacSign,
    pub degree_in_sign: f64,
    pub retrograde: bool,
}

impl SignIngress {
    /// e.g. `"Mars enters Leo"`
    pub fn title(&self) -> String {
        if self.retrograde {
            format!("{} is retrograde at the start of {}", self.body, self.sign)
        } else {
            format!("{} enters {}", self.body, self.sign)
        }
    }
}

/// Ingress for a position in the first [`INGRESS_WINDOW_DEGREES`] of its sign.
pub fn sign_ingress(position: &AngularPosition) -> Option<SignIngress> {
    let within = degree_in_sign(position.longitude());
    if within >= INGRESS_WINDOW_DEGREES {
        return None;
    }
    Some(SignIngress {
        body: position.body(),
        sign: sign_for(position.longitude()),
        degree_in_sign: within,
        retrograde: false,
    })
}

/// Ingress for a retrograde placement in the first
/// [`RETROGRADE_INGRESS_WINDOW_DEGREES`] of its sign. Direct placements
/// never match.
pub fn retrograde_ingress(placement: &Placement) -> Option<SignIngress> {
    if !placement.retrograde {
        return None;
    }
    let within = degree_in_sign(placement.ecliptic_longitude);
    if within >= RETROGRADE_INGRESS_WINDOW_DEGREES {
        return None;
    }
    Some(SignIngress {
        body: placement.body,
        sign: placement.sign,
        degree_in_sign: within,
        retrograde: true,
    })
}

/// [`retrograde_ingress`] with the direction taken from two samples.
pub fn retrograde_ingress_between(
    previous: &AngularPosition,
    current: &AngularPosition,
) -> Result<Option<SignIngress>> {
    let motion = motion_between(previous, current)?;
    let placement = Placement::new(current, motion.is_retrograde, None)?;
    Ok(retrograde_ingress(&placement))
}

/// Every sign ingress in a chart, in chart order.
pub fn chart_ingresses(chart: &ChartPositions) -> Vec<SignIngress> {
    chart.iter().filter_map(sign_ingress).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalMarker {
    SpringEquinox,
    SummerSolstice,
    AutumnEquinox,
    WinterSolstice,
}

impl SeasonalMarker {
    pub const ALL: [SeasonalMarker; 4] = [
        SeasonalMarker::SpringEquinox,
        SeasonalMarker::SummerSolstice,
        SeasonalMarker::AutumnEquinox,
        SeasonalMarker::WinterSolstice,
    ];

    /// Solar longitude of the marker.
    pub fn longitude(&self) -> f64 {
        match self {
            SeasonalMarker::SpringEquinox => 0.0,
            SeasonalMarker::SummerSolstice => 90.0,
            SeasonalMarker::AutumnEquinox => 180.0,
            SeasonalMarker::WinterSolstice => 270.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SeasonalMarker::SpringEquinox => "Spring Equinox",
            SeasonalMarker::SummerSolstice => "Summer Solstice",
            SeasonalMarker::AutumnEquinox => "Autumn Equinox",
            SeasonalMarker::WinterSolstice => "Winter Solstice",
        }
    }
}

impl fmt::Display for SeasonalMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Marker whose longitude is strictly within [`SEASONAL_WINDOW_DEGREES`]
/// of the Sun, measured across 0°/360°.
pub fn seasonal_marker(sun_longitude: f64) -> Option<SeasonalMarker> {
    SeasonalMarker::ALL
        .iter()
        .copied()
        .find(|m| angular_separation(sun_longitude, m.longitude()) < SEASONAL_WINDOW_DEGREES)
}

/// [`seasonal_marker`] for the Sun in `chart`, if the chart has one.
pub fn chart_seasonal_marker(chart: &ChartPositions) -> Option<SeasonalMarker> {
    chart
        .get(CelestialBody::Sun)
        .and_then(|sun| seasonal_marker(sun.longitude()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap()
    }

    fn pos(body: CelestialBody, lon: f64, day: u32) -> AngularPosition {
        AngularPosition::new(body, lon, at(day)).unwrap()
    }

    #[test]
    fn test_sign_ingress_window_is_half_open() {
        let entering = sign_ingress(&pos(CelestialBody::Mars, 121.5, 1)).unwrap();
        assert_eq!(entering.sign, ZodiacSign::Leo);
        assert_eq!(entering.title(), "Mars enters Leo");

        assert!(sign_ingress(&pos(CelestialBody::Mars, 120.0, 1)).is_some());
        assert!(sign_ingress(&pos(CelestialBody::Mars, 122.0, 1)).is_none());
        assert!(sign_ingress(&pos(CelestialBody::Mars, 119.9, 1)).is_none());
    }

    #[test]
    fn test_sign_ingress_wraps_to_aries() {
        // 360.5 normalizes to 0.5 Aries
        let ingress = sign_ingress(&pos(CelestialBody::Venus, 360.5, 1)).unwrap();
        assert_eq!(ingress.sign, ZodiacSign::Aries);
        assert!(sign_ingress(&pos(CelestialBody::Venus, 359.5, 1)).is_none());
    }

    #[test]
    fn test_retrograde_ingress_boundary() {
        let p = |lon| pos(CelestialBody::Mercury, lon, 1);
        let retro = Placement::new(&p(60.5), true, None).unwrap();
        assert_eq!(retrograde_ingress(&retro).unwrap().sign, ZodiacSign::Gemini);

        assert!(retrograde_ingress(&Placement::new(&p(61.0), true, None).unwrap()).is_none());
        assert!(retrograde_ingress(&Placement::new(&p(60.5), false, None).unwrap()).is_none());
    }

    #[test]
    fn test_retrograde_ingress_from_samples() {
        let found = retrograde_ingress_between(
            &pos(CelestialBody::Mercury, 0.8, 1),
            &pos(CelestialBody::Mercury, 0.3, 2),
        )
        .unwrap()
        .unwrap();
        assert!(found.retrograde);
        assert_eq!(found.sign, ZodiacSign::Aries);

        let direct = retrograde_ingress_between(
            &pos(CelestialBody::Mercury, 0.3, 1),
            &pos(CelestialBody::Mercury, 0.8, 2),
        )
        .unwrap();
        assert!(direct.is_none());
    }

    #[test]
    fn test_seasonal_markers() {
        assert_eq!(seasonal_marker(0.5), Some(SeasonalMarker::SpringEquinox));
        assert_eq!(seasonal_marker(359.5), Some(SeasonalMarker::SpringEquinox));
        assert_eq!(seasonal_marker(89.2), Some(SeasonalMarker::SummerSolstice));
        assert_eq!(seasonal_marker(180.9), Some(SeasonalMarker::AutumnEquinox));
        assert_eq!(seasonal_marker(270.0), Some(SeasonalMarker::WinterSolstice));
        // exactly one degree away is outside
        assert_eq!(seasonal_marker(91.0), None);
        assert_eq!(seasonal_marker(45.0), None);
    }

    #[test]
    fn test_chart_helpers() {
        let chart = ChartPositions::from_positions(vec![
            pos(CelestialBody::Sun, 179.6, 1),
            pos(CelestialBody::Moon, 211.0, 1),
            pos(CelestialBody::Saturn, 15.0, 1),
        ]);
        assert_eq!(chart_seasonal_marker(&chart), Some(SeasonalMarker::AutumnEquinox));
        let ingresses = chart_ingresses(&chart);
        assert_eq!(ingresses.len(), 1);
        assert_eq!(ingresses[0].body, CelestialBody::Moon);
        assert_eq!(ingresses[0].sign, ZodiacSign::Scorpio);
    }
}
