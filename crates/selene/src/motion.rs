//! Apparent direction of motion from successive longitude samples.

use crate::angle::{ensure_finite, normalize_degrees, HALF_CIRCLE};
use crate::ephemeris::AngularPosition;
use crate::error::{Result, SeleneError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionState {
    pub is_retrograde: bool,
    /// Forward-going delta in `[0, 360)` the flag was derived from.
    pub forward_motion_degrees: f64,
}

impl MotionState {
    pub fn is_stationary(&self) -> bool {
        self.forward_motion_degrees == 0.0
    }
}

/// Classify motion between two samples of the same body.
///
/// A forward delta above 180° means the body went backwards across the
/// shorter arc. Exactly 0 (stationary) and exactly 180 are direct.
pub fn classify_motion(current: f64, previous: f64) -> MotionState {
    let forward = normalize_degrees(current - previous);
    MotionState {
        is_retrograde: forward > HALF_CIRCLE,
        forward_motion_degrees: forward,
    }
}

pub fn checked_classify_motion(current: f64, previous: f64) -> Result<MotionState> {
    ensure_finite(current, "current longitude")?;
    ensure_finite(previous, "previous longitude")?;
    Ok(classify_motion(current, previous))
}

/// Motion between two samples, checking they describe one body in time order.
pub fn motion_between(previous: &AngularPosition, current: &AngularPosition) -> Result<MotionState> {
    if previous.body() != current.body() {
        return Err(SeleneError::BodyMismatch {
            expected: previous.body().id().to_string(),
            found: current.body().id().to_string(),
        });
    }
    if previous.sampled_at() >= current.sampled_at() {
        return Err(SeleneError::SampleOrder {
            previous: previous.sampled_at(),
            current: current.sampled_at(),
        });
    }
    Ok(classify_motion(current.longitude(), previous.longitude()))
}

/// Change of direction observed across three consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Station {
    None,
    /// Body just started moving backwards.
    Retrograde,
    /// Body just resumed forward motion.
    Direct,
}

fn station_of(was_retrograde: bool, now_retrograde: bool) -> Station {
    match (was_retrograde, now_retrograde) {
        (false, true) => Station::Retrograde,
        (true, false) => Station::Direct,
        _ => Station::None,
    }
}

pub fn detect_station(before_previous: f64, previous: f64, current: f64) -> Station {
    station_of(
        classify_motion(previous, before_previous).is_retrograde,
        classify_motion(current, previous).is_retrograde,
    )
}

/// [`detect_station`] over positions, with the same checks as [`motion_between`].
pub fn station_between(
    before_previous: &AngularPosition,
    previous: &AngularPosition,
    current: &AngularPosition,
) -> Result<Station> {
    let was = motion_between(before_previous, previous)?.is_retrograde;
    let now = motion_between(previous, current)?.is_retrograde;
    Ok(station_of(was, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::CelestialBody;
    use approx::assert_abs_diff_eq;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_forward_crossing_zero_is_direct() {
        let m = classify_motion(1.0, 359.0);
        assert!(!m.is_retrograde);
        assert_abs_diff_eq!(m.forward_motion_degrees, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_backward_crossing_zero_is_retrograde() {
        let m = classify_motion(359.0, 1.0);
        assert!(m.is_retrograde);
        assert_abs_diff_eq!(m.forward_motion_degrees, 358.0, epsilon = 1e-9);
    }

    #[test]
    fn test_stationary_is_direct() {
        let m = classify_motion(100.0, 100.0);
        assert!(!m.is_retrograde);
        assert!(m.is_stationary());
    }

    #[test]
    fn test_exactly_half_circle_is_direct() {
        let m = classify_motion(180.0, 0.0);
        assert_eq!(m.forward_motion_degrees, 180.0);
        assert!(!m.is_retrograde);
    }

    #[test]
    fn test_boundary_either_side_of_half_circle() {
        assert!(!classify_motion(0.0, 179.0).is_retrograde);
        assert!(classify_motion(179.0, 0.0).is_retrograde);
    }

    #[test]
    fn test_sun_and_moon_scenarios() {
        assert!(!classify_motion(11.0, 10.0).is_retrograde);
        assert!(classify_motion(14.0, 15.0).is_retrograde);
    }

    #[test]
    fn test_checked_rejects_nan() {
        assert!(checked_classify_motion(f64::NAN, 1.0).is_err());
        assert!(checked_classify_motion(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_motion_between_validates_samples() {
        let t0 = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 4, 2, 0, 0, 0).unwrap();
        let merc0 = AngularPosition::new(CelestialBody::Mercury, 27.0, t0).unwrap();
        let merc1 = AngularPosition::new(CelestialBody::Mercury, 26.5, t1).unwrap();
        let venus1 = AngularPosition::new(CelestialBody::Venus, 10.0, t1).unwrap();

        assert!(motion_between(&merc0, &merc1).unwrap().is_retrograde);
        assert!(matches!(
            motion_between(&merc0, &venus1),
            Err(SeleneError::BodyMismatch { .. })
        ));
        assert!(matches!(
            motion_between(&merc1, &merc0),
            Err(SeleneError::SampleOrder { .. })
        ));
    }

    #[test]
    fn test_detect_station() {
        assert_eq!(detect_station(10.0, 11.0, 10.5), Station::Retrograde);
        assert_eq!(detect_station(11.0, 10.5, 10.7), Station::Direct);
        assert_eq!(detect_station(10.0, 11.0, 12.0), Station::None);
        assert_eq!(detect_station(12.0, 11.0, 10.0), Station::None);
        // Stationary after forward motion is not a retrograde station.
        assert_eq!(detect_station(10.0, 11.0, 11.0), Station::None);
        // Wraparound: forward through 0 then backwards through 0.
        assert_eq!(detect_station(358.0, 0.5, 359.5), Station::Retrograde);
    }

    #[test]
    fn test_station_between_positions() {
        let t = |d| Utc.with_ymd_and_hms(2024, 4, d, 0, 0, 0).unwrap();
        let p = |lon, d| AngularPosition::new(CelestialBody::Mercury, lon, t(d)).unwrap();
        let station = station_between(&p(27.0, 1), &p(27.2, 2), &p(27.1, 3)).unwrap();
        assert_eq!(station, Station::Retrograde);
    }

    #[test]
    fn test_raw_and_checked_stations_agree() {
        let t = |d| Utc.with_ymd_and_hms(2024, 4, d, 0, 0, 0).unwrap();
        let p = |lon, d| AngularPosition::new(CelestialBody::Venus, lon, t(d)).unwrap();
        let tracks = [[10.0, 11.0, 10.5], [11.0, 10.5, 10.7], [10.0, 11.0, 12.0], [358.0, 0.5, 359.5]];
        for [a, b, c] in tracks {
            assert_eq!(
                station_between(&p(a, 1), &p(b, 2), &p(c, 3)).unwrap(),
                detect_station(a, b, c)
            );
        }
    }
}
