//! Celestial position core: angle arithmetic, motion, transit durations,
//! aspects, placements and a daily result cache.
//!
//! Positions come from an external [`EphemerisSource`]; everything here is
//! pure and synchronous except the cache, which is safe to share across
//! threads.

pub mod angle;
pub mod aspects;
pub mod cache;
pub mod ephemeris;
pub mod error;
pub mod motion;
pub mod settings;
pub mod synastry;
pub mod transit;
pub mod western;

pub use angle::{angular_separation, checked_normalize, normalize_degrees};
pub use aspects::{
    checked_compute_aspect, compute_aspect, AspectCalculator, AspectNature, AspectRelationship,
    AspectSet, AspectType, OrbTable,
};
pub use cache::{CacheKey, ComputationKind, DailyCache, LocalClock, SCHEMA_VERSION};
pub use ephemeris::{AngularPosition, CelestialBody, ChartPositions, EphemerisSource, FixedEphemeris};
pub use error::{Result, SeleneError};
pub use motion::{checked_classify_motion, classify_motion, motion_between, MotionState, Station};
pub use settings::CoreSettings;
pub use synastry::{synastry_report, Compatibility, ElementBalance, ModalityBalance, SynastryReport};
pub use transit::{label_duration, DurationLabel, TransitPhase, TransitSpan};
pub use western::{seasonal_marker, sign_for, sign_ingress, Placement, SeasonalMarker, SignIngress, ZodiacSign};

/// Placements for every body in `current`, flagging retrograde motion
/// against the matching body in `previous`. Bodies missing from `previous`
/// are reported direct.
pub fn chart_placements(current: &ChartPositions, previous: &ChartPositions) -> Result<Vec<Placement>> {
    current
        .iter()
        .map(|position| match previous.get(position.body()) {
            Some(before) => Placement::from_samples(position, before, None),
            None => Placement::new(position, false, None),
        })
        .collect()
}

/// [`chart_placements`] for two instants read from `source`.
pub fn placements_from_source<S: EphemerisSource + ?Sized>(
    source: &S,
    previous_at: chrono::DateTime<chrono::Utc>,
    at: chrono::DateTime<chrono::Utc>,
) -> Result<Vec<Placement>> {
    let previous = source.positions_at(previous_at)?;
    let current = source.positions_at(at)?;
    chart_placements(&current, &previous)
}
