use crate::ephemeris::types::{AngularPosition, ChartPositions};
use crate::error::{Result, SeleneError};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Supplier of body positions. Implementations wrap an external provider;
/// this crate never integrates orbits itself.
pub trait EphemerisSource {
    fn positions_at(&self, instant: DateTime<Utc>) -> Result<ChartPositions>;
}

/// Ephemeris backed by positions already in memory, keyed by instant.
#[derive(Debug, Clone, Default)]
pub struct FixedEphemeris {
    samples: BTreeMap<DateTime<Utc>, ChartPositions>,
}

impl FixedEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position under its own `sampled_at` instant.
    pub fn insert(&mut self, position: AngularPosition) {
        self.samples
            .entry(position.sampled_at())
            .or_default()
            .insert(position);
    }

    pub fn extend<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = AngularPosition>,
    {
        for p in positions {
            self.insert(p);
        }
    }

    pub fn instants(&self) -> impl Iterator<Item = &DateTime<Utc>> {
        self.samples.keys()
    }
}

impl EphemerisSource for FixedEphemeris {
    fn positions_at(&self, instant: DateTime<Utc>) -> Result<ChartPositions> {
        self.samples
            .get(&instant)
            .cloned()
            .ok_or(SeleneError::MissingEphemeris { instant })
    }
}
