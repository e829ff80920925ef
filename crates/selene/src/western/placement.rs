//! Birth-chart placement records.

use crate::ephemeris::{AngularPosition, CelestialBody};
use crate::error::{Result, SeleneError};
use crate::motion::motion_between;
use crate::western::signs::{degree_in_sign, sign_for, ZodiacSign};
use serde::{Deserialize, Serialize};

/// One body as it appears in a chart: sign, degree and minute within the
/// sign, and whether it was moving backwards at the time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub body: CelestialBody,
    pub sign: ZodiacSign,
    pub degree: u8,
    pub minute: u8,
    pub ecliptic_longitude: f64,
    pub retrograde: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
}

impl Placement {
    /// Placement from an already-known direction of motion.
    pub fn new(position: &AngularPosition, retrograde: bool, house: Option<u8>) -> Result<Self> {
        if let Some(h) = house {
            if !(1..=12).contains(&h) {
                return Err(SeleneError::InvalidHouse { house: h });
            }
        }

        let lon = position.longitude();
        let within = degree_in_sign(lon);
        let degree = within.floor();
        let minute = ((within - degree) * 60.0).floor().min(59.0);

        Ok(Self {
            body: position.body(),
            sign: sign_for(lon),
            degree: degree as u8,
            minute: minute as u8,
            ecliptic_longitude: lon,
            retrograde,
            house,
        })
    }

    /// Placement for `current`, with the retrograde flag derived from the
    /// sample taken just before it.
    pub fn from_samples(
        current: &AngularPosition,
        previous: &AngularPosition,
        house: Option<u8>,
    ) -> Result<Self> {
        let motion = motion_between(previous, current)?;
        Self::new(current, motion.is_retrograde, house)
    }

    /// e.g. `"15°30' Aries"`
    pub fn format_position(&self) -> String {
        format!("{}°{:02}' {}", self.degree, self.minute, self.sign)
    }
}
