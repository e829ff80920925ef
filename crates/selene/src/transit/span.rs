use crate::error::{Result, SeleneError};
use crate::transit::duration::{label_duration, DurationLabel};
use chrono::NaiveDate;
use selene_config::TransitSettings;
use serde::{Deserialize, Serialize};

/// A time-bounded astrological event, e.g. a planet's stay in one sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTransitSpan")]
pub struct TransitSpan {
    total_days: u32,
    remaining_days: u32,
    label: String,
}

// Deserialization goes through `TransitSpan::new`; an incoming label is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransitSpan {
    total_days: u32,
    remaining_days: u32,
}

impl TryFrom<RawTransitSpan> for TransitSpan {
    type Error = SeleneError;

    fn try_from(raw: RawTransitSpan) -> Result<Self> {
        TransitSpan::new(raw.total_days, raw.remaining_days)
    }
}

impl TransitSpan {
    pub fn new(total_days: u32, remaining_days: u32) -> Result<Self> {
        if remaining_days > total_days {
            return Err(SeleneError::RemainingExceedsTotal {
                remaining: remaining_days,
                total: total_days,
            });
        }
        Ok(Self {
            total_days,
            remaining_days,
            label: label_duration(total_days).to_string(),
        })
    }

    /// Span from `start` to `end`, with remaining days counted from `today`
    /// and clamped into `[0, total]`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Result<Self> {
        let total = (end - start).num_days();
        if total < 0 {
            return Err(SeleneError::NegativeDuration { days: total });
        }
        let total = u32::try_from(total).unwrap_or(u32::MAX);
        let remaining = (end - today).num_days().clamp(0, total as i64) as u32;
        Self::new(total, remaining)
    }

    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    pub fn remaining_days(&self) -> u32 {
        self.remaining_days
    }

    pub fn elapsed_days(&self) -> u32 {
        self.total_days - self.remaining_days
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn duration_label(&self) -> DurationLabel {
        label_duration(self.total_days)
    }

    pub fn phase(&self, bands: &TransitBands) -> TransitPhase {
        bands.phase_of(self.total_days, self.remaining_days)
    }
}

/// Where a transit sits in its lifetime, for styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitPhase {
    Beginning,
    Mid,
    Ending,
}

/// Thresholds for [`TransitPhase`]. Presentation only; nothing about label
/// correctness depends on them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitBands {
    pub ending_fraction: f64,
    pub ending_cap_days: u32,
    pub mid_fraction: f64,
}

impl Default for TransitBands {
    fn default() -> Self {
        Self::from_settings(&TransitSettings::default())
    }
}

impl TransitBands {
    pub fn from_settings(settings: &TransitSettings) -> Self {
        Self {
            ending_fraction: settings.ending_fraction,
            ending_cap_days: settings.ending_cap_days,
            mid_fraction: settings.mid_fraction,
        }
    }

    /// `min(total * ending_fraction, ending_cap_days)`
    pub fn ending_threshold(&self, total_days: u32) -> f64 {
        (total_days as f64 * self.ending_fraction).min(self.ending_cap_days as f64)
    }

    pub fn mid_threshold(&self, total_days: u32) -> f64 {
        total_days as f64 * self.mid_fraction
    }

    pub fn phase_of(&self, total_days: u32, remaining_days: u32) -> TransitPhase {
        let remaining = remaining_days as f64;
        if remaining <= self.ending_threshold(total_days) {
            TransitPhase::Ending
        } else if remaining <= self.mid_threshold(total_days) {
            TransitPhase::Mid
        } else {
            TransitPhase::Beginning
        }
    }
}
