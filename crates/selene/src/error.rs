use chrono::{DateTime, Utc};
use thiserror::Error;

/// Precondition violations raised by the checked entry points.
///
/// "No aspect within orb" is never an error; it is `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeleneError {
    #[error("Non-finite angle for {context}: {value}")]
    NonFiniteAngle { context: String, value: f64 },
    #[error("Duration must be non-negative, got {days} days")]
    NegativeDuration { days: i64 },
    #[error("Remaining days ({remaining}) exceed total days ({total})")]
    RemainingExceedsTotal { remaining: u32, total: u32 },
    #[error("Unknown celestial body: {name}")]
    UnknownBody { name: String },
    #[error("Unknown zodiac sign: {name}")]
    UnknownSign { name: String },
    #[error("House must be within 1..=12, got {house}")]
    InvalidHouse { house: u8 },
    #[error("Invalid orb for {aspect}: {orb}. Orbs must be finite and within [0, 90)")]
    InvalidOrb { aspect: String, orb: f64 },
    #[error("UTC offset out of range: {minutes} minutes")]
    InvalidUtcOffset { minutes: i32 },
    #[error("Invalid bucket date: {value}. Expected YYYY-MM-DD")]
    InvalidBucketDate { value: String },
    #[error("Samples belong to different bodies: expected {expected}, found {found}")]
    BodyMismatch { expected: String, found: String },
    #[error("Samples out of order: previous at {previous} is not before current at {current}")]
    SampleOrder {
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
    #[error("No ephemeris data for {instant}")]
    MissingEphemeris { instant: DateTime<Utc> },
}

pub type Result<T> = std::result::Result<T, SeleneError>;
