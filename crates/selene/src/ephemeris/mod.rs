pub mod source;
pub mod types;

pub use source::{EphemerisSource, FixedEphemeris};
pub use types::{AngularPosition, CelestialBody, ChartPositions};
