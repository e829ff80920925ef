//! Degree arithmetic on the ecliptic circle.

use crate::error::{Result, SeleneError};

pub const FULL_CIRCLE: f64 = 360.0;
pub const HALF_CIRCLE: f64 = 180.0;

/// Reduce any finite degree measure to `[0, 360)`.
///
/// Uses floor-modulo, so negative inputs never come back negative:
/// `-370 -> 350`, `400 -> 40`, `360 -> 0`. Non-finite input is a caller
/// bug; use [`checked_normalize`] on untrusted data.
pub fn normalize_degrees(degrees: f64) -> f64 {
    debug_assert!(degrees.is_finite(), "normalize_degrees called with {degrees}");
    let r = degrees.rem_euclid(FULL_CIRCLE);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if r >= FULL_CIRCLE {
        0.0
    } else {
        r
    }
}

/// Validating form of [`normalize_degrees`]. `context` names the value in the
/// error (e.g. `"moon longitude"`).
pub fn checked_normalize(degrees: f64, context: &str) -> Result<f64> {
    ensure_finite(degrees, context)?;
    Ok(normalize_degrees(degrees))
}

pub fn ensure_finite(value: f64, context: &str) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SeleneError::NonFiniteAngle {
            context: context.to_string(),
            value,
        })
    }
}

/// Minimal angular distance between two longitudes, in `[0, 180]`.
///
/// Bit-for-bit symmetric in its arguments.
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let raw = (normalize_degrees(a) - normalize_degrees(b)).abs();
    if raw > HALF_CIRCLE {
        FULL_CIRCLE - raw
    } else {
        raw
    }
}
