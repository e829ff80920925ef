//! Zodiac signs and their element, modality and ruler.
//!
//! Each sign spans 30 degrees of ecliptic longitude starting at 0° Aries.

use crate::angle::normalize_degrees;
use crate::ephemeris::CelestialBody;
use crate::error::SeleneError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SIGN_SPAN_DEGREES: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignMeta {
    pub sign: ZodiacSign,
    pub name: String,
    pub ruler: CelestialBody,
    pub element: Element,
    pub modality: Modality,
}

lazy_static::lazy_static! {
    static ref SIGNS: Vec<SignMeta> = {
        use crate::ephemeris::CelestialBody::*;
        use crate::western::signs::Element::*;
        use crate::western::signs::Modality::*;
        let table = [
            (ZodiacSign::Aries, Mars, Fire, Cardinal),
            (ZodiacSign::Taurus, Venus, Earth, Fixed),
            (ZodiacSign::Gemini, Mercury, Air, Mutable),
            (ZodiacSign::Cancer, Moon, Water, Cardinal),
            (ZodiacSign::Leo, Sun, Fire, Fixed),
            (ZodiacSign::Virgo, Mercury, Earth, Mutable),
            (ZodiacSign::Libra, Venus, Air, Cardinal),
            (ZodiacSign::Scorpio, Mars, Water, Fixed),
            (ZodiacSign::Sagittarius, Jupiter, Fire, Mutable),
            (ZodiacSign::Capricorn, Saturn, Earth, Cardinal),
            (ZodiacSign::Aquarius, Saturn, Air, Fixed),
            (ZodiacSign::Pisces, Jupiter, Water, Mutable),
        ];
        table
            .iter()
            .map(|&(sign, ruler, element, modality)| SignMeta {
                sign,
                name: format!("{:?}", sign),
                ruler,
                element,
                modality,
            })
            .collect()
    };
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> ZodiacSign {
        Self::ALL[index % 12]
    }

    pub fn meta(&self) -> &'static SignMeta {
        &SIGNS[self.index()]
    }

    pub fn name(&self) -> &'static str {
        &self.meta().name
    }

    pub fn element(&self) -> Element {
        self.meta().element
    }

    pub fn modality(&self) -> Modality {
        self.meta().modality
    }

    /// Traditional ruler.
    pub fn ruler(&self) -> CelestialBody {
        self.meta().ruler
    }

    /// Longitude where the sign begins.
    pub fn start_longitude(&self) -> f64 {
        self.index() as f64 * SIGN_SPAN_DEGREES
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZodiacSign {
    type Err = SeleneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ZodiacSign::ALL
            .iter()
            .copied()
            .find(|sign| sign.name().to_lowercase() == lower)
            .ok_or_else(|| SeleneError::UnknownSign { name: s.to_string() })
    }
}

/// Sign containing the given longitude (any range).
pub fn sign_for(longitude: f64) -> ZodiacSign {
    let lon = normalize_degrees(longitude);
    ZodiacSign::from_index((lon / SIGN_SPAN_DEGREES).floor() as usize)
}

/// Degrees into the containing sign, `0 <= x < 30`.
pub fn degree_in_sign(longitude: f64) -> f64 {
    let lon = normalize_degrees(longitude);
    lon - sign_for(lon).start_longitude()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sign_for_longitude() {
        assert_eq!(sign_for(0.0), ZodiacSign::Aries);
        assert_eq!(sign_for(29.999), ZodiacSign::Aries);
        assert_eq!(sign_for(30.0), ZodiacSign::Taurus);
        assert_eq!(sign_for(280.0), ZodiacSign::Capricorn);
        assert_eq!(sign_for(359.99), ZodiacSign::Pisces);
        assert_eq!(sign_for(-1.0), ZodiacSign::Pisces);
        assert_eq!(sign_for(360.0), ZodiacSign::Aries);
    }

    #[test]
    fn test_degree_in_sign() {
        assert_eq!(degree_in_sign(45.5), 15.5);
        assert_eq!(degree_in_sign(0.0), 0.0);
        assert!(degree_in_sign(359.999) < SIGN_SPAN_DEGREES);
    }

    #[test]
    fn test_sign_meta() {
        assert_eq!(ZodiacSign::Leo.element(), Element::Fire);
        assert_eq!(ZodiacSign::Leo.modality(), Modality::Fixed);
        assert_eq!(ZodiacSign::Leo.ruler(), CelestialBody::Sun);
        assert_eq!(ZodiacSign::Pisces.element(), Element::Water);
        assert_eq!(ZodiacSign::Gemini.modality(), Modality::Mutable);
        assert_eq!(ZodiacSign::Capricorn.name(), "Capricorn");
    }

    #[test]
    fn test_sign_from_str() {
        assert_eq!("libra".parse::<ZodiacSign>().unwrap(), ZodiacSign::Libra);
        assert_eq!("Libra".parse::<ZodiacSign>().unwrap(), ZodiacSign::Libra);
        assert!("Ophiuchus".parse::<ZodiacSign>().is_err());
    }

    #[test]
    fn test_each_element_has_one_sign_per_modality() {
        for element in [Element::Fire, Element::Earth, Element::Air, Element::Water] {
            let modalities: HashSet<Modality> = ZodiacSign::ALL
                .iter()
                .filter(|s| s.element() == element)
                .map(|s| s.modality())
                .collect();
            assert_eq!(modalities.len(), 3);
        }
    }
}
