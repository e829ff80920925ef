//! Two-chart comparison: cross aspects plus element and modality balance.

use crate::aspects::{AspectCalculator, AspectNature, AspectSet, OrbTable};
use crate::ephemeris::{CelestialBody, ChartPositions};
use crate::western::signs::{sign_for, Element, Modality, ZodiacSign};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compatibility {
    Complementary,
    Similar,
    Challenging,
}

/// Count for one element or modality, per person and combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceCount {
    pub person1: u32,
    pub person2: u32,
    pub combined: u32,
}

impl BalanceCount {
    fn new(person1: u32, person2: u32) -> Self {
        Self {
            person1,
            person2,
            combined: person1 + person2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementBalance {
    pub fire: BalanceCount,
    pub earth: BalanceCount,
    pub air: BalanceCount,
    pub water: BalanceCount,
    pub compatibility: Compatibility,
}

impl ElementBalance {
    pub fn get(&self, element: Element) -> BalanceCount {
        match element {
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Air => self.air,
            Element::Water => self.water,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalityBalance {
    pub cardinal: BalanceCount,
    pub fixed: BalanceCount,
    pub mutable: BalanceCount,
    pub compatibility: Compatibility,
}

impl ModalityBalance {
    pub fn get(&self, modality: Modality) -> BalanceCount {
        match modality {
            Modality::Cardinal => self.cardinal,
            Modality::Fixed => self.fixed,
            Modality::Mutable => self.mutable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynastryReport {
    pub aspects: AspectSet,
    pub elements: ElementBalance,
    pub modalities: ModalityBalance,
    /// `0..=100`
    pub compatibility_score: u8,
}

const ELEMENTS: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];
const MODALITIES: [Modality; 3] = [Modality::Cardinal, Modality::Fixed, Modality::Mutable];

fn synastry_signs(chart: &ChartPositions) -> impl Iterator<Item = ZodiacSign> + '_ {
    chart
        .iter()
        .filter(|p| CelestialBody::SYNASTRY.contains(&p.body()))
        .map(|p| sign_for(p.longitude()))
}

fn count_elements(chart: &ChartPositions) -> [u32; 4] {
    let mut counts = [0u32; 4];
    for sign in synastry_signs(chart) {
        let i = match sign.element() {
            Element::Fire => 0,
            Element::Earth => 1,
            Element::Air => 2,
            Element::Water => 3,
        };
        counts[i] += 1;
    }
    counts
}

fn count_modalities(chart: &ChartPositions) -> [u32; 3] {
    let mut counts = [0u32; 3];
    for sign in synastry_signs(chart) {
        let i = match sign.modality() {
            Modality::Cardinal => 0,
            Modality::Fixed => 1,
            Modality::Mutable => 2,
        };
        counts[i] += 1;
    }
    counts
}

/// Index of the largest count; the earliest wins a tie. `None` when empty.
fn dominant(counts: &[u32]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, &c) in counts.iter().enumerate() {
        if c == 0 {
            continue;
        }
        match best {
            Some((_, b)) if c <= b => {}
            _ => best = Some((i, c)),
        }
    }
    best.map(|(i, _)| i)
}

/// Fire feeds air and earth holds water.
fn elements_complement(a: Element, b: Element) -> bool {
    matches!(
        (a, b),
        (Element::Fire, Element::Air)
            | (Element::Air, Element::Fire)
            | (Element::Earth, Element::Water)
            | (Element::Water, Element::Earth)
    )
}

pub fn element_compatibility(a: Element, b: Element) -> Compatibility {
    if a == b {
        Compatibility::Similar
    } else if elements_complement(a, b) {
        Compatibility::Complementary
    } else {
        Compatibility::Challenging
    }
}

/// Mutable signs adapt to either of the others; cardinal against fixed
/// pulls in opposite directions.
pub fn modality_compatibility(a: Modality, b: Modality) -> Compatibility {
    if a == b {
        Compatibility::Similar
    } else if a == Modality::Mutable || b == Modality::Mutable {
        Compatibility::Complementary
    } else {
        Compatibility::Challenging
    }
}

pub fn element_balance(chart_a: &ChartPositions, chart_b: &ChartPositions) -> ElementBalance {
    let a = count_elements(chart_a);
    let b = count_elements(chart_b);
    let compatibility = match (dominant(&a), dominant(&b)) {
        (Some(i), Some(j)) => element_compatibility(ELEMENTS[i], ELEMENTS[j]),
        _ => Compatibility::Similar,
    };
    ElementBalance {
        fire: BalanceCount::new(a[0], b[0]),
        earth: BalanceCount::new(a[1], b[1]),
        air: BalanceCount::new(a[2], b[2]),
        water: BalanceCount::new(a[3], b[3]),
        compatibility,
    }
}

pub fn modality_balance(chart_a: &ChartPositions, chart_b: &ChartPositions) -> ModalityBalance {
    let a = count_modalities(chart_a);
    let b = count_modalities(chart_b);
    let compatibility = match (dominant(&a), dominant(&b)) {
        (Some(i), Some(j)) => modality_compatibility(MODALITIES[i], MODALITIES[j]),
        _ => Compatibility::Similar,
    };
    ModalityBalance {
        cardinal: BalanceCount::new(a[0], b[0]),
        fixed: BalanceCount::new(a[1], b[1]),
        mutable: BalanceCount::new(a[2], b[2]),
        compatibility,
    }
}

/// Score in `0..=100`, starting from 50.
///
/// Each aspect moves the score by its tightness (`1 - residual/orb`):
/// harmonious `+4`, intense `+2`, challenging `-3`. Element balance adds
/// `+10` / `+5` / `-5` for complementary / similar / challenging, modality
/// `+5` / `+3` / `-3`.
pub fn compatibility_score(
    aspects: &AspectSet,
    elements: &ElementBalance,
    modalities: &ModalityBalance,
) -> u8 {
    let mut score: f64 = 50.0;

    for pair in &aspects.pairs {
        let a = &pair.aspect;
        let tightness = if a.orb_used > 0.0 {
            1.0 - a.residual / a.orb_used
        } else {
            1.0
        };
        score += tightness
            * match a.nature {
                AspectNature::Harmonious => 4.0,
                AspectNature::Intense => 2.0,
                AspectNature::Challenging => -3.0,
            };
    }

    score += match elements.compatibility {
        Compatibility::Complementary => 10.0,
        Compatibility::Similar => 5.0,
        Compatibility::Challenging => -5.0,
    };
    score += match modalities.compatibility {
        Compatibility::Complementary => 5.0,
        Compatibility::Similar => 3.0,
        Compatibility::Challenging => -3.0,
    };

    score.round().clamp(0.0, 100.0) as u8
}

pub fn synastry_report(
    chart_id_a: &str,
    chart_id_b: &str,
    chart_a: &ChartPositions,
    chart_b: &ChartPositions,
    orbs: &OrbTable,
) -> SynastryReport {
    let aspects = AspectCalculator::new().synastry(chart_id_a, chart_id_b, chart_a, chart_b, orbs);
    let elements = element_balance(chart_a, chart_b);
    let modalities = modality_balance(chart_a, chart_b);
    let compatibility_score = compatibility_score(&aspects, &elements, &modalities);

    log::debug!(
        "Synastry '{}' / '{}': {} aspects, score {}",
        chart_id_a,
        chart_id_b,
        aspects.pairs.len(),
        compatibility_score
    );

    SynastryReport {
        aspects,
        elements,
        modalities,
        compatibility_score,
    }
}
