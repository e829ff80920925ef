use crate::angle::{angular_separation, ensure_finite};
use crate::aspects::types::{
    AspectObjectRef, AspectPair, AspectRelationship, AspectSet, AspectSetKind, AspectType, OrbTable,
};
use crate::ephemeris::{AngularPosition, CelestialBody, ChartPositions};
use crate::error::Result;

/// Classify the separation between two longitudes against the orb table.
///
/// Every aspect type whose residual fits its orb is a candidate; the smallest
/// residual wins and ties go to the earlier type in canonical order. `None`
/// means no aspect, which is the common case.
pub fn compute_aspect(a: f64, b: f64, orbs: &OrbTable) -> Option<AspectRelationship> {
    let separation = angular_separation(a, b);

    let mut best: Option<(AspectType, f64)> = None;
    for aspect_type in AspectType::ALL {
        let residual = (separation - aspect_type.ideal_angle()).abs();
        if residual > orbs.orb(aspect_type) {
            continue;
        }
        match best {
            Some((_, best_residual)) if residual >= best_residual => {}
            _ => best = Some((aspect_type, residual)),
        }
    }

    best.map(|(aspect_type, residual)| AspectRelationship {
        aspect_type,
        separation_degrees: separation,
        orb_used: orbs.orb(aspect_type),
        residual,
        nature: aspect_type.nature(),
    })
}

pub fn checked_compute_aspect(a: f64, b: f64, orbs: &OrbTable) -> Result<Option<AspectRelationship>> {
    ensure_finite(a, "first longitude")?;
    ensure_finite(b, "second longitude")?;
    Ok(compute_aspect(a, b, orbs))
}

/// Pair weight: combined body significance, scaled down as the aspect
/// loosens toward its orb.
fn pair_weight(a: CelestialBody, b: CelestialBody, aspect: &AspectRelationship) -> f64 {
    let tightness = if aspect.orb_used > 0.0 {
        1.0 - aspect.residual / aspect.orb_used
    } else {
        1.0
    };
    (a.weight() + b.weight()) * tightness
}

/// Aspect calculator over whole charts
pub struct AspectCalculator;

impl AspectCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Aspects between every unordered pair of bodies in one chart.
    pub fn intra_chart(&self, chart_id: &str, chart: &ChartPositions, orbs: &OrbTable) -> AspectSet {
        let positions: Vec<&AngularPosition> = chart.iter().collect();

        let mut pairs = Vec::new();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                if let Some(pair) = self.pair(chart_id, positions[i], chart_id, positions[j], orbs) {
                    pairs.push(pair);
                }
            }
        }
        sort_by_weight(&mut pairs);

        log::debug!("Computed {} aspects within chart '{}'", pairs.len(), chart_id);

        AspectSet {
            id: chart_id.to_string(),
            label: format!("{} Aspects", capitalize_first(chart_id)),
            kind: AspectSetKind::IntraChart,
            chart_ids: vec![chart_id.to_string()],
            pairs,
        }
    }

    /// Aspects from each synastry body of chart A to each of chart B.
    /// Same-named bodies are compared too (Sun to Sun is meaningful across
    /// two people).
    pub fn synastry(
        &self,
        chart_id_a: &str,
        chart_id_b: &str,
        chart_a: &ChartPositions,
        chart_b: &ChartPositions,
        orbs: &OrbTable,
    ) -> AspectSet {
        let chart_a = chart_a.restricted_to(&CelestialBody::SYNASTRY);
        let chart_b = chart_b.restricted_to(&CelestialBody::SYNASTRY);

        let mut pairs = Vec::new();
        for p1 in chart_a.iter() {
            for p2 in chart_b.iter() {
                if let Some(pair) = self.pair(chart_id_a, p1, chart_id_b, p2, orbs) {
                    pairs.push(pair);
                }
            }
        }
        sort_by_weight(&mut pairs);

        log::debug!(
            "Computed {} synastry aspects between '{}' and '{}'",
            pairs.len(),
            chart_id_a,
            chart_id_b
        );

        AspectSet {
            id: format!("{}:{}", chart_id_a, chart_id_b),
            label: format!(
                "{} / {} Aspects",
                capitalize_first(chart_id_a),
                capitalize_first(chart_id_b)
            ),
            kind: AspectSetKind::Synastry,
            chart_ids: vec![chart_id_a.to_string(), chart_id_b.to_string()],
            pairs,
        }
    }

    fn pair(
        &self,
        chart_a: &str,
        p1: &AngularPosition,
        chart_b: &str,
        p2: &AngularPosition,
        orbs: &OrbTable,
    ) -> Option<AspectPair> {
        let aspect = compute_aspect(p1.longitude(), p2.longitude(), orbs)?;
        Some(AspectPair {
            from: AspectObjectRef {
                chart_id: chart_a.to_string(),
                body: p1.body(),
            },
            to: AspectObjectRef {
                chart_id: chart_b.to_string(),
                body: p2.body(),
            },
            weight: pair_weight(p1.body(), p2.body(), &aspect),
            aspect,
        })
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}

// Stable: equal weights keep enumeration order.
fn sort_by_weight(pairs: &mut [AspectPair]) {
    pairs.sort_by(|a, b| b.weight.total_cmp(&a.weight));
}

/// Capitalize first letter of a string
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::types::AspectNature;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_no_aspect_at_45_degrees() {
        assert!(compute_aspect(15.0, 60.0, &OrbTable::default()).is_none());
    }

    #[test]
    fn test_separation_wraps_across_zero() {
        let aspect = compute_aspect(358.0, 3.0, &OrbTable::default()).unwrap();
        assert_eq!(aspect.aspect_type, AspectType::Conjunction);
        assert_abs_diff_eq!(aspect.separation_degrees, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_smallest_residual_wins_over_canonical_order() {
        // At 75 degrees square and sextile both miss by 15: square is earlier.
        let wide = OrbTable::new([20.0, 20.0, 20.0, 20.0, 20.0]).unwrap();
        let tie = compute_aspect(75.0, 0.0, &wide).unwrap();
        assert_eq!(tie.aspect_type, AspectType::Square);
        let closer = compute_aspect(80.0, 0.0, &wide).unwrap();
        assert_eq!(closer.aspect_type, AspectType::Square);
        let sextile = compute_aspect(70.0, 0.0, &wide).unwrap();
        assert_eq!(sextile.aspect_type, AspectType::Sextile);
    }

    #[test]
    fn test_residual_and_orb_recorded() {
        let aspect = compute_aspect(15.0, 137.0, &OrbTable::default()).unwrap();
        assert_eq!(aspect.aspect_type, AspectType::Trine);
        assert_abs_diff_eq!(aspect.residual, 2.0, epsilon = 1e-9);
        assert_eq!(aspect.orb_used, 8.0);
        assert_eq!(aspect.nature, AspectNature::Harmonious);
        assert!(!aspect.is_exact());
    }

    #[test]
    fn test_orb_boundary_is_inclusive() {
        let aspect = compute_aspect(0.0, 96.0, &OrbTable::default()).unwrap();
        assert_eq!(aspect.aspect_type, AspectType::Square);
        assert!(compute_aspect(0.0, 96.5, &OrbTable::default()).is_none());
    }

    #[test]
    fn test_checked_compute_aspect() {
        assert!(checked_compute_aspect(f64::NAN, 0.0, &OrbTable::default()).is_err());
        assert!(checked_compute_aspect(0.0, 1.0, &OrbTable::default()).unwrap().is_some());
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("natal"), "Natal");
        assert_eq!(capitalize_first(""), "");
    }
}
