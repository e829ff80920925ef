use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use selene::aspects::{compute_aspect, AspectCalculator, OrbTable};
use selene::ephemeris::{AngularPosition, CelestialBody, ChartPositions};

fn full_chart(offset: f64) -> ChartPositions {
    let at = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    ChartPositions::from_positions(CelestialBody::ALL.iter().enumerate().map(|(i, &body)| {
        AngularPosition::new(body, offset + (i as f64) * 23.7, at).unwrap()
    }))
}

fn bench_compute_aspect(c: &mut Criterion) {
    let orbs = OrbTable::default();

    c.bench_function("compute_aspect", |b| {
        b.iter(|| compute_aspect(black_box(100.0), black_box(218.5), black_box(&orbs)))
    });
}

fn bench_intra_chart(c: &mut Criterion) {
    let calculator = AspectCalculator::new();
    let chart = full_chart(0.0);
    let orbs = OrbTable::default();

    c.bench_function("intra_chart_aspects", |b| {
        b.iter(|| calculator.intra_chart(black_box("natal"), black_box(&chart), black_box(&orbs)))
    });
}

fn bench_synastry(c: &mut Criterion) {
    let calculator = AspectCalculator::new();
    let a = full_chart(0.0);
    let b_chart = full_chart(41.0);
    let orbs = OrbTable::default();

    c.bench_function("synastry_aspects", |b| {
        b.iter(|| {
            calculator.synastry(
                black_box("a"),
                black_box("b"),
                black_box(&a),
                black_box(&b_chart),
                black_box(&orbs),
            )
        })
    });
}

criterion_group!(benches, bench_compute_aspect, bench_intra_chart, bench_synastry);
criterion_main!(benches);
