use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mapsheet::{
    geo::{curve::PathCurve, Point},
    CountryLabel, HexLabel, HexLattice, LabelLine, MapConfig, MapSheet,
    MapSource, Region,
};

/// A 60x40 lattice with a grid of square islands, each one labeled with its
/// own country
fn source() -> MapSource {
    let lattice = HexLattice::new(Point::ORIGIN, 30.0, 20.0, 60, 40);
    let mut landmasses = Vec::new();
    let mut hex_labels = Vec::new();
    for i in 0..10 {
        for j in 0..10 {
            let (x, y) = (i as f64 * 180.0 + 20.0, j as f64 * 90.0 + 20.0);
            let corners = [
                Point::new(x, y),
                Point::new(x + 120.0, y),
                Point::new(x + 120.0, y + 60.0),
                Point::new(x, y + 60.0),
            ];
            landmasses.push(Region::new(
                format!("island {}-{}", i, j),
                PathCurve::polyline(&corners, true),
            ));
            hex_labels.push(HexLabel::new(
                Point::new(x + 5.0, y + 5.0),
                vec![LabelLine::Country(CountryLabel::new(
                    format!("country {}-{}", i, j),
                    vec![],
                ))],
            ));
        }
    }

    MapSource {
        ocean: lattice.outline(),
        landmasses,
        hex_labels,
        ..Default::default()
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("map-compilation");
    group.sample_size(10);

    let source = source();
    let config = MapConfig::default();
    group.bench_function("compile", |b| {
        b.iter(|| MapSheet::compile(black_box(config.clone()), &source))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
