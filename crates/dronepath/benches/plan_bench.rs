//! Criterion benchmarks for full searches.
//! - open field, default configuration (greedy diagonal, ~9.4k expansions)
//! - coarse hops around random zones (m in {0, 4, 8})

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dronepath::api::{
    draw_zones_in_box, PathSearch, Point, Region, SearchCfg, VertexCount, ZoneCfg,
};

fn far_area() -> Region {
    Region::new(
        "central",
        vec![
            Point::new(5.0, 5.0),
            Point::new(6.0, 5.0),
            Point::new(6.0, 6.0),
            Point::new(5.0, 6.0),
        ],
    )
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    group.sample_size(10);
    let area = far_area();

    group.bench_function("open_field_default", |b| {
        let search = PathSearch::new(SearchCfg::default(), &[], &area);
        b.iter(|| search.run(Point::new(0.0, 0.0), Point::new(1.0, 1.0)))
    });

    let cfg = SearchCfg {
        step_length: 0.05,
        close_distance: 0.03,
        max_iterations: 5_000,
        ..SearchCfg::default()
    };
    let zone_cfg = ZoneCfg {
        vertex_count: VertexCount::Uniform { min: 4, max: 8 },
        radius: 0.06,
        ..ZoneCfg::default()
    };
    for &m in &[0usize, 4, 8] {
        let zones = draw_zones_in_box(Point::new(0.2, -0.3), Point::new(0.8, 0.3), m, zone_cfg, 42);
        group.bench_with_input(BenchmarkId::new("random_zones", m), &m, |b, _| {
            let search = PathSearch::new(cfg, &zones, &area);
            b.iter(|| search.run(Point::new(0.0, 0.0), Point::new(1.0, 0.0)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_plan);
criterion_main!(benches);
