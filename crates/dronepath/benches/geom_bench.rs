//! Criterion benchmarks for the polygon predicates.
//! Focus sizes: vertex counts in {4, 8, 16, 64}.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use dronepath::api::{
    draw_zone_radial, point_in_polygon, segment_intersects_polygon, GeomCfg, Point, ReplayToken,
    VertexCount, ZoneCfg,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn zone_with(n: usize, seed: u64) -> Vec<Point> {
    let cfg = ZoneCfg {
        vertex_count: VertexCount::Fixed(n),
        radius: 1.0,
        ..ZoneCfg::default()
    };
    draw_zone_radial(Point::new(0.0, 0.0), cfg, ReplayToken { seed, index: 0 }).vertices
}

fn random_point(rng: &mut StdRng) -> Point {
    Point::new(rng.gen_range(-1.5..1.5), rng.gen_range(-1.5..1.5))
}

fn bench_geom(c: &mut Criterion) {
    let mut group = c.benchmark_group("geom");
    let cfg = GeomCfg::default();
    for &n in &[4usize, 8, 16, 64] {
        let verts = zone_with(n, 17);
        group.bench_with_input(BenchmarkId::new("point_in_polygon", n), &n, |b, _| {
            let mut rng = StdRng::seed_from_u64(5);
            b.iter_batched(
                || random_point(&mut rng),
                |p| point_in_polygon(p, &verts, cfg),
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(
            BenchmarkId::new("segment_intersects_polygon", n),
            &n,
            |b, _| {
                let mut rng = StdRng::seed_from_u64(6);
                b.iter_batched(
                    || (random_point(&mut rng), random_point(&mut rng)),
                    |(p, q)| segment_intersects_polygon(p, q, &verts),
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_geom);
criterion_main!(benches);
