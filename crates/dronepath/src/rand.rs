//! Random star-shaped zones (radial jitter + replay tokens).
//!
//! Purpose
//! - Deterministic obstacle generator for benches, property tests and the CLI
//!   `scenario` command. Zones are simple (non-self-intersecting) but not
//!   necessarily convex, which exercises the even-odd rule.
//!
//! Model
//! - `n` equally spaced angles around a center, with bounded angular and
//!   radial jitter; vertices are emitted in angle order so the loop is simple.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::{Point, Region};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct ZoneCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    /// Mean distance from center to a vertex, in degrees.
    pub radius: f64,
}

impl Default for ZoneCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform { min: 4, max: 9 },
            angle_jitter_frac: 0.3,
            radial_jitter: 0.35,
            radius: 0.0005,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a simple star-shaped zone around `center`.
///
/// Every vertex lies within `radius * (1 + radial_jitter)` of the center, and
/// the center itself is strictly inside.
pub fn draw_zone_radial(center: Point, cfg: ZoneCfg, tok: ReplayToken) -> Region {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    // Keep every angular gap below π so the center stays inside.
    let aj = cfg
        .angle_jitter_frac
        .clamp(0.0, 0.49)
        .min(n as f64 / 4.0 - 0.501);
    let rj = cfg.radial_jitter.clamp(0.0, 0.95);
    let delta = std::f64::consts::TAU / n as f64;
    let phase = rng.gen::<f64>() * std::f64::consts::TAU;
    let vertices = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let th = phase + k as f64 * delta + jitter;
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = cfg.radius * (1.0 + u);
            Point::new(center.lng + r * th.cos(), center.lat + r * th.sin())
        })
        .collect();
    Region::new(format!("zone-{}-{}", tok.seed, tok.index), vertices)
}

/// Draw `count` zones with centers uniform in the box spanned by `lo`/`hi`.
pub fn draw_zones_in_box(
    lo: Point,
    hi: Point,
    count: usize,
    cfg: ZoneCfg,
    seed: u64,
) -> Vec<Region> {
    (0..count as u64)
        .map(|index| {
            let tok = ReplayToken { seed, index };
            let mut rng = tok.to_std_rng();
            let center = Point::new(
                lo.lng + rng.gen::<f64>() * (hi.lng - lo.lng),
                lo.lat + rng.gen::<f64>() * (hi.lat - lo.lat),
            );
            // Offset the index so the shape RNG differs from the center RNG.
            let shape_tok = ReplayToken {
                seed,
                index: index.wrapping_add(1 << 32),
            };
            let mut zone = draw_zone_radial(center, cfg, shape_tok);
            zone.name = format!("zone-{seed}-{index}");
            zone
        })
        .collect()
}
