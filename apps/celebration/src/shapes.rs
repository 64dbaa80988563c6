//! Procedural point clouds the particles morph between.
//!
//! Every generator takes its random source explicitly, so a seeded rng gives
//! the same cloud every time. Output length is always exactly `count`.

use std::f32::consts::{PI, TAU};

use evergreen_engine::lerp_rgb;
use rand::Rng;

use crate::palette::{self, Rgb};

/// Share of tree points that form the body; the rest are ornaments.
const TREE_BODY_SHARE: f32 = 0.85;
const TREE_HEIGHT: f32 = 30.0;
const TREE_BASE_RADIUS: f32 = 15.0;
/// Turns of the spiral over the full tree height, in radians per unit height.
const TREE_TWIST: f32 = 50.0;
/// Ornaments above this normalized height are always gold (the star).
const TREE_STAR_HEIGHT: f32 = 0.98;

const GALAXY_RADIUS: f32 = 30.0;
const GALAXY_ARMS: u32 = 3;
const GALAXY_SPIN: f32 = 0.5;
const GALAXY_SCATTER: f32 = 5.0;

/// Positions plus optional per-point colors of the same length.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    pub positions: Vec<[f32; 3]>,
    pub colors: Option<Vec<Rgb>>,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Solid ball: radius `radius * cbrt(u)` keeps density uniform in volume.
pub fn sphere(rng: &mut impl Rng, count: usize, radius: f32) -> Vec<[f32; 3]> {
    (0..count)
        .map(|_| {
            let r = radius * rng.gen::<f32>().cbrt();
            let theta = rng.gen::<f32>() * TAU;
            let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
            [
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
            ]
        })
        .collect()
}

/// Spiral cone with green body points and red/gold/blue ornaments.
pub fn tree(rng: &mut impl Rng, count: usize) -> PointCloud {
    let dark = palette::rgb(palette::TREE_DARK);
    let light = palette::rgb(palette::TREE_LIGHT);
    let gold = palette::rgb(palette::GOLD);
    let red = palette::rgb(palette::ORNAMENT_RED);
    let blue = palette::rgb(palette::ORNAMENT_BLUE);

    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);

    for _ in 0..count {
        let is_body = rng.gen::<f32>() < TREE_BODY_SHARE;

        let h = rng.gen::<f32>();
        let r = (1.0 - h) * TREE_BASE_RADIUS * rng.gen::<f32>().sqrt();
        let theta = h * TREE_TWIST + rng.gen::<f32>() * TAU;

        positions.push([r * theta.cos(), h * TREE_HEIGHT - TREE_HEIGHT * 0.5, r * theta.sin()]);

        let color = if is_body {
            lerp_rgb(dark, light, rng.gen())
        } else {
            let choice = rng.gen::<f32>();
            if h > TREE_STAR_HEIGHT {
                gold
            } else if choice < 0.33 {
                red
            } else if choice < 0.66 {
                gold
            } else {
                blue
            }
        };
        colors.push(color);
    }

    PointCloud { positions, colors: Some(colors) }
}

/// Three-armed spiral starfield. Half the points take a bright star color,
/// the rest shade from orange at the core to violet at the rim.
pub fn galaxy(rng: &mut impl Rng, count: usize) -> PointCloud {
    let center = palette::rgb(palette::GALAXY_CENTER);
    let edge = palette::rgb(palette::GALAXY_EDGE);

    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);

    for _ in 0..count {
        let r = rng.gen::<f32>() * GALAXY_RADIUS;
        let spin = r * GALAXY_SPIN;
        let branch = rng.gen_range(0..GALAXY_ARMS) as f32 * 2.0 * PI / GALAXY_ARMS as f32;

        let jx = scatter(rng);
        let jy = scatter(rng);
        let jz = scatter(rng);

        positions.push([
            (branch + spin).cos() * r + jx,
            (rng.gen::<f32>() - 0.5) * (r / 2.0) + jy,
            (branch + spin).sin() * r + jz,
        ]);

        let color = if rng.gen::<f32>() > 0.5 {
            let pick = rng.gen_range(0..palette::GALAXY_STARS.len());
            palette::rgb(palette::GALAXY_STARS[pick])
        } else {
            lerp_rgb(center, edge, r / GALAXY_RADIUS)
        };
        colors.push(color);
    }

    PointCloud { positions, colors: Some(colors) }
}

/// Signed cubic falloff: most points stay near the arm, a few stray far.
fn scatter(rng: &mut impl Rng) -> f32 {
    let sign = if rng.gen::<f32>() < 0.5 { 1.0 } else { -1.0 };
    rng.gen::<f32>().powi(3) * sign * GALAXY_SCATTER
}
