//! The particle cloud: a fixed-size buffer that eases toward a per-phase target.

use evergreen_engine::{approach, PointUniforms};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::palette::{self, Rgb};
use crate::phase::Phase;
use crate::shapes;
use crate::text;

/// Fraction of the remaining distance covered each frame.
pub const EASE_SPEED: f32 = 0.08;
const NOISE_STRENGTH: f32 = 0.05;
const NOISE_SCALE: f32 = 0.2;

const INITIAL_RADIUS: f32 = 30.0;
const IDLE_RADIUS: f32 = 15.0;
const STARFIELD_RADIUS: f32 = 50.0;
const YEAR_TEXT: &str = "2026";
const YEAR_FONT_SIZE: f32 = 200.0;

/// Per-frame yaw increments, radians.
const TREE_SPIN: f32 = 0.005;
const STARFIELD_SPIN: f32 = 0.001;
/// Idle sway: `sin(t * SWAY_RATE) * SWAY_AMPLITUDE`.
const SWAY_RATE: f32 = 0.1;
const SWAY_AMPLITUDE: f32 = 0.2;

pub const POINT_SIZE: f32 = 0.15;
const OPACITY: f32 = 0.9;
const STARFIELD_OPACITY: f32 = 0.3;

/// Target positions and, when the phase repaints the cloud, new colors.
pub struct PhaseTarget {
    pub positions: Vec<[f32; 3]>,
    pub colors: Option<Vec<Rgb>>,
}

/// Build the target cloud for `phase`. Countdown digits after the first keep
/// whatever colors are already showing.
pub fn target_for(rng: &mut SmallRng, phase: Phase, count: usize) -> PhaseTarget {
    match phase {
        Phase::Idle => PhaseTarget {
            positions: shapes::sphere(rng, count, IDLE_RADIUS),
            colors: Some(palette::solid(palette::GOLD, count)),
        },
        Phase::Countdown5 => PhaseTarget {
            positions: text::text_silhouette(rng, "5", count, text::DEFAULT_FONT_SIZE),
            colors: Some(palette::solid(palette::GOLD, count)),
        },
        Phase::Countdown4 | Phase::Countdown3 | Phase::Countdown2 | Phase::Countdown1 => {
            let digit = phase.countdown_digit().unwrap_or(0).to_string();
            PhaseTarget {
                positions: text::text_silhouette(rng, &digit, count, text::DEFAULT_FONT_SIZE),
                colors: None,
            }
        }
        Phase::YearReveal => PhaseTarget {
            positions: text::text_silhouette(rng, YEAR_TEXT, count, YEAR_FONT_SIZE),
            colors: Some(palette::solid(palette::LEMON_CHIFFON, count)),
        },
        Phase::TreeFormation => {
            let cloud = shapes::tree(rng, count);
            PhaseTarget { positions: cloud.positions, colors: cloud.colors }
        }
        Phase::PhotoWall => PhaseTarget {
            positions: shapes::sphere(rng, count, STARFIELD_RADIUS),
            colors: Some(palette::solid(palette::WHITE, count)),
        },
    }
}

/// One easing step: move every point a fixed fraction toward its target, then
/// optionally nudge x/y with time-varying noise keyed off the point's own
/// pre-step coordinates.
pub fn ease_toward(positions: &mut [[f32; 3]], targets: &[[f32; 3]], noise_time: Option<f32>) {
    let amp = NOISE_STRENGTH * NOISE_SCALE;
    for (p, t) in positions.iter_mut().zip(targets) {
        let [cx, cy, _] = *p;
        for axis in 0..3 {
            p[axis] = approach(p[axis], t[axis], EASE_SPEED);
        }
        if let Some(time) = noise_time {
            p[0] += (time + cy).sin() * amp;
            p[1] += (time + cx).cos() * amp;
        }
    }
}

/// Owns the particle buffers. Length never changes after construction.
pub struct ParticleAnimator {
    positions: Vec<[f32; 3]>,
    targets: Vec<[f32; 3]>,
    colors: Vec<Rgb>,
    colors_dirty: bool,
    phase: Phase,
    rotation_y: f32,
    rng: SmallRng,
}

impl ParticleAnimator {
    /// Start as a loose gold ball easing toward the idle sphere.
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let positions = shapes::sphere(&mut rng, count, INITIAL_RADIUS);
        let mut animator = Self {
            targets: vec![[0.0; 3]; count],
            colors: palette::solid(palette::GOLD, count),
            colors_dirty: true,
            positions,
            phase: Phase::Idle,
            rotation_y: 0.0,
            rng,
        };
        animator.apply_phase(Phase::Idle);
        animator
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Replace the target (and maybe colors) for a newly observed phase.
    pub fn apply_phase(&mut self, phase: Phase) {
        let count = self.positions.len();
        let target = target_for(&mut self.rng, phase, count);
        debug_assert_eq!(target.positions.len(), count);
        self.targets = target.positions;
        if let Some(colors) = target.colors {
            self.colors = colors;
            self.colors_dirty = true;
        }
        self.phase = phase;
    }

    /// Clear the color upload flag. Called at the start of each frame, after
    /// the previous frame's render published it.
    pub fn begin_frame(&mut self) {
        self.colors_dirty = false;
    }

    /// Advance one rendered frame. `elapsed` is the clock time in seconds.
    pub fn tick(&mut self, elapsed: f32) {
        let noise = if self.phase == Phase::TreeFormation { None } else { Some(elapsed) };
        ease_toward(&mut self.positions, &self.targets, noise);

        self.rotation_y = match self.phase {
            Phase::TreeFormation => self.rotation_y + TREE_SPIN,
            Phase::PhotoWall => self.rotation_y + STARFIELD_SPIN,
            _ => (elapsed * SWAY_RATE).sin() * SWAY_AMPLITUDE,
        };
    }

    pub fn opacity(&self) -> f32 {
        if self.phase == Phase::PhotoWall {
            STARFIELD_OPACITY
        } else {
            OPACITY
        }
    }

    pub fn uniforms(&self) -> PointUniforms {
        PointUniforms {
            rotation_y: self.rotation_y,
            opacity: self.opacity(),
            point_size: POINT_SIZE,
            colors_dirty: if self.colors_dirty { 1.0 } else { 0.0 },
            count: self.positions.len() as f32,
            ..PointUniforms::default()
        }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn targets(&self) -> &[[f32; 3]] {
        &self.targets
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn colors_dirty(&self) -> bool {
        self.colors_dirty
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: &[[f32; 3]], b: &[[f32; 3]]) -> f32 {
        a.iter()
            .zip(b)
            .map(|(p, q)| ((p[0] - q[0]).powi(2) + (p[1] - q[1]).powi(2) + (p[2] - q[2]).powi(2)).sqrt())
            .sum()
    }

    #[test]
    fn every_phase_target_fills_the_buffer() {
        let mut rng = SmallRng::seed_from_u64(1);
        for phase in Phase::ALL {
            let target = target_for(&mut rng, phase, 800);
            assert_eq!(target.positions.len(), 800, "{phase}");
            assert!(target.positions.iter().flatten().all(|v| v.is_finite()), "{phase}");
            if let Some(colors) = &target.colors {
                assert_eq!(colors.len(), 800);
            }
        }
    }

    #[test]
    fn color_table() {
        let mut rng = SmallRng::seed_from_u64(2);
        assert!(target_for(&mut rng, Phase::Countdown4, 10).colors.is_none());
        assert!(target_for(&mut rng, Phase::Countdown1, 10).colors.is_none());
        let year = target_for(&mut rng, Phase::YearReveal, 10).colors.unwrap();
        assert_eq!(year[0], palette::rgb(palette::LEMON_CHIFFON));
        let wall = target_for(&mut rng, Phase::PhotoWall, 10).colors.unwrap();
        assert_eq!(wall[9], [1.0, 1.0, 1.0]);
    }

    #[test]
    fn same_phase_twice_regenerates() {
        let mut animator = ParticleAnimator::new(500, 3);
        animator.apply_phase(Phase::TreeFormation);
        let first = animator.targets().to_vec();
        animator.apply_phase(Phase::TreeFormation);
        assert_eq!(animator.targets().len(), first.len());
        assert_ne!(animator.targets(), first.as_slice());
    }

    #[test]
    fn easing_without_noise_converges() {
        let mut positions = vec![[10.0, -4.0, 2.0], [0.0, 0.0, 0.0]];
        let targets = vec![[0.0, 0.0, 0.0], [3.0, 3.0, 3.0]];
        let mut last = distance(&positions, &targets);
        for _ in 0..120 {
            ease_toward(&mut positions, &targets, None);
            let d = distance(&positions, &targets);
            assert!(d < last);
            last = d;
        }
        assert!(last < 1e-2);
    }

    #[test]
    fn easing_step_is_a_fixed_fraction() {
        let mut positions = vec![[10.0, 0.0, 0.0]];
        ease_toward(&mut positions, &[[0.0, 0.0, 0.0]], None);
        assert!((positions[0][0] - 9.2).abs() < 1e-5);
    }

    #[test]
    fn noise_uses_pre_step_coordinates() {
        let mut positions = vec![[1.0, 2.0, 0.0]];
        let targets = vec![[1.0, 2.0, 0.0]];
        ease_toward(&mut positions, &targets, Some(0.5));
        let amp = 0.05 * 0.2;
        assert!((positions[0][0] - (1.0 + (0.5f32 + 2.0).sin() * amp)).abs() < 1e-6);
        assert!((positions[0][1] - (2.0 + (0.5f32 + 1.0).cos() * amp)).abs() < 1e-6);
    }

    #[test]
    fn buffer_length_is_fixed() {
        let mut animator = ParticleAnimator::new(321, 4);
        for phase in Phase::ALL {
            animator.apply_phase(phase);
            animator.tick(1.0);
            assert_eq!(animator.positions().len(), 321);
            assert_eq!(animator.colors().len(), 321);
            assert_eq!(animator.targets().len(), 321);
        }
    }

    #[test]
    fn rotation_and_opacity_follow_phase() {
        let mut animator = ParticleAnimator::new(10, 5);
        animator.tick(5.0);
        assert!((animator.rotation_y() - (0.5f32).sin() * 0.2).abs() < 1e-6);
        assert_eq!(animator.opacity(), 0.9);

        animator.apply_phase(Phase::TreeFormation);
        let before = animator.rotation_y();
        animator.tick(5.1);
        assert!((animator.rotation_y() - before - 0.005).abs() < 1e-6);

        animator.apply_phase(Phase::PhotoWall);
        let before = animator.rotation_y();
        animator.tick(5.2);
        assert!((animator.rotation_y() - before - 0.001).abs() < 1e-6);
        assert_eq!(animator.opacity(), 0.3);
    }

    #[test]
    fn color_flag_lasts_one_frame() {
        let mut animator = ParticleAnimator::new(10, 6);
        assert!(animator.colors_dirty());
        animator.begin_frame();
        assert!(!animator.colors_dirty());
        animator.apply_phase(Phase::Countdown4);
        assert!(!animator.colors_dirty());
        animator.apply_phase(Phase::YearReveal);
        assert_eq!(animator.uniforms().colors_dirty, 1.0);
    }
}
