// extensions/easing.rs
//
// Easing and damping helpers for animation.
// Pure math, no Node/Scene dependencies.

use glam::Vec3;

/// Values closer than this to their target snap onto it.
pub const DAMP_EPSILON: f32 = 0.001;

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two RGB triples.
#[inline]
pub fn lerp_rgb(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)]
}

/// Move `current` a fixed fraction of the remaining distance toward `target`.
///
/// Exponential approach: with `0 < fraction < 1` the result never overshoots
/// and never lands exactly on the target.
#[inline]
pub fn approach(current: f32, target: f32, fraction: f32) -> f32 {
    current + (target - current) * fraction
}

/// Rational approximation of `exp(-x)` used by the damper.
#[inline]
fn exp_decay(x: f32) -> f32 {
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}

/// Critically damped spring step toward `target`.
///
/// `smooth_time` is roughly the time to cover most of the distance; the
/// result is frame-rate independent for a given `dt`. `velocity` carries
/// state between calls. Returns `false` once the value has settled.
pub fn damp(current: &mut f32, velocity: &mut f32, target: f32, smooth_time: f32, dt: f32) -> bool {
    if (*current - target).abs() <= DAMP_EPSILON {
        *current = target;
        *velocity = 0.0;
        return false;
    }
    if dt <= 0.0 {
        return true;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let decay = exp_decay(omega * dt);

    let change = *current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // Never overshoot the target
    if (target - *current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }

    *current = output;
    true
}

/// A scalar that eases toward a moving target.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Damped {
    pub value: f32,
    velocity: f32,
}

impl Damped {
    pub fn new(value: f32) -> Self {
        Self { value, velocity: 0.0 }
    }

    /// Advance toward `target`. Returns `false` once settled.
    pub fn step(&mut self, target: f32, smooth_time: f32, dt: f32) -> bool {
        damp(&mut self.value, &mut self.velocity, target, smooth_time, dt)
    }

    /// Jump to a value and drop any velocity.
    pub fn set(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
    }
}

/// A 3-vector damped independently per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DampedVec3 {
    x: Damped,
    y: Damped,
    z: Damped,
}

impl DampedVec3 {
    pub fn new(value: Vec3) -> Self {
        Self {
            x: Damped::new(value.x),
            y: Damped::new(value.y),
            z: Damped::new(value.z),
        }
    }

    pub fn value(&self) -> Vec3 {
        Vec3::new(self.x.value, self.y.value, self.z.value)
    }

    /// Advance toward `target`. Returns `false` once every axis has settled.
    pub fn step(&mut self, target: Vec3, smooth_time: f32, dt: f32) -> bool {
        let x = self.x.step(target.x, smooth_time, dt);
        let y = self.y.step(target.y, smooth_time, dt);
        let z = self.z.step(target.z, smooth_time, dt);
        x || y || z
    }
}
