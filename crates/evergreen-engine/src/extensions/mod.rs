// extensions/mod.rs
//
// Optional extension modules for EvergreenEngine.
// Decoupled from core Node/Scene storage; games opt in by using them.

pub mod easing;
pub mod transform;

pub use easing::{lerp, lerp_rgb, approach, damp, Damped, DampedVec3, DAMP_EPSILON};
pub use transform::{TransformGraph, LocalTransform};
