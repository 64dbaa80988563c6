pub mod api;
pub mod core;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{NodeId, GameEvent, AudioRequest};
pub use core::scene::{Scene, Node, NodeKind};
pub use core::time::FrameClock;
pub use renderer::camera::{Camera3D, CameraUniform, point_in_convex};
pub use renderer::instance::{RenderBuffer, PointUniforms, QuadInstance};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::{ProtocolLayout, FrameCounts, HEADER_FLOATS};

pub use extensions::{
    lerp, lerp_rgb, approach, damp, Damped, DampedVec3,
    TransformGraph, LocalTransform,
};
