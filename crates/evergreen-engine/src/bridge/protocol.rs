/// Shared buffer layout.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 20 floats]
/// [Point uniforms: 8 floats]
/// [Positions: max_points × 3 floats]
/// [Colors: max_points × 3 floats]
/// [Quads: max_quads × 20 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::instance::{PointUniforms, QuadInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_POINTS: usize = 3;
pub const HEADER_POINT_COUNT: usize = 4;
pub const HEADER_MAX_QUADS: usize = 5;
pub const HEADER_QUAD_COUNT: usize = 6;
pub const HEADER_MAX_EVENTS: usize = 7;
pub const HEADER_EVENT_COUNT: usize = 8;
pub const HEADER_ELAPSED: usize = 9;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section: view-projection matrix + eye/fov.
pub const CAMERA_FLOATS: usize = 20;

/// Floats per point position / color (fixed wire format).
pub const POINT_FLOATS: usize = 3;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_points: usize,
    pub max_quads: usize,
    pub max_events: usize,

    pub camera_offset: usize,
    pub point_uniforms_offset: usize,
    pub positions_offset: usize,
    pub colors_offset: usize,
    pub quads_offset: usize,
    pub events_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

/// Per-frame counts written into the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCounts {
    pub frame: u64,
    pub points: usize,
    pub quads: usize,
    pub events: usize,
    pub elapsed: f32,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_points: usize, max_quads: usize, max_events: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let point_uniforms_offset = camera_offset + CAMERA_FLOATS;
        let positions_offset = point_uniforms_offset + PointUniforms::FLOATS;
        let colors_offset = positions_offset + max_points * POINT_FLOATS;
        let quads_offset = colors_offset + max_points * POINT_FLOATS;
        let events_offset = quads_offset + max_quads * QuadInstance::FLOATS;
        let buffer_total_floats = events_offset + max_events * GameEvent::FLOATS;

        Self {
            max_points,
            max_quads,
            max_events,
            camera_offset,
            point_uniforms_offset,
            positions_offset,
            colors_offset,
            quads_offset,
            events_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_points, config.max_quads, config.max_events)
    }

    /// Fill a header block for the current frame.
    pub fn write_header(&self, header: &mut [f32; HEADER_FLOATS], counts: FrameCounts) {
        header[HEADER_LOCK] = 0.0;
        header[HEADER_FRAME_COUNTER] = counts.frame as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_POINTS] = self.max_points as f32;
        header[HEADER_POINT_COUNT] = counts.points.min(self.max_points) as f32;
        header[HEADER_MAX_QUADS] = self.max_quads as f32;
        header[HEADER_QUAD_COUNT] = counts.quads.min(self.max_quads) as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = counts.events.min(self.max_events) as f32;
        header[HEADER_ELAPSED] = counts.elapsed;
    }
}
