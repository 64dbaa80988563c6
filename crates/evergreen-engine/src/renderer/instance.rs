use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::camera::CameraUniform;

/// Per-cloud render parameters for the point renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointUniforms {
    /// Rotation of the whole cloud about the vertical axis, radians.
    pub rotation_y: f32,
    /// Material opacity (0.0 = invisible, 1.0 = opaque).
    pub opacity: f32,
    /// Point size in world units (size attenuated by the host).
    pub point_size: f32,
    /// 1.0 when the color buffer changed since the host last uploaded it.
    pub colors_dirty: f32,
    /// Number of points in the position/color buffers.
    pub count: f32,
    pub _pad: [f32; 3],
}

impl PointUniforms {
    pub const FLOATS: usize = 8;
}

/// Per-quad render data (photo frames).
/// Must match the host protocol: 20 floats = 80 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    /// Column-major world matrix.
    pub model: [[f32; 4]; 4],
    /// Quad width in local units.
    pub width: f32,
    /// Quad height in local units.
    pub height: f32,
    /// Bit flags, see `QuadInstance::FLAG_*`.
    pub flags: f32,
    /// Opaque game value (gallery index for the carousel).
    pub user: f32,
}

impl Default for QuadInstance {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            width: 0.0,
            height: 0.0,
            flags: 0.0,
            user: 0.0,
        }
    }
}

impl QuadInstance {
    pub const FLOATS: usize = 20;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// The quad is the current selection.
    pub const FLAG_ACTIVE: u32 = 1;
    /// The pointer is over the quad.
    pub const FLAG_HOVERED: u32 = 2;
    /// Host should attach a highlight light and caption.
    pub const FLAG_HIGHLIGHT: u32 = 4;

    pub fn new(model: Mat4, width: f32, height: f32, flags: u32, user: u32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            width,
            height,
            flags: flags as f32,
            user: user as f32,
        }
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags as u32) & flag != 0
    }
}

/// Everything the host needs to draw one frame.
pub struct RenderBuffer {
    /// Flat xyz positions, one triple per point.
    pub positions: Vec<[f32; 3]>,
    /// Flat rgb colors, parallel to `positions`.
    pub colors: Vec<[f32; 3]>,
    pub points: PointUniforms,
    pub quads: Vec<QuadInstance>,
    pub camera: CameraUniform,
}

impl RenderBuffer {
    pub fn with_capacity(max_points: usize, max_quads: usize) -> Self {
        Self {
            positions: Vec::with_capacity(max_points),
            colors: Vec::with_capacity(max_points),
            points: PointUniforms::default(),
            quads: Vec::with_capacity(max_quads),
            camera: CameraUniform::zeroed(),
        }
    }

    /// Clear per-frame quad data. Point buffers are overwritten in place.
    pub fn clear_quads(&mut self) {
        self.quads.clear();
    }

    /// Copy a point cloud into the buffer, reusing the allocation.
    pub fn write_points(&mut self, positions: &[[f32; 3]], colors: &[[f32; 3]]) {
        self.positions.clear();
        self.positions.extend_from_slice(positions);
        self.colors.clear();
        self.colors.extend_from_slice(colors);
        self.points.count = positions.len() as f32;
    }

    pub fn push_quad(&mut self, quad: QuadInstance) {
        self.quads.push(quad);
    }

    pub fn point_count(&self) -> u32 {
        self.positions.len() as u32
    }

    pub fn quad_count(&self) -> u32 {
        self.quads.len() as u32
    }

    /// Raw pointer to position data for SharedArrayBuffer reads.
    pub fn positions_ptr(&self) -> *const f32 {
        self.positions.as_ptr() as *const f32
    }

    pub fn colors_ptr(&self) -> *const f32 {
        self.colors.as_ptr() as *const f32
    }

    pub fn point_uniforms_ptr(&self) -> *const f32 {
        &self.points as *const PointUniforms as *const f32
    }

    pub fn quads_ptr(&self) -> *const f32 {
        self.quads.as_ptr() as *const f32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }
}
