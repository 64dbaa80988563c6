use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Perspective camera looking at a fixed target.
/// Produces view/projection matrices and projects world points to viewport pixels.
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in CSS pixels.
    pub viewport_px: Vec2,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    /// xyz eye position, w = vertical fov in radians.
    pub eye: [f32; 4],
}

impl Camera3D {
    pub fn new(position: Vec3, fov_y_deg: f32) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            fov_y_deg,
            near: 0.1,
            far: 1000.0,
            viewport_px: Vec2::new(1280.0, 720.0),
        }
    }

    /// Resize the viewport (e.g. on window resize). Zero sizes are ignored.
    pub fn resize(&mut self, width_px: f32, height_px: f32) {
        if width_px > 0.0 && height_px > 0.0 {
            self.viewport_px = Vec2::new(width_px, height_px);
            log::debug!("viewport {}x{}", width_px, height_px);
        } else {
            log::warn!("ignoring viewport resize to {}x{}", width_px, height_px);
        }
    }

    pub fn aspect(&self) -> f32 {
        self.viewport_px.x / self.viewport_px.y
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: self.view_projection().to_cols_array_2d(),
            eye: [
                self.position.x,
                self.position.y,
                self.position.z,
                self.fov_y_deg.to_radians(),
            ],
        }
    }

    /// Size in world units of the visible area on the plane through `target`.
    pub fn visible_size(&self) -> Vec2 {
        let distance = self.position.distance(self.target);
        let height = 2.0 * (self.fov_y_deg.to_radians() * 0.5).tan() * distance;
        Vec2::new(height * self.aspect(), height)
    }

    /// Project a world point to viewport pixels (origin top-left, y down).
    /// Returns the pixel position and the view-space depth, or `None` when the
    /// point is behind the camera.
    pub fn project(&self, world: Vec3) -> Option<(Vec2, f32)> {
        let view = self.view_matrix().transform_point3(world);
        // Right-handed view space looks down -Z
        let depth = -view.z;
        if depth <= self.near {
            return None;
        }
        let ndc = self.projection_matrix().project_point3(view);
        let px = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport_px.x,
            (1.0 - ndc.y) * 0.5 * self.viewport_px.y,
        );
        Some((px, depth))
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 35.0), 50.0)
    }
}

/// Whether `p` lies inside the convex polygon `poly` (any winding).
pub fn point_in_convex(p: Vec2, poly: &[Vec2]) -> bool {
    if poly.len() < 3 {
        return false;
    }
    let mut sign = 0.0f32;
    for i in 0..poly.len() {
        let a = poly[i];
        let b = poly[(i + 1) % poly.len()];
        let cross = (b - a).perp_dot(p - a);
        if cross.abs() < f32::EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    // Degenerate (zero-area) polygons contain nothing
    sign != 0.0
}
