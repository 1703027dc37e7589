use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// Fixed perspective camera defined by eye position, target, and projection
/// parameters. Only the aspect ratio changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the combined model-view-projection matrix.
///
/// Layout matches `MvpUniform` in `cubeview::shape_io`.
pub struct MvpUniform {
    /// Column-major model-view-projection matrix.
    pub mvp_mat: [[f32; 4]; 4],
}

impl Camera {
    /// Build the camera from options, looking down -Z at the origin.
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, options.eye_distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the view matrix.
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Build the projection matrix.
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Distance between the eye and the look-at target.
    pub fn focus_distance(&self) -> f32 {
        (self.target - self.eye).length()
    }

    /// World-space length covered by one pixel on the focus plane for a
    /// viewport of the given height.
    pub fn world_units_per_pixel(&self, viewport_height: f32) -> f32 {
        if viewport_height <= 0.0 {
            return 0.0;
        }
        let half_fovy = self.fovy.to_radians() * 0.5;
        2.0 * self.focus_distance() * half_fovy.tan() / viewport_height
    }
}

impl Default for MvpUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl MvpUniform {
    /// Create a new uniform holding the identity matrix.
    pub fn new() -> Self {
        Self {
            mvp_mat: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    /// Replace the stored matrix.
    pub fn update(&mut self, mvp: Mat4) {
        self.mvp_mat = mvp.to_cols_array_2d();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::from_options(&CameraOptions::default(), 1.0)
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let clip = camera().build_matrix() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn pixel_size_spans_visible_height() {
        let cam = camera();
        let height = 800.0;
        let visible = cam.world_units_per_pixel(height) * height;
        let expected =
            2.0 * cam.focus_distance() * (cam.fovy.to_radians() * 0.5).tan();
        assert!((visible - expected).abs() < 1e-5);
        assert_eq!(cam.world_units_per_pixel(0.0), 0.0);
    }

    #[test]
    fn uniform_stores_column_major_matrix() {
        let mut uniform = MvpUniform::new();
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        uniform.update(m);
        assert_eq!(uniform.mvp_mat[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(size_of::<MvpUniform>(), 64);
    }
}
