use glam::{Mat4, Vec2};

use super::core::Camera;
use super::pose::ModelPose;
use super::trackball;
use crate::options::CameraOptions;

/// Owns the model pose and the fixed camera, and turns gestures into pose
/// updates.
///
/// All inputs are in physical pixels. The controller never touches the GPU;
/// the renderer asks it for [`mvp`](Self::mvp) once per frame.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// The fixed viewing camera.
    pub camera: Camera,
    pose: ModelPose,
    default_pose: ModelPose,
    viewport: Vec2,
    rotate_speed: f32,
    translate_speed: f32,
    min_scale: f32,
    max_scale: f32,
}

impl CameraController {
    /// Create a controller for a viewport of `width × height` pixels.
    pub fn new(options: &CameraOptions, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let default_pose = ModelPose::from_array(options.default_pose);
        let (min_scale, max_scale) = options.scale_range();
        Self {
            camera: Camera::from_options(
                options,
                width as f32 / height as f32,
            ),
            pose: default_pose,
            default_pose,
            viewport: Vec2::new(width as f32, height as f32),
            rotate_speed: options.rotate_speed,
            translate_speed: options.translate_speed,
            min_scale,
            max_scale,
        }
    }

    /// Apply new camera options. The current pose is kept (re-clamped);
    /// the default pose used by [`reset`](Self::reset) is replaced.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.camera = Camera::from_options(options, self.camera.aspect);
        self.default_pose = ModelPose::from_array(options.default_pose);
        self.rotate_speed = options.rotate_speed;
        self.translate_speed = options.translate_speed;
        (self.min_scale, self.max_scale) = options.scale_range();
        self.pose.scale = self.pose.scale.clamp(self.min_scale, self.max_scale);
    }

    /// Current model pose.
    pub fn pose(&self) -> &ModelPose {
        &self.pose
    }

    /// Pose restored by [`reset`](Self::reset).
    pub fn default_pose(&self) -> &ModelPose {
        &self.default_pose
    }

    /// Last accepted viewport size in pixels.
    pub fn viewport(&self) -> (u32, u32) {
        (self.viewport.x as u32, self.viewport.y as u32)
    }

    /// Record a new viewport size and update the projection aspect ratio.
    /// Zero-sized dimensions (minimized window) are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring zero-sized viewport {width}x{height}");
            return;
        }
        self.viewport = Vec2::new(width as f32, height as f32);
        self.camera.aspect = width as f32 / height as f32;
    }

    /// Restore the default pose.
    pub fn reset(&mut self) {
        self.pose = self.default_pose;
    }

    /// Rotate the model with a one-finger drag.
    ///
    /// `delta` is the finger movement since the previous event and
    /// `position` the current finger position, both in pixels.
    pub fn rotate(&mut self, delta: Vec2, position: Vec2) {
        let end = trackball::normalize(position, self.viewport);
        let start = trackball::normalize(position - delta, self.viewport);
        let rotation = trackball::arc_rotation(start, end, self.rotate_speed);
        self.pose.orientation = (rotation * self.pose.orientation).normalize();
    }

    /// Multiply the model scale by a pinch ratio, clamped to the configured
    /// range. Non-finite or non-positive factors are ignored.
    pub fn scale(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("ignoring invalid scale factor {factor}");
            return;
        }
        self.pose.scale =
            (self.pose.scale * factor).clamp(self.min_scale, self.max_scale);
    }

    /// Move the model in its x-y plane by a pixel displacement.
    pub fn translate(&mut self, delta: Vec2) {
        let units = self.camera.world_units_per_pixel(self.viewport.y)
            * self.translate_speed;
        self.pose.position.x += delta.x * units;
        self.pose.position.y -= delta.y * units;
    }

    /// Model matrix for the current pose.
    pub fn model_matrix(&self) -> Mat4 {
        self.pose.model_matrix()
    }

    /// Combined `projection × view × model` matrix.
    pub fn mvp(&self) -> Mat4 {
        self.camera.build_matrix() * self.pose.model_matrix()
    }
}
