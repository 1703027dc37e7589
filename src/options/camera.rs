use serde::{Deserialize, Serialize};

use crate::camera::pose::DEFAULT_POSE;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection, gesture sensitivity, and model pose parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Distance from the eye to the origin along +Z.
    pub eye_distance: f32,
    /// Trackball angle multiplier.
    pub rotate_speed: f32,
    /// Multiplier on the pixel-to-world translation.
    pub translate_speed: f32,
    /// Exponent step per mouse-wheel notch (`factor = exp(delta * step)`).
    pub wheel_zoom_step: f32,
    /// Smallest allowed model scale.
    pub min_scale: f32,
    /// Largest allowed model scale.
    pub max_scale: f32,
    /// Reset pose as `[x, y, z, pitch, yaw, roll]` (radians).
    pub default_pose: [f32; 6],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
            eye_distance: 2.0,
            rotate_speed: 1.0,
            translate_speed: 1.0,
            wheel_zoom_step: 0.1,
            min_scale: 0.05,
            max_scale: 20.0,
            default_pose: DEFAULT_POSE,
        }
    }
}

impl CameraOptions {
    /// Check that every value is usable: all numbers finite, a positive
    /// projection depth range, and `0 < min_scale <= max_scale`.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let scalars = [
            ("fovy", self.fovy),
            ("znear", self.znear),
            ("zfar", self.zfar),
            ("eye_distance", self.eye_distance),
            ("rotate_speed", self.rotate_speed),
            ("translate_speed", self.translate_speed),
            ("wheel_zoom_step", self.wheel_zoom_step),
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
        ];
        if let Some((name, value)) =
            scalars.iter().find(|(_, value)| !value.is_finite())
        {
            return Err(format!("camera.{name} must be finite, got {value}"));
        }
        if self.default_pose.iter().any(|v| !v.is_finite()) {
            return Err("camera.default_pose must be finite".to_owned());
        }
        if self.znear <= 0.0 || self.zfar <= self.znear {
            return Err(format!(
                "camera depth range must satisfy 0 < znear < zfar, got {}..{}",
                self.znear, self.zfar
            ));
        }
        if self.min_scale <= 0.0 {
            return Err(format!(
                "camera.min_scale must be positive, got {}",
                self.min_scale
            ));
        }
        if self.min_scale > self.max_scale {
            return Err(format!(
                "camera.min_scale ({}) exceeds camera.max_scale ({})",
                self.min_scale, self.max_scale
            ));
        }
        Ok(())
    }

    /// Scale bounds safe to pass to `f32::clamp`. Unusable bounds fall back
    /// to the defaults and reversed bounds are swapped.
    #[must_use]
    pub fn scale_range(&self) -> (f32, f32) {
        let defaults = Self::default();
        let usable = |v: f32| v.is_finite() && v > 0.0;
        let lo = if usable(self.min_scale) {
            self.min_scale
        } else {
            defaults.min_scale
        };
        let hi = if usable(self.max_scale) {
            self.max_scale
        } else {
            defaults.max_scale
        };
        if lo <= hi {
            (lo, hi)
        } else {
            log::warn!("camera scale bounds reversed ({lo} > {hi}), swapping");
            (hi, lo)
        }
    }
}
