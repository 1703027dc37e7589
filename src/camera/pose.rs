//! Model pose: position, orientation, and uniform scale.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Default pose as `[x, y, z, pitch, yaw, roll]` (angles in radians).
pub const DEFAULT_POSE: [f32; 6] = [0.0, 0.0, 0.0, 1.0, 1.0, 0.0];

/// Position, orientation, and scale of the rendered model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPose {
    /// World-space translation.
    pub position: Vec3,
    /// Accumulated orientation (unit quaternion).
    pub orientation: Quat,
    /// Uniform scale factor.
    pub scale: f32,
}

impl ModelPose {
    /// Build a pose from `[x, y, z, pitch, yaw, roll]` with unit scale.
    ///
    /// Angles are in radians and compose as `Rz(roll) · Ry(yaw) · Rx(pitch)`,
    /// so pitch is applied to the model first.
    pub fn from_array(values: [f32; 6]) -> Self {
        let [x, y, z, pitch, yaw, roll] = values;
        Self {
            position: Vec3::new(x, y, z),
            orientation: Quat::from_euler(EulerRot::ZYX, roll, yaw, pitch),
            scale: 1.0,
        }
    }

    /// Model matrix `T · R · S`.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.orientation,
            self.position,
        )
    }
}

impl Default for ModelPose {
    fn default() -> Self {
        Self::from_array(DEFAULT_POSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pose_sits_at_origin_with_unit_scale() {
        let pose = ModelPose::default();
        assert_eq!(pose.position, Vec3::ZERO);
        assert_eq!(pose.scale, 1.0);
        let (roll, yaw, pitch) = pose.orientation.to_euler(EulerRot::ZYX);
        assert!((pitch - 1.0).abs() < 1e-5);
        assert!((yaw - 1.0).abs() < 1e-5);
        assert!(roll.abs() < 1e-5);
    }

    #[test]
    fn euler_angles_apply_pitch_then_yaw_then_roll() {
        let pose = ModelPose::from_array([0.0, 0.0, 0.0, 1.0, 1.0, 0.5]);
        let expected = Quat::from_rotation_z(0.5)
            * Quat::from_rotation_y(1.0)
            * Quat::from_rotation_x(1.0);
        assert!(pose.orientation.abs_diff_eq(expected, 1e-6));
        // Differs from the opposite composition order
        let reversed = Quat::from_rotation_x(1.0)
            * Quat::from_rotation_y(1.0)
            * Quat::from_rotation_z(0.5);
        assert!(!pose.orientation.abs_diff_eq(reversed, 1e-3));
    }

    #[test]
    fn model_matrix_applies_scale_then_rotation_then_translation() {
        let pose = ModelPose {
            position: Vec3::new(1.0, 0.0, 0.0),
            orientation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            scale: 2.0,
        };
        let p = pose.model_matrix().transform_point3(Vec3::X);
        // scale → (2,0,0), rotate 90° about Z → (0,2,0), translate → (1,2,0)
        assert!((p - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    }
}
