//! Virtual trackball mapping screen drags to rotations.
//!
//! A unit sphere is centered on the viewport. A drag from `start` to `end`
//! (both in normalized trackball coordinates) rotates the sphere so the
//! point under `start` moves to the point under `end`.

use glam::{Quat, Vec2, Vec3};

/// Cross products shorter than this are treated as "no rotation".
const MIN_AXIS_LENGTH: f32 = 1e-7;

/// Convert a pixel position to trackball coordinates.
///
/// The viewport center maps to the origin and the shorter viewport side
/// spans `[-1, 1]`. Screen-y points down, trackball-y points up.
pub fn normalize(position: Vec2, viewport: Vec2) -> Vec2 {
    let radius = viewport.x.min(viewport.y) * 0.5;
    if radius <= 0.0 {
        return Vec2::ZERO;
    }
    let centered = position - viewport * 0.5;
    Vec2::new(centered.x / radius, -centered.y / radius)
}

/// Lift a trackball point onto the unit sphere. Points outside the unit
/// disc land on the sphere's rim.
pub fn project_to_sphere(point: Vec2) -> Vec3 {
    let d2 = point.length_squared();
    if d2 <= 1.0 {
        Vec3::new(point.x, point.y, (1.0 - d2).sqrt())
    } else {
        point.normalize().extend(0.0)
    }
}

/// Rotation carrying `start` onto `end` on the trackball, with the angle
/// multiplied by `speed`.
pub fn arc_rotation(start: Vec2, end: Vec2, speed: f32) -> Quat {
    let from = project_to_sphere(start);
    let to = project_to_sphere(end);

    let axis = from.cross(to);
    let axis_len = axis.length();
    if axis_len < MIN_AXIS_LENGTH || !axis_len.is_finite() {
        return Quat::IDENTITY;
    }
    let angle = from.dot(to).clamp(-1.0, 1.0).acos() * speed;
    Quat::from_axis_angle(axis / axis_len, angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_center_is_origin() {
        let vp = Vec2::new(800.0, 600.0);
        assert_eq!(normalize(Vec2::new(400.0, 300.0), vp), Vec2::ZERO);
        // Top edge of the short axis maps to +1
        assert_eq!(normalize(Vec2::new(400.0, 0.0), vp), Vec2::new(0.0, 1.0));
        assert_eq!(normalize(Vec2::ONE, Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn projected_points_are_unit_length() {
        for p in [
            Vec2::ZERO,
            Vec2::new(0.3, -0.4),
            Vec2::new(2.0, 1.0),
            Vec2::new(-0.9, 0.9),
        ] {
            assert!((project_to_sphere(p).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn horizontal_drag_rotates_about_up_axis() {
        let q = arc_rotation(Vec2::ZERO, Vec2::new(0.5, 0.0), 1.0);
        let (axis, angle) = q.to_axis_angle();
        assert!(angle > 0.0);
        assert!((axis - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn reversed_drag_is_inverse() {
        let a = Vec2::new(0.1, 0.2);
        let b = Vec2::new(-0.3, 0.45);
        let q = arc_rotation(a, b, 1.0) * arc_rotation(b, a, 1.0);
        assert!(q.abs_diff_eq(Quat::IDENTITY, 1e-5));
    }

    #[test]
    fn zero_drag_is_identity() {
        let p = Vec2::new(0.2, 0.2);
        assert_eq!(arc_rotation(p, p, 1.0), Quat::IDENTITY);
    }

    #[test]
    fn speed_scales_angle() {
        let a = Vec2::ZERO;
        let b = Vec2::new(0.4, 0.0);
        let (_, single) = arc_rotation(a, b, 1.0).to_axis_angle();
        let (_, double) = arc_rotation(a, b, 2.0).to_axis_angle();
        assert!((double - 2.0 * single).abs() < 1e-5);
    }
}
