use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform: translation, per-axis Euler rotation in radians, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    /// Composes the matrix for the current field values.
    ///
    /// Starting from identity, rotate-Z, rotate-X, rotate-Y, translate, and
    /// scale are right-multiplied onto the running product in that order:
    /// `Rz * Rx * Ry * T * S`. Nothing is cached; every call recomputes.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_translation(self.translation)
            * Mat4::from_scale(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6};

    const EPS: f32 = 1e-6;

    #[test]
    fn default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.translation, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert!(t.matrix().abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn rotation_about_x_lifts_y_to_z() {
        let t = Transform {
            rotation: Vec3::new(FRAC_PI_2, 0.0, 0.0),
            ..Transform::default()
        };
        let p = t.matrix().transform_point3(Vec3::Y);
        assert!(p.abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn rotation_about_y_swings_forward_to_left() {
        let t = Transform {
            rotation: Vec3::new(0.0, FRAC_PI_2, 0.0),
            ..Transform::default()
        };
        let p = t.matrix().transform_point3(Vec3::NEG_Z);
        assert!(p.abs_diff_eq(Vec3::NEG_X, EPS));
    }

    #[test]
    fn rotation_about_z_lifts_x_to_y() {
        let t = Transform {
            rotation: Vec3::new(0.0, 0.0, FRAC_PI_2),
            ..Transform::default()
        };
        let p = t.matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn combined_rotation_matches_explicit_product() {
        let t = Transform {
            rotation: Vec3::new(FRAC_PI_4, FRAC_PI_3, FRAC_PI_6),
            ..Transform::default()
        };
        let expected = Mat4::from_rotation_z(FRAC_PI_6)
            * Mat4::from_rotation_x(FRAC_PI_4)
            * Mat4::from_rotation_y(FRAC_PI_3);
        assert!(t.matrix().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn translation_is_applied_before_the_rotations() {
        let t = Transform {
            translation: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(0.0, FRAC_PI_2, 0.0),
            scale: Vec3::splat(2.0),
        };
        // S maps (1,0,0) to (2,0,0); T shifts it to (3,2,3); Ry(pi/2) swings
        // that to (3,2,-3).
        let p = t.matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(3.0, 2.0, -3.0), EPS));
    }
}
