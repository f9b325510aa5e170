//! First-person camera: wrapped yaw, clamped pitch, yaw-relative movement.
//!
//! # Invariants
//! - Pitch stays in [-pi/2, pi/2] and yaw in [0, 2*pi) across every mutation.
//! - Field of view stays in [FOV_MIN, FOV_MAX].
//! - The owned transform carries rotation and translation only ... no roll, no
//!   scale. Its composed matrix is used directly as the view matrix, without
//!   inversion; `relative_move` accumulates negated displacements so the two
//!   stay consistent.

use std::f32::consts::PI;

use glam::{Mat4, Quat, Vec2, Vec3};
use walkspace_common::{Transform, clamp_pitch, wrap_yaw};

/// Narrowest field of view reachable by zooming, in radians (10 degrees).
pub const FOV_MIN: f32 = 10.0 * PI / 180.0;
/// Widest field of view reachable by zooming, in radians (170 degrees).
pub const FOV_MAX: f32 = 170.0 * PI / 180.0;

/// Fly-style first-person camera.
///
/// Orientation is (yaw, pitch) stored in the transform's rotation.y/rotation.x;
/// all mutation goes through methods so the wrap and clamp invariants hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsCamera {
    transform: Transform,
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Default for FpsCamera {
    fn default() -> Self {
        Self::new(60.0_f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0)
    }
}

impl FpsCamera {
    /// Creates a camera at the origin with zero orientation.
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            transform: Transform::default(),
            fov: fov.clamp(FOV_MIN, FOV_MAX),
            aspect,
            near,
            far,
        }
    }

    /// Current (yaw, pitch) in radians.
    pub fn orientation(&self) -> Vec2 {
        Vec2::new(self.transform.rotation.y, self.transform.rotation.x)
    }

    /// Sets (yaw, pitch); yaw is wrapped into [0, 2*pi), pitch clamped to
    /// [-pi/2, pi/2].
    pub fn set_orientation(&mut self, orientation: Vec2) {
        self.transform.rotation.y = wrap_yaw(orientation.x);
        self.transform.rotation.x = clamp_pitch(orientation.y);
    }

    pub fn translation(&self) -> Vec3 {
        self.transform.translation
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.transform.translation = translation;
    }

    /// Moves by a camera-local displacement: +x strafes right, +y rises, -z is
    /// forward. The displacement is negated, rotated by -yaw about the world Y
    /// axis, and added to the translation. Pitch never affects the direction,
    /// so looking up does not lift the walk path.
    pub fn relative_move(&mut self, movement: Vec3) {
        let yaw = self.transform.rotation.y;
        self.transform.translation += Quat::from_rotation_y(-yaw) * -movement;
    }

    /// The owned transform's composed matrix, used directly as the view
    /// matrix. Not inverted: the translation already accumulates negated
    /// displacements, so this product is the world-to-camera map.
    pub fn view_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Adds `delta` radians to the field of view, clamped to
    /// [FOV_MIN, FOV_MAX].
    pub fn zoom(&mut self, delta: f32) {
        self.fov = (self.fov + delta).clamp(FOV_MIN, FOV_MAX);
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(FOV_MIN, FOV_MAX);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }
}

pub fn crate_info() -> &'static str {
    "walkspace-camera v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, TAU};

    const EPS: f32 = 1e-5;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("camera"));
    }

    #[test]
    fn default_camera() {
        let cam = FpsCamera::default();
        assert_eq!(cam.orientation(), Vec2::ZERO);
        assert_eq!(cam.translation(), Vec3::ZERO);
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn orientation_wraps_yaw_and_clamps_pitch() {
        let mut cam = FpsCamera::default();
        cam.set_orientation(Vec2::new(TAU + 0.1, 10.0));
        let o = cam.orientation();
        assert!((o.x - 0.1).abs() < EPS);
        assert!((o.y - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn orientation_roundtrips_in_range_values() {
        let mut cam = FpsCamera::default();
        cam.set_orientation(Vec2::new(1.0, 0.5));
        assert_eq!(cam.orientation(), Vec2::new(1.0, 0.5));
    }

    #[test]
    fn forward_move_at_zero_yaw_accumulates_positive_z() {
        let mut cam = FpsCamera::default();
        cam.relative_move(Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(cam.translation(), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn forward_move_respects_yaw() {
        let mut cam = FpsCamera::default();
        cam.set_orientation(Vec2::new(FRAC_PI_2, 0.0));
        cam.relative_move(Vec3::new(0.0, 0.0, -1.0));
        assert!(cam.translation().abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn strafe_and_rise_accumulate_negated() {
        let mut cam = FpsCamera::default();
        cam.relative_move(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(cam.translation(), Vec3::new(-1.0, 0.0, 0.0));
        cam.relative_move(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(cam.translation(), Vec3::new(-1.0, -1.0, 0.0));
    }

    #[test]
    fn pitch_does_not_affect_movement() {
        let mut level = FpsCamera::default();
        level.set_orientation(Vec2::new(0.7, 0.0));
        level.relative_move(Vec3::new(0.0, 0.0, -1.0));

        let mut tilted = FpsCamera::default();
        tilted.set_orientation(Vec2::new(0.7, 1.0));
        tilted.relative_move(Vec3::new(0.0, 0.0, -1.0));

        assert!(level.translation().abs_diff_eq(tilted.translation(), EPS));
    }

    #[test]
    fn view_matrix_is_the_uninverted_transform() {
        let mut cam = FpsCamera::default();
        cam.set_orientation(Vec2::new(0.3, 0.2));
        cam.set_translation(Vec3::new(1.0, 2.0, 3.0));
        let expected = Transform {
            translation: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(0.2, 0.3, 0.0),
            scale: Vec3::ONE,
        };
        assert!(cam.view_matrix().abs_diff_eq(expected.matrix(), EPS));
    }

    #[test]
    fn view_keeps_point_ahead_after_forward_move() {
        let mut cam = FpsCamera::default();
        cam.relative_move(Vec3::new(0.0, 0.0, -2.0));
        // Eye sits at world (0,0,-2); a point at (0,0,-5) is 3 units ahead.
        let p = cam.view_matrix().transform_point3(Vec3::new(0.0, 0.0, -5.0));
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -3.0), EPS));
    }

    #[test]
    fn view_keeps_point_ahead_when_turned() {
        let mut cam = FpsCamera::default();
        cam.set_orientation(Vec2::new(FRAC_PI_2, 0.0));
        // Facing +X from the origin; a point at (4,0,0) is 4 units ahead.
        let p = cam.view_matrix().transform_point3(Vec3::new(4.0, 0.0, 0.0));
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -4.0), EPS));
    }

    #[test]
    fn zoom_clamps_at_both_ends() {
        let mut cam = FpsCamera::default();
        cam.zoom(10.0);
        assert_eq!(cam.fov(), FOV_MAX);
        cam.zoom(-20.0);
        assert_eq!(cam.fov(), FOV_MIN);
    }

    #[test]
    fn zoom_applies_small_deltas_exactly() {
        let mut cam = FpsCamera::default();
        let before = cam.fov();
        cam.zoom(0.05);
        assert_eq!(cam.fov(), before + 0.05);
    }

    #[test]
    fn set_fov_clamps() {
        let mut cam = FpsCamera::default();
        cam.set_fov(0.01);
        assert_eq!(cam.fov(), FOV_MIN);
        cam.set_fov(4.0);
        assert_eq!(cam.fov(), FOV_MAX);
    }
}
