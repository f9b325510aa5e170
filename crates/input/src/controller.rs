use glam::{Vec2, Vec3};
use walkspace_camera::FpsCamera;

/// Input sampled over one frame.
///
/// The shell owns the mapping from raw events to these fields; everything
/// downstream works in camera-local terms.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Relative mouse delta (x right, y down), in device units.
    pub look: Vec2,
    /// Held-key movement in camera-local axes: +x strafes right, +y rises,
    /// -z is forward.
    pub movement: Vec3,
    /// Scroll lines this frame; positive is scroll up.
    pub zoom: f32,
    /// Fast-move modifier held.
    pub fast: bool,
}

impl FrameInput {
    pub fn is_idle(&self) -> bool {
        self.look == Vec2::ZERO && self.movement == Vec3::ZERO && self.zoom == 0.0
    }
}

/// Tuning constants for the per-frame camera step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTuning {
    /// Radians of orientation change per mouse unit per second.
    pub look_sensitivity: f32,
    /// Radians of fov change per scroll line per second.
    pub zoom_sensitivity: f32,
    /// Movement units per second.
    pub move_speed: f32,
    /// Speed multiplier while the fast modifier is held.
    pub fast_multiplier: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            look_sensitivity: 0.2,
            zoom_sensitivity: 6.0,
            move_speed: 5.0,
            fast_multiplier: 3.0,
        }
    }
}

/// Applies sampled input to a camera, scaled by elapsed time.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraController {
    pub tuning: CameraTuning,
}

impl CameraController {
    pub fn new(tuning: CameraTuning) -> Self {
        Self { tuning }
    }

    /// One frame's mutation step. Sub-steps with zero input are skipped, so
    /// an idle frame leaves the camera untouched.
    pub fn apply(&self, camera: &mut FpsCamera, input: &FrameInput, dt: f32) {
        if input.look != Vec2::ZERO {
            let delta = input.look * self.tuning.look_sensitivity * dt;
            camera.set_orientation(camera.orientation() + delta);
        }
        if input.movement != Vec3::ZERO {
            let speed = self.tuning.move_speed
                * if input.fast {
                    self.tuning.fast_multiplier
                } else {
                    1.0
                };
            camera.relative_move(input.movement * speed * dt);
        }
        if input.zoom != 0.0 {
            camera.zoom(-input.zoom * self.tuning.zoom_sensitivity * dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn idle_frame_leaves_camera_bit_identical() {
        let mut cam = FpsCamera::default();
        cam.set_orientation(Vec2::new(1.0, 0.3));
        cam.set_translation(Vec3::new(1.0, 2.0, 3.0));
        let before = cam;

        let controller = CameraController::default();
        controller.apply(&mut cam, &FrameInput::default(), 0.25);
        assert_eq!(cam, before);
    }

    #[test]
    fn zero_dt_freezes_motion() {
        let mut cam = FpsCamera::default();
        let before = cam;
        let input = FrameInput {
            look: Vec2::new(3.0, -2.0),
            movement: Vec3::new(1.0, 0.0, -1.0),
            zoom: 1.0,
            fast: true,
        };
        CameraController::default().apply(&mut cam, &input, 0.0);
        assert_eq!(cam, before);
    }

    #[test]
    fn look_scales_by_sensitivity_and_dt() {
        let mut cam = FpsCamera::default();
        let controller = CameraController::default();
        let input = FrameInput {
            look: Vec2::new(1.0, 0.0),
            ..FrameInput::default()
        };
        controller.apply(&mut cam, &input, 0.5);
        let expected = 1.0 * controller.tuning.look_sensitivity * 0.5;
        assert!((cam.orientation().x - expected).abs() < EPS);
        assert_eq!(cam.orientation().y, 0.0);
    }

    #[test]
    fn movement_scales_with_speed_and_dt() {
        let mut cam = FpsCamera::default();
        let controller = CameraController::default();
        let input = FrameInput {
            movement: Vec3::new(0.0, 0.0, -1.0),
            ..FrameInput::default()
        };
        controller.apply(&mut cam, &input, 0.1);
        let expected = controller.tuning.move_speed * 0.1;
        assert!(
            cam.translation()
                .abs_diff_eq(Vec3::new(0.0, 0.0, expected), EPS)
        );
    }

    #[test]
    fn fast_modifier_multiplies_movement() {
        let mut cam = FpsCamera::default();
        let controller = CameraController::default();
        let input = FrameInput {
            movement: Vec3::new(0.0, 0.0, -1.0),
            fast: true,
            ..FrameInput::default()
        };
        controller.apply(&mut cam, &input, 0.1);
        let expected = controller.tuning.move_speed * controller.tuning.fast_multiplier * 0.1;
        assert!(
            cam.translation()
                .abs_diff_eq(Vec3::new(0.0, 0.0, expected), EPS)
        );
    }

    #[test]
    fn scroll_up_narrows_fov() {
        let mut cam = FpsCamera::default();
        let controller = CameraController::default();
        let before = cam.fov();
        let input = FrameInput {
            zoom: 1.0,
            ..FrameInput::default()
        };
        controller.apply(&mut cam, &input, 0.05);
        let expected = before - controller.tuning.zoom_sensitivity * 0.05;
        assert!((cam.fov() - expected).abs() < EPS);
    }

    #[test]
    fn zoom_respects_fov_floor() {
        let mut cam = FpsCamera::default();
        let input = FrameInput {
            zoom: 100.0,
            ..FrameInput::default()
        };
        CameraController::default().apply(&mut cam, &input, 1.0);
        assert_eq!(cam.fov(), walkspace_camera::FOV_MIN);
    }

    #[test]
    fn idle_detection() {
        assert!(FrameInput::default().is_idle());
        assert!(
            !FrameInput {
                zoom: 0.5,
                ..FrameInput::default()
            }
            .is_idle()
        );
        // The fast flag alone produces no motion.
        assert!(
            FrameInput {
                fast: true,
                ..FrameInput::default()
            }
            .is_idle()
        );
    }
}
