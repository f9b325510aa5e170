use std::f32::consts::{FRAC_PI_2, TAU};

/// Wraps a yaw angle into `[0, 2*pi)` using floating-point Euclidean modulo.
pub fn wrap_yaw(yaw: f32) -> f32 {
    yaw.rem_euclid(TAU)
}

/// Clamps a pitch angle into `[-pi/2, pi/2]`.
pub fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-FRAC_PI_2, FRAC_PI_2)
}
