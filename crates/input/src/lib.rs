//! Per-frame input sampling applied to the camera.
//!
//! The desktop shell samples raw window events into a [`FrameInput`] once per
//! frame; the [`CameraController`] applies it to the camera scaled by elapsed
//! time. Camera consumers never see raw input events.
//!
//! # Invariants
//! - Every applied delta is scaled by the frame's elapsed seconds; there is no
//!   smoothing and no fixed timestep, so motion tracks the frame rate.
//! - A zero input leaves the camera bit-for-bit unchanged.

pub mod controller;

pub use controller::{CameraController, CameraTuning, FrameInput};

pub fn crate_info() -> &'static str {
    "walkspace-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
