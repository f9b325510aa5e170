//! Shared math types for the walkspace crates: Euler transforms and angle helpers.
//!
//! # Invariants
//! - `Transform::matrix` composes rotate-Z, rotate-X, rotate-Y, translate, scale
//!   in that fixed order, recomputed from the current fields on every call.
//! - Angle helpers are pure functions; orientation state lives with the callers.

pub mod angles;
pub mod types;

pub use angles::{clamp_pitch, wrap_yaw};
pub use types::Transform;
