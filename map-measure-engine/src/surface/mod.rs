//! Pointer-to-world coordinate resolution.
//!
//! The measurement core never talks to a camera or a window directly; it
//! asks a [`CoordinateProvider`] to turn a screen position into a world
//! point and treats a miss as routine, not as an error.

use bevy::math::{DVec3, Vec2};

pub mod ray;

/// Resolves a screen-space position against the measured surface.
///
/// Implementations must return `None` when the pointer ray does not
/// intersect the surface; they never panic or error. Pointer imprecision is
/// expected and routine.
pub trait CoordinateProvider {
    fn pick(&self, screen: Vec2) -> Option<DVec3>;
}
