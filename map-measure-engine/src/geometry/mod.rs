//! Surface-aware measurement geometry.
//!
//! Length and area semantics differ between a globe and a projected map, so
//! they sit behind a strategy trait chosen once when the tool is built. The
//! interaction state machine never branches on the surface kind itself.

use bevy::math::DVec3;

pub mod planar;
pub mod spherical;

pub use planar::PlanarGeometry;
pub use spherical::SphericalGeometry;

/// Length/area computation and unit policy for one surface kind.
///
/// Degenerate inputs (fewer than two points for a path, fewer than three for
/// a ring) yield `0.0` rather than an error.
pub trait SurfaceGeometry: Send + Sync {
    /// Cumulative length of an open path, in metres.
    fn path_length(&self, points: &[DVec3]) -> f64;

    /// Area of the ring spanned by `points`, in square metres.
    fn ring_area(&self, points: &[DVec3]) -> f64;

    /// Length formatted with the surface's unit policy.
    fn format_length(&self, meters: f64) -> String;

    /// Area formatted with the surface's unit policy.
    fn format_area(&self, sq_meters: f64) -> String;
}
