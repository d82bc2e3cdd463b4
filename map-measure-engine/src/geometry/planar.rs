use bevy::math::DVec3;
use constants::geodesy::{
    METERS_PER_KM, PLANAR_AREA_KM2_THRESHOLD_M2, PLANAR_LENGTH_KM_THRESHOLD_M, SQ_METERS_PER_SQ_KM,
};

use super::SurfaceGeometry;

/// Geometry over a projected 2-D map.
///
/// Points live on the horizontal ground plane; only their X and Z
/// components carry information. Results are exact in the projection's own
/// unit (metres here).
pub struct PlanarGeometry;

impl SurfaceGeometry for PlanarGeometry {
    fn path_length(&self, points: &[DVec3]) -> f64 {
        points
            .windows(2)
            .map(|pair| {
                let dx = pair[1].x - pair[0].x;
                let dz = pair[1].z - pair[0].z;
                (dx * dx + dz * dz).sqrt()
            })
            .sum()
    }

    fn ring_area(&self, points: &[DVec3]) -> f64 {
        if points.len() < 3 {
            return 0.0;
        }
        // Shoelace over projected coordinates; the closing edge is implicit.
        let mut twice_area = 0.0;
        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            twice_area += a.x * b.z - b.x * a.z;
        }
        twice_area.abs() / 2.0
    }

    fn format_length(&self, meters: f64) -> String {
        if meters > PLANAR_LENGTH_KM_THRESHOLD_M {
            format!("Distance: {:.2} km", meters / METERS_PER_KM)
        } else {
            format!("Distance: {:.2} m", meters)
        }
    }

    fn format_area(&self, sq_meters: f64) -> String {
        if sq_meters > PLANAR_AREA_KM2_THRESHOLD_M2 {
            format!("Area: {:.2} km²", sq_meters / SQ_METERS_PER_SQ_KM)
        } else {
            format!("Area: {:.2} m²", sq_meters)
        }
    }
}
