use bevy::math::{DVec3, Vec2};
use bevy::prelude::*;

use constants::geodesy::EARTH_MEAN_RADIUS_M;

use crate::surface::CoordinateProvider;
use crate::surface::ray::{ray_ground_plane_intersection, ray_sphere_intersection};

/// Which surface the tool measures against. Fixed when the plugin is built,
/// never per event.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub enum SurfaceKind {
    /// Globe of the given radius centred at the world origin.
    Ellipsoid { radius_m: f64 },
    /// Projected map on the horizontal plane at `ground_y`.
    Planar { ground_y: f64 },
}

impl SurfaceKind {
    pub fn ellipsoid() -> Self {
        Self::Ellipsoid {
            radius_m: EARTH_MEAN_RADIUS_M,
        }
    }

    pub fn planar() -> Self {
        Self::Planar { ground_y: 0.0 }
    }
}

/// Camera-based [`CoordinateProvider`], valid for the frame it is built in.
///
/// Casts the cursor ray through the viewport and intersects it with the
/// configured surface; a miss resolves to `None`, never an error.
pub struct CameraSurfacePicker<'a> {
    pub camera: &'a Camera,
    pub camera_transform: &'a GlobalTransform,
    pub surface: SurfaceKind,
}

impl CoordinateProvider for CameraSurfacePicker<'_> {
    fn pick(&self, screen: Vec2) -> Option<DVec3> {
        let ray = self
            .camera
            .viewport_to_world(self.camera_transform, screen)
            .ok()?;
        let origin = ray.origin.as_dvec3();
        let direction = ray.direction.as_vec3().as_dvec3();

        match self.surface {
            SurfaceKind::Ellipsoid { radius_m } => {
                ray_sphere_intersection(origin, direction, radius_m)
            }
            SurfaceKind::Planar { ground_y } => {
                ray_ground_plane_intersection(origin, direction, ground_y)
            }
        }
    }
}
