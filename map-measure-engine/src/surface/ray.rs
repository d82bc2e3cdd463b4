//! Ray/surface intersection primitives shared by the pick adapters.

use bevy::math::DVec3;

/// Ray against a sphere of `radius` centred at the world origin. Returns the
/// nearest intersection in front of the ray origin.
pub fn ray_sphere_intersection(origin: DVec3, direction: DVec3, radius: f64) -> Option<DVec3> {
    let dir = direction.normalize();
    let b = origin.dot(dir);
    let c = origin.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    let far = -b + sqrt_d;
    let t = if near > 0.0 { near } else { far };
    if t <= 0.0 {
        return None;
    }
    Some(origin + dir * t)
}

/// Ray against the horizontal plane `y = plane_y`. Rays parallel to the
/// plane miss rather than divide by zero.
pub fn ray_ground_plane_intersection(origin: DVec3, direction: DVec3, plane_y: f64) -> Option<DVec3> {
    if direction.y.abs() < 1e-9 {
        return None;
    }
    let t = (plane_y - origin.y) / direction.y;
    if t > 0.0 {
        Some(origin + direction * t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_hit_from_outside() {
        let hit = ray_sphere_intersection(DVec3::new(0.0, 0.0, -10.0), DVec3::Z, 2.0)
            .expect("ray through the centre must hit");
        assert!((hit - DVec3::new(0.0, 0.0, -2.0)).length() < 1e-9);
    }

    #[test]
    fn sphere_miss_is_none() {
        assert!(ray_sphere_intersection(DVec3::new(0.0, 5.0, -10.0), DVec3::Z, 2.0).is_none());
        // Sphere entirely behind the origin.
        assert!(ray_sphere_intersection(DVec3::new(0.0, 0.0, -10.0), -DVec3::Z, 2.0).is_none());
    }

    #[test]
    fn ground_plane_hit() {
        let hit =
            ray_ground_plane_intersection(DVec3::new(1.0, 10.0, 1.0), DVec3::new(0.0, -1.0, 0.0), 0.0)
                .expect("downward ray must hit the ground");
        assert!((hit - DVec3::new(1.0, 0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn ground_plane_parallel_ray_misses() {
        assert!(ray_ground_plane_intersection(DVec3::new(0.0, 10.0, 0.0), DVec3::X, 0.0).is_none());
        // Looking up from above the plane.
        assert!(
            ray_ground_plane_intersection(DVec3::new(0.0, 10.0, 0.0), DVec3::Y, 0.0).is_none()
        );
    }
}
