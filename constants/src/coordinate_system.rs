use bevy::math::DVec3;

/// World axes are Y-up: latitude is measured against the Y axis, longitude
/// around it in the XZ plane.
///
/// Cartesian position on (or near) a sphere to geodetic `(lon, lat)` in
/// radians. The point's own length is taken as the radius, so positions
/// slightly off the surface still project sensibly.
pub fn cartesian_to_geodetic(position: DVec3) -> (f64, f64) {
    let radius = position.length().max(f64::EPSILON);
    let lat = (position.y / radius).clamp(-1.0, 1.0).asin();
    let lon = position.z.atan2(position.x);
    (lon, lat)
}

/// Geodetic `(lon, lat)` in radians to a cartesian surface point.
pub fn geodetic_to_cartesian(lon: f64, lat: f64, radius: f64) -> DVec3 {
    DVec3::new(
        radius * lat.cos() * lon.cos(),
        radius * lat.sin(),
        radius * lat.cos() * lon.sin(),
    )
}
