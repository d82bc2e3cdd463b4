/// Mean equatorial radius used by the spherical area approximation, metres.
pub const EARTH_MEAN_RADIUS_M: f64 = 6_378_137.0;

/// Planar lengths above this are reported in kilometres.
pub const PLANAR_LENGTH_KM_THRESHOLD_M: f64 = 100.0;
/// Planar areas above this are reported in square kilometres.
pub const PLANAR_AREA_KM2_THRESHOLD_M2: f64 = 10_000.0;
/// Spherical areas above this are reported in square kilometres.
pub const SPHERICAL_AREA_KM2_THRESHOLD_M2: f64 = 1_000_000.0;

pub const SQ_METERS_PER_SQ_KM: f64 = 1_000_000.0;
pub const METERS_PER_KM: f64 = 1_000.0;
