//! Geographic projection onto the globe.
//!
//! Converts latitude/longitude (degrees) to points on an origin-centered
//! sphere in the scene's Y-up frame, and back to the equirectangular texture
//! coordinates used by the surface shader. Both directions share one
//! parametrization so that raycast hit UVs line up with lattice UVs exactly.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A geographic point of interest on the globe.
///
/// Immutable after construction; projected once to a 3D position when the
/// scene is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Latitude in degrees, north positive.
    pub lat: f32,
    /// Longitude in degrees, east positive.
    pub long: f32,
    /// Optional display label for the overlay.
    #[serde(default)]
    pub label: Option<String>,
    /// Optional linear RGB tint; the default marker color is used when absent.
    #[serde(default)]
    pub color: Option<[f32; 3]>,
}

/// Project a geographic coordinate onto a sphere of the given radius.
///
/// Longitude rotates about the vertical (+Y) axis; latitude tilts up from
/// the equatorial plane. Pure and total: out-of-range inputs still land on
/// the sphere.
#[must_use]
pub fn project(lat_deg: f32, lon_deg: f32, radius: f32) -> Vec3 {
    // Colatitude from the north pole and azimuth from the antimeridian.
    let phi = (90.0 - lat_deg).to_radians();
    let theta = (lon_deg + 180.0).to_radians();

    Vec3::new(
        -(radius * phi.sin() * theta.cos()),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Map a point on (or near) an origin-centered sphere to equirectangular
/// texture coordinates.
///
/// `u` runs 0..1 west to east starting at the antimeridian; `v` runs 0..1
/// north pole to south pole, matching image-space orientation. Inverse of
/// [`project`] up to floating-point error.
#[must_use]
pub fn sphere_uv(point: Vec3) -> Vec2 {
    let radius = point.length();
    if radius <= f32::EPSILON {
        return Vec2::new(0.5, 0.5);
    }

    let phi = (point.y / radius).clamp(-1.0, 1.0).acos();
    let theta = point.z.atan2(-point.x).rem_euclid(TAU);

    Vec2::new(theta / TAU, phi / PI)
}
