//! Surface point lattice for the shader-displaced globe layer.
//!
//! Points are distributed with a fibonacci spiral, which avoids the polar
//! clustering of a latitude/longitude grid. Each point carries the same
//! equirectangular UV that [`crate::geo::sphere_uv`] produces, so the
//! highlight raycast and the shader agree on coordinates by construction.

use glam::{Vec2, Vec3};

use crate::geo::sphere_uv;

/// One vertex of the surface point layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    /// Position on the sphere surface.
    pub position: Vec3,
    /// Outward unit normal.
    pub normal: Vec3,
    /// Equirectangular texture coordinate.
    pub uv: Vec2,
}

/// Distribute `count` points evenly over a sphere of the given radius.
#[must_use]
pub fn point_lattice(count: usize, radius: f32) -> Vec<SurfacePoint> {
    // Golden angle in radians.
    let golden = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());

    (0..count)
        .map(|index| {
            let y = 1.0 - 2.0 * (index as f32 + 0.5) / count as f32;
            let ring = (1.0 - y * y).sqrt();
            let theta = golden * index as f32;

            let direction = Vec3::new(theta.cos() * ring, y, theta.sin() * ring);
            SurfacePoint {
                position: direction * radius,
                normal: direction,
                uv: sphere_uv(direction),
            }
        })
        .collect()
}
