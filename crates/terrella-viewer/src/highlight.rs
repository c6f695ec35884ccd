//! Pointer-to-surface highlight: raycast the live camera pose against the
//! point layer's sphere and feed the hit UV to the surface material.
//!
//! The cast runs against the analytic sphere rather than the point mesh, so
//! it stays exact at any lattice density. A miss leaves the previous
//! highlight in place; hovering off the globe does not clear it.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use terrella::{GLOBE_OFFSET, Ray, RigState, pointer_ray, ray_sphere_intersect, sphere_uv};

use crate::globe::SurfaceLayer;
use crate::pointer::PointerState;
use crate::rig::{CameraRig, GlobeOrientation};
use crate::scene::SceneSet;
use crate::surface_material::SurfacePointsMaterial;

/// Radius of the analytic pick sphere, matching the point layer.
const PICK_RADIUS: f32 = 1.01;

/// Plugin wiring the per-frame highlight raycast.
pub struct HighlightPlugin;

impl Plugin for HighlightPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, update_highlight.in_set(SceneSet::Project));
    }
}

/// Cast this frame's pointer ray and move the highlight UV on a hit.
fn update_highlight(
    pointer: Res<PointerState>,
    rig: Res<CameraRig>,
    orientation: Res<GlobeOrientation>,
    window: Single<&Window, With<PrimaryWindow>>,
    layer: Single<&MeshMaterial3d<SurfacePointsMaterial>, With<SurfaceLayer>>,
    mut materials: ResMut<Assets<SurfacePointsMaterial>>,
) {
    let aspect = window.width() / window.height();
    let Some(uv) = highlight_uv(&rig.0, orientation.0.rotation, aspect, pointer.ndc) else {
        return;
    };

    if let Some(material) = materials.get_mut(&layer.0) {
        material.params.highlight_uv = uv;
    }
}

/// Pick UV for a pointer position, or `None` when the ray misses the globe.
///
/// The ray is built from the live camera pose, then moved into globe-local
/// space by undoing the pivot spin, so the returned UV indexes the same
/// equirectangular parametrization the lattice was built with.
fn highlight_uv(rig: &RigState, spin: Vec3, aspect: f32, ndc: Vec2) -> Option<Vec2> {
    let ray = pointer_ray(rig.position, rig.look_at, aspect, ndc);
    let unspin = Quat::from_euler(EulerRot::XYZ, spin.x, spin.y, spin.z).inverse();

    let local = Ray {
        origin: unspin * (ray.origin - GLOBE_OFFSET),
        direction: unspin * ray.direction,
    };
    let t = ray_sphere_intersect(&local, Vec3::ZERO, PICK_RADIUS)?;
    Some(sphere_uv(local.at(t)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASPECT: f32 = 16.0 / 9.0;

    #[test]
    fn test_center_ray_hits_the_globe_from_home() {
        let uv = highlight_uv(&RigState::home(), Vec3::ZERO, ASPECT, Vec2::ZERO);
        let uv = uv.expect("home center ray should land on the globe");
        assert!((0.0..=1.0).contains(&uv.x));
        assert!((0.0..=1.0).contains(&uv.y));
    }

    #[test]
    fn test_far_corner_ray_misses() {
        let uv = highlight_uv(&RigState::home(), Vec3::ZERO, ASPECT, Vec2::new(1.0, 1.0));
        assert_eq!(uv, None);
    }

    #[test]
    fn test_spin_shifts_the_hit_longitude() {
        let rig = RigState::home();
        let still = highlight_uv(&rig, Vec3::ZERO, ASPECT, Vec2::ZERO).unwrap();
        // A quarter turn about +Y moves the surface under the ray by a
        // quarter of the u range.
        let spun = highlight_uv(
            &rig,
            Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            ASPECT,
            Vec2::ZERO,
        )
        .unwrap();
        let du = (spun.x - still.x).rem_euclid(1.0);
        assert!(
            (du - 0.75).abs() < 1e-3 || (du - 0.25).abs() < 1e-3,
            "unexpected longitude shift {du}"
        );
        assert!((spun.y - still.y).abs() < 1e-4);
    }
}
