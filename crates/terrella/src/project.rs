//! Screen projection and ray math.
//!
//! Covers the three ray/projection jobs of the scene: projecting the
//! landmark into pixel coordinates for the overlay, intersecting the pointer
//! ray with the globe for the surface highlight, and building the fixed
//! home-pose pointer ray that the tracked figure watches.

use std::f32::consts::FRAC_PI_4;

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::sections::section_preset;

/// Clip-space w below this is treated as behind the camera.
const BEHIND_EPSILON: f32 = 1e-6;

/// Reference aspect ratio for the home pointer ray (16:9).
const HOME_ASPECT: f32 = 16.0 / 9.0;
/// Vertical field of view of the scene camera.
pub const CAMERA_FOV: f32 = FRAC_PI_4;

/// A world-space ray with unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest non-negative intersection distance between a ray and a sphere,
/// or `None` when the ray misses or the sphere is entirely behind it.
#[must_use]
pub fn ray_sphere_intersect(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let offset = ray.origin - center;
    let b = offset.dot(ray.direction);
    let c = offset.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let near = -b - sqrt_disc;
    if near >= 0.0 {
        return Some(near);
    }
    // Origin inside the sphere: take the exit point.
    let far = -b + sqrt_disc;
    (far >= 0.0).then_some(far)
}

/// Project a world point through a view-projection matrix to pixel
/// coordinates in a viewport of the given size.
///
/// Returns `None` when the point is behind the camera. Points in front but
/// outside the frustum still project (to out-of-viewport pixels); visibility
/// here means "in front", matching the overlay contract.
#[must_use]
pub fn project_to_screen(view_proj: Mat4, viewport: Vec2, world: Vec3) -> Option<Vec2> {
    let clip = view_proj * world.extend(1.0);
    if clip.w <= BEHIND_EPSILON {
        return None;
    }

    let ndc = clip.xyz() / clip.w;
    Some(Vec2::new(
        (ndc.x * 0.5 + 0.5) * viewport.x,
        (-ndc.y * 0.5 + 0.5) * viewport.y,
    ))
}

/// Ray from a camera pose through a pointer position in NDC.
///
/// The pose is given as position plus look-at point with Y up, matching how
/// the scene camera is oriented everywhere else.
#[must_use]
pub fn pointer_ray(position: Vec3, look_at: Vec3, aspect: f32, ndc: Vec2) -> Ray {
    let forward = (look_at - position).normalize();
    let right = forward.cross(Vec3::Y).normalize();
    let up = right.cross(forward);

    let tan_half = (CAMERA_FOV * 0.5).tan();
    let direction =
        (forward + right * (ndc.x * tan_half * aspect) + up * (ndc.y * tan_half)).normalize();

    Ray {
        origin: position,
        direction,
    }
}

/// Pointer ray through the fixed home camera pose.
///
/// The tracked figure watches this ray rather than the live camera, which
/// makes its orientation a pure function of pointer state: moving the real
/// camera does not move the figure's gaze.
#[must_use]
pub fn home_pointer_ray(ndc: Vec2) -> Ray {
    let home = section_preset(0);
    pointer_ray(home.position, home.look_at, HOME_ASPECT, ndc)
}

/// World point one unit along the home pointer ray; the figure's look target.
#[must_use]
pub fn pointer_look_target(ndc: Vec2) -> Vec3 {
    home_pointer_ray(ndc).at(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_view_proj(eye: Vec3, center: Vec3) -> Mat4 {
        Mat4::perspective_rh(FRAC_PI_4, 16.0 / 9.0, 0.1, 1000.0)
            * Mat4::look_at_rh(eye, center, Vec3::Y)
    }

    #[test]
    fn test_ray_sphere_head_on() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::NEG_Z,
        };
        let t = ray_sphere_intersect(&ray, Vec3::ZERO, 1.0);
        assert!(matches!(t, Some(t) if (t - 4.0).abs() < 1e-5));
    }

    #[test]
    fn test_ray_sphere_miss_and_behind() {
        let miss = Ray {
            origin: Vec3::new(0.0, 3.0, 5.0),
            direction: Vec3::NEG_Z,
        };
        assert!(ray_sphere_intersect(&miss, Vec3::ZERO, 1.0).is_none());

        // Sphere behind the ray origin.
        let behind = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::Z,
        };
        assert!(ray_sphere_intersect(&behind, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_ray_sphere_from_inside() {
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::X,
        };
        let t = ray_sphere_intersect(&ray, Vec3::ZERO, 2.0);
        assert!(matches!(t, Some(t) if (t - 2.0).abs() < 1e-5));
    }

    #[test]
    fn test_ray_sphere_offset_center() {
        let ray = Ray {
            origin: Vec3::new(-6.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        let t = ray_sphere_intersect(&ray, Vec3::new(-6.0, 0.0, -0.5), 1.01);
        assert!(matches!(t, Some(t) if (t - (10.5 - 1.01)).abs() < 1e-4));
    }

    #[test]
    fn test_project_center_of_view() {
        let view_proj = test_view_proj(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let viewport = Vec2::new(1920.0, 1080.0);
        let px = project_to_screen(view_proj, viewport, Vec3::ZERO);
        let Some(px) = px else {
            panic!("point in front must project");
        };
        assert!((px.x - 960.0).abs() < 1e-2);
        assert!((px.y - 540.0).abs() < 1e-2);
    }

    #[test]
    fn test_project_behind_camera_is_invisible() {
        let view_proj = test_view_proj(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let viewport = Vec2::new(1920.0, 1080.0);
        assert!(project_to_screen(view_proj, viewport, Vec3::new(0.0, 0.0, 10.0)).is_none());
    }

    #[test]
    fn test_project_directions_match_screen_axes() {
        let view_proj = test_view_proj(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let viewport = Vec2::new(1920.0, 1080.0);

        // World +X appears right of center; world +Y appears above center
        // (smaller pixel Y).
        let right = project_to_screen(view_proj, viewport, Vec3::new(1.0, 0.0, 0.0));
        assert!(matches!(right, Some(px) if px.x > 960.0));
        let above = project_to_screen(view_proj, viewport, Vec3::new(0.0, 1.0, 0.0));
        assert!(matches!(above, Some(px) if px.y < 540.0));
    }

    #[test]
    fn test_project_frustum_point_lands_in_viewport() {
        let view_proj = test_view_proj(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let viewport = Vec2::new(1280.0, 720.0);
        for world in [
            Vec3::ZERO,
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(-1.0, 0.2, 1.0),
        ] {
            let Some(px) = project_to_screen(view_proj, viewport, world) else {
                panic!("{world:?} should be in front");
            };
            assert!((0.0..=1280.0).contains(&px.x));
            assert!((0.0..=720.0).contains(&px.y));
        }
    }

    #[test]
    fn test_home_ray_center_looks_at_focus() {
        let ray = home_pointer_ray(Vec2::ZERO);
        let home = section_preset(0);
        let expected = (home.look_at - home.position).normalize();
        assert!(ray.direction.abs_diff_eq(expected, 1e-6));
        assert_eq!(ray.origin, home.position);
    }

    #[test]
    fn test_pointer_ray_spans_the_frustum() {
        let position = Vec3::new(10.0, -3.0, 1.0);
        let look_at = Vec3::new(-7.7, 0.0, 10.0);

        // NDC center passes through the look-at point.
        let center = pointer_ray(position, look_at, 16.0 / 9.0, Vec2::ZERO);
        assert!(
            center
                .direction
                .abs_diff_eq((look_at - position).normalize(), 1e-6)
        );

        // Opposite NDC corners are symmetric about the center direction.
        let left = pointer_ray(position, look_at, 16.0 / 9.0, Vec2::new(-1.0, 0.0));
        let right = pointer_ray(position, look_at, 16.0 / 9.0, Vec2::new(1.0, 0.0));
        let angle_left = center.direction.angle_between(left.direction);
        let angle_right = center.direction.angle_between(right.direction);
        assert!((angle_left - angle_right).abs() < 1e-5);
        assert!(angle_left > 0.1);
    }

    #[test]
    fn test_pointer_target_tracks_pointer_not_camera() {
        // Different pointer positions give different targets...
        let a = pointer_look_target(Vec2::new(-0.5, 0.2));
        let b = pointer_look_target(Vec2::new(0.5, 0.2));
        assert!(a.distance(b) > 1e-3);

        // ...and the same pointer always gives the same target; no camera
        // state is involved anywhere.
        assert_eq!(a, pointer_look_target(Vec2::new(-0.5, 0.2)));

        // The target sits one unit from the home position.
        assert!((a.distance(section_preset(0).position) - 1.0).abs() < 1e-5);
    }
}
