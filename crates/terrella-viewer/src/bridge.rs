//! Screen projection bridge: the landmark's world position mapped to
//! viewport pixels every frame.
//!
//! The projection runs unconditionally, not just while the landmark section
//! is active, so the overlay never shows a one-frame stale position when the
//! section switches on. The math mirrors the render camera analytically from
//! rig state; no transform readback is involved.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use terrella::project::CAMERA_FOV;
use terrella::{GLOBE_OFFSET, Marker, RigState, project, project_to_screen};

use crate::rig::{CameraRig, GlobeOrientation};
use crate::scene::{CAMERA_FAR, CAMERA_NEAR, SceneConfig, SceneSet};

/// The landmark sits on the marker shell.
const LANDMARK_RADIUS: f32 = 1.02;

// ============================================================================
// Resources
// ============================================================================

/// Latest projection result.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct LandmarkScreenPosition {
    /// Pixel position, present only while the landmark is in front of the
    /// camera. Pixels may lie outside the viewport; in-front is the only
    /// visibility criterion.
    pub pixel: Option<Vec2>,
}

/// External hook invoked with the landmark's pixel position on visible
/// frames. The host sets this to feed whatever overlays it manages itself.
#[derive(Resource, Default)]
pub struct ScreenPositionCallback(pub Option<Box<dyn Fn(Vec2) + Send + Sync>>);

// ============================================================================
// Plugin
// ============================================================================

/// Plugin owning the per-frame landmark projection.
pub struct BridgePlugin;

impl Plugin for BridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LandmarkScreenPosition>()
            .init_resource::<ScreenPositionCallback>()
            .add_systems(Update, project_landmark.in_set(SceneSet::Project));
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Project the landmark through the current camera and publish the result.
fn project_landmark(
    rig: Res<CameraRig>,
    orientation: Res<GlobeOrientation>,
    config: Res<SceneConfig>,
    callback: Res<ScreenPositionCallback>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut screen: ResMut<LandmarkScreenPosition>,
) {
    let viewport = Vec2::new(window.width(), window.height());
    screen.pixel = landmark_pixel(&rig.0, orientation.0.rotation, &config.landmark, viewport);

    if let (Some(pixel), Some(callback)) = (screen.pixel, callback.0.as_ref()) {
        callback(pixel);
    }
}

/// Landmark pixel position for a given rig pose and globe spin, or `None`
/// when the landmark is behind the camera.
fn landmark_pixel(rig: &RigState, spin: Vec3, landmark: &Marker, viewport: Vec2) -> Option<Vec2> {
    let local = project(landmark.lat, landmark.long, LANDMARK_RADIUS);
    let rotation = Quat::from_euler(EulerRot::XYZ, spin.x, spin.y, spin.z);
    let world = GLOBE_OFFSET + rotation * local;

    let view = Mat4::look_at_rh(rig.position, rig.look_at, Vec3::Y);
    let proj = Mat4::perspective_rh(
        CAMERA_FOV,
        viewport.x / viewport.y,
        CAMERA_NEAR,
        CAMERA_FAR,
    );
    project_to_screen(proj * view, viewport, world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use terrella::default_landmark;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn test_landmark_projects_inside_the_home_view() {
        let pixel = landmark_pixel(&RigState::home(), Vec3::ZERO, &default_landmark(), VIEWPORT);
        let pixel = pixel.expect("landmark should be in front of the home camera");
        assert!(pixel.x > 0.0 && pixel.x < VIEWPORT.x, "x = {}", pixel.x);
        assert!(pixel.y > 0.0 && pixel.y < VIEWPORT.y, "y = {}", pixel.y);
    }

    #[test]
    fn test_landmark_behind_the_camera_is_hidden() {
        let mut rig = RigState::home();
        // Face directly away from the globe.
        rig.look_at = rig.position + (rig.position - rig.look_at);
        let pixel = landmark_pixel(&rig, Vec3::ZERO, &default_landmark(), VIEWPORT);
        assert_eq!(pixel, None);
    }

    #[test]
    fn test_spin_moves_the_projected_pixel() {
        let rig = RigState::home();
        let still = landmark_pixel(&rig, Vec3::ZERO, &default_landmark(), VIEWPORT).unwrap();
        let spun = landmark_pixel(
            &rig,
            Vec3::new(0.0, 0.4, 0.0),
            &default_landmark(),
            VIEWPORT,
        )
        .unwrap();
        assert!(still.distance(spun) > 1.0);
    }

    #[test]
    fn test_callback_fires_only_on_visible_frames() {
        let mut app = App::new();
        app.init_resource::<CameraRig>();
        app.init_resource::<GlobeOrientation>();
        app.init_resource::<LandmarkScreenPosition>();
        app.insert_resource(SceneConfig::default());
        app.world_mut().spawn((Window::default(), PrimaryWindow));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        app.insert_resource(ScreenPositionCallback(Some(Box::new(move |pixel| {
            sink.lock().unwrap().push(pixel);
        }))));
        app.add_systems(Update, project_landmark);

        app.world_mut().resource_mut::<CameraRig>().0 = RigState::home();
        app.update();
        assert_eq!(seen.lock().unwrap().len(), 1);
        let published = app.world().resource::<LandmarkScreenPosition>().pixel;
        assert_eq!(published, Some(seen.lock().unwrap()[0]));

        // Turn away: the resource clears and the callback stays quiet.
        {
            let mut rig = app.world_mut().resource_mut::<CameraRig>();
            let away = rig.0.position + (rig.0.position - rig.0.look_at);
            rig.0.look_at = away;
        }
        app.update();
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(app.world().resource::<LandmarkScreenPosition>().pixel, None);
    }
}
