//! Section-driven camera state machine and per-frame convergence.
//!
//! A section change overwrites the rig and orientation targets immediately;
//! the visible smoothness comes from the per-frame convergence step, never
//! from timers. Retargeting mid-flight therefore needs no special handling,
//! the camera just bends toward the new goal from wherever it is.

use bevy::ecs::message::MessageReader;
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use terrella::{
    LANDMARK_SECTION, OrientationState, RigState, SECTION_COUNT, landmark_look_at,
    landmark_orientation, section_preset,
};

use crate::input::ViewerAction;
use crate::scene::{SceneCamera, SceneConfig, SceneSet, SpawnScene};

/// Radians of orbit per pixel of mouse travel while dragging.
const DRAG_SENSITIVITY: f32 = 0.005;

// ============================================================================
// Resources
// ============================================================================

/// Externally driven section index; the stand-in for the host page's scroll
/// position. Unrecognized values are valid input and resolve to section 0.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CurrentSection(pub u32);

/// Live camera rig state.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CameraRig(pub RigState);

/// Live globe orientation state.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct GlobeOrientation(pub OrientationState);

/// Whether the landmark connector line should draw this frame.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct ConnectorVisible(pub bool);

// ============================================================================
// Plugin
// ============================================================================

/// Plugin owning the section state machine and camera convergence.
pub struct RigPlugin;

impl Plugin for RigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentSection>()
            .init_resource::<CameraRig>()
            .init_resource::<GlobeOrientation>()
            .init_resource::<ConnectorVisible>()
            .add_systems(
                Update,
                (
                    navigate_sections.before(SceneSet::Targets),
                    apply_section_targets.in_set(SceneSet::Targets),
                    drag_orbit.after(SceneSet::Targets).before(SceneSet::Animate),
                    (step_rig, settle_camera).chain().in_set(SceneSet::Animate),
                ),
            );
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Step the section index from keyboard navigation.
fn navigate_sections(
    action_query: Query<&ActionState<ViewerAction>>,
    mut section: ResMut<CurrentSection>,
) {
    let Ok(action_state) = action_query.single() else {
        return;
    };

    if action_state.just_pressed(&ViewerAction::NextSection) && section.0 + 1 < SECTION_COUNT {
        section.0 += 1;
    }
    if action_state.just_pressed(&ViewerAction::PreviousSection) {
        section.0 = section.0.saturating_sub(1);
    }
}

/// Retarget the rig when the section changes or a fresh scene spawns.
///
/// The landmark section swaps in an analytically computed framing: the
/// look-at moves onto the landmark's projected position and the globe
/// orientation locks so the landmark turns toward the camera. Every other
/// section releases the lock and hides the connector.
fn apply_section_targets(
    section: Res<CurrentSection>,
    config: Res<SceneConfig>,
    mut spawns: MessageReader<SpawnScene>,
    mut rig: ResMut<CameraRig>,
    mut orientation: ResMut<GlobeOrientation>,
    mut connector: ResMut<ConnectorVisible>,
) {
    let respawned = spawns.read().count() > 0;
    if !section.is_changed() && !respawned {
        return;
    }

    if respawned {
        // A fresh instance starts from the home pose and converges to the
        // active section from there, like a page remount.
        rig.0 = RigState::home();
        orientation.0 = OrientationState::default();
    }

    let mut preset = section_preset(section.0);
    if section.0 == LANDMARK_SECTION {
        preset.look_at = landmark_look_at(&config.landmark);
        orientation.0.lock(landmark_orientation(&config.landmark));
        connector.0 = true;
    } else {
        orientation.0.unlock();
        connector.0 = false;
    }
    rig.0.retarget(preset);
}

/// Orbit the live camera position around its look-at while the drag button
/// is held.
///
/// Only the live pose moves. The section targets stay put, so the
/// convergence step eases the camera back toward the active framing once
/// the button is released.
fn drag_orbit(
    action_query: Query<&ActionState<ViewerAction>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut rig: ResMut<CameraRig>,
) {
    let mut delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        delta += event.delta;
    }

    let Ok(action_state) = action_query.single() else {
        return;
    };
    if !action_state.pressed(&ViewerAction::OrbitDrag) || delta == Vec2::ZERO {
        return;
    }

    let offset = rig.0.position - rig.0.look_at;
    let mut next = Quat::from_rotation_y(-delta.x * DRAG_SENSITIVITY) * offset;

    let right = (-offset).cross(Vec3::Y);
    if right.length_squared() > 1e-6 {
        let pitched =
            Quat::from_axis_angle(right.normalize(), -delta.y * DRAG_SENSITIVITY) * next;
        // Stop short of the poles instead of flipping over them.
        if pitched.normalize().y.abs() < 0.995 {
            next = pitched;
        }
    }

    rig.0.position = rig.0.look_at + next;
}

/// Advance rig and orientation convergence by this frame's `dt`.
pub(crate) fn step_rig(
    time: Res<Time>,
    mut rig: ResMut<CameraRig>,
    mut orientation: ResMut<GlobeOrientation>,
) {
    let dt = time.delta_secs();
    rig.0.step(dt);
    orientation.0.step(dt);
}

/// Copy the converged rig pose onto the camera entity.
fn settle_camera(rig: Res<CameraRig>, mut camera: Single<&mut Transform, With<SceneCamera>>) {
    **camera = Transform::from_translation(rig.0.position).looking_at(rig.0.look_at, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrella::default_landmark;

    fn rig_app() -> App {
        let mut app = App::new();
        app.add_message::<SpawnScene>();
        app.init_resource::<CurrentSection>();
        app.init_resource::<CameraRig>();
        app.init_resource::<GlobeOrientation>();
        app.init_resource::<ConnectorVisible>();
        app.insert_resource(SceneConfig::default());
        app.add_systems(Update, apply_section_targets);
        app
    }

    fn set_section(app: &mut App, index: u32) {
        app.world_mut().resource_mut::<CurrentSection>().0 = index;
        app.update();
    }

    #[test]
    fn test_landmark_section_locks_orientation_and_shows_connector() {
        let mut app = rig_app();
        set_section(&mut app, LANDMARK_SECTION);

        let orientation = app.world().resource::<GlobeOrientation>().0;
        assert!(orientation.locked);
        assert_eq!(orientation.target, landmark_orientation(&default_landmark()));
        assert!(app.world().resource::<ConnectorVisible>().0);

        let rig = app.world().resource::<CameraRig>().0;
        assert_eq!(rig.target_position, section_preset(LANDMARK_SECTION).position);
        assert_eq!(rig.target_look_at, landmark_look_at(&default_landmark()));
    }

    #[test]
    fn test_leaving_landmark_section_releases_lock() {
        let mut app = rig_app();
        set_section(&mut app, LANDMARK_SECTION);
        set_section(&mut app, 1);

        let orientation = app.world().resource::<GlobeOrientation>().0;
        assert!(!orientation.locked);
        assert!(!app.world().resource::<ConnectorVisible>().0);
        let rig = app.world().resource::<CameraRig>().0;
        assert_eq!(rig.target_position, section_preset(1).position);
        assert_eq!(rig.target_look_at, section_preset(1).look_at);
    }

    #[test]
    fn test_unrecognized_section_falls_back_to_home_framing() {
        let mut app = rig_app();
        set_section(&mut app, 42);

        let rig = app.world().resource::<CameraRig>().0;
        assert_eq!(rig.target_position, section_preset(0).position);
        assert_eq!(rig.target_look_at, section_preset(0).look_at);
        assert!(!app.world().resource::<ConnectorVisible>().0);
    }

    fn drag_app(pressed: bool) -> App {
        let mut app = App::new();
        app.add_message::<MouseMotion>();
        app.init_resource::<CameraRig>();
        app.add_systems(Update, drag_orbit);

        let mut action_state = ActionState::<ViewerAction>::default();
        if pressed {
            action_state.press(&ViewerAction::OrbitDrag);
        }
        app.world_mut().spawn(action_state);
        app
    }

    #[test]
    fn test_drag_orbit_rotates_position_around_look_at() {
        let mut app = drag_app(true);

        let before = app.world().resource::<CameraRig>().0;
        app.world_mut().write_message(MouseMotion {
            delta: Vec2::new(40.0, -25.0),
        });
        app.update();

        let after = app.world().resource::<CameraRig>().0;
        assert_ne!(after.position, before.position);
        assert_eq!(after.look_at, before.look_at);

        // An orbit preserves the distance to the look-at point.
        let before_radius = (before.position - before.look_at).length();
        let after_radius = (after.position - after.look_at).length();
        assert!((after_radius - before_radius).abs() < 1e-4);

        // Targets are untouched; convergence still owns the framing.
        assert_eq!(after.target_position, before.target_position);
        assert_eq!(after.target_look_at, before.target_look_at);
    }

    #[test]
    fn test_mouse_motion_without_drag_leaves_rig_alone() {
        let mut app = drag_app(false);

        let before = app.world().resource::<CameraRig>().0;
        app.world_mut().write_message(MouseMotion {
            delta: Vec2::splat(12.0),
        });
        app.update();

        assert_eq!(app.world().resource::<CameraRig>().0.position, before.position);
    }

    #[test]
    fn test_respawn_resets_rig_to_home_pose() {
        let mut app = rig_app();
        set_section(&mut app, 2);
        // Let the current pose drift somewhere by faking a partial converge.
        app.world_mut().resource_mut::<CameraRig>().0.position = Vec3::new(9.0, 1.0, -3.0);

        app.world_mut().write_message(SpawnScene);
        app.update();

        let rig = app.world().resource::<CameraRig>().0;
        assert_eq!(rig.position, section_preset(0).position);
        // The active section still owns the target.
        assert_eq!(rig.target_position, section_preset(2).position);
    }
}
