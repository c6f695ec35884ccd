//! Scene lifecycle: frame entities, teardown, and rebuild.
//!
//! All scene content is tagged with [`SceneTag`] and owned by this module's
//! lifecycle. A rebuild always tears the previous instance down before the
//! spawn systems run, so at most one scene is ever alive; this mirrors how
//! the host page remounts the whole canvas rather than patching it.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::ecs::message::MessageReader;
use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy::render::view::Hdr;
use leafwing_input_manager::prelude::*;
use terrella::project::CAMERA_FOV;
use terrella::{Marker, default_landmark, section_preset};

use crate::input::ViewerAction;
use crate::launch_params::LaunchParams;

/// Near plane of the scene camera.
pub(crate) const CAMERA_NEAR: f32 = 0.1;
/// Far plane of the scene camera.
pub(crate) const CAMERA_FAR: f32 = 1000.0;

// ============================================================================
// Components and resources
// ============================================================================

/// Marker for every root entity owned by the scene lifecycle.
///
/// Teardown despawns exactly the entities carrying this tag (children go
/// with their parents), so anything spawned outside the lifecycle survives.
#[derive(Component, Debug, Clone, Copy)]
pub struct SceneTag;

/// Marker for the scene camera.
#[derive(Component, Debug, Clone, Copy)]
pub struct SceneCamera;

/// Static scene content decided at launch.
#[derive(Resource, Debug, Clone)]
pub struct SceneConfig {
    /// The fixed landmark driving the overlay and the landmark section.
    pub landmark: Marker,
    /// Extra markers supplied by the host.
    pub markers: Vec<Marker>,
    /// Number of background stars.
    pub star_count: usize,
    /// Seed for the star scatter.
    pub star_seed: u64,
    /// Number of points on the interactive surface layer.
    pub surface_points: usize,
}

impl SceneConfig {
    pub fn from_params(params: &LaunchParams) -> Self {
        Self {
            landmark: default_landmark(),
            markers: params.markers.clone(),
            star_count: params.star_count,
            star_seed: params.star_seed,
            surface_points: params.surface_points,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::from_params(&LaunchParams::default())
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Request removal of the live scene instance.
#[derive(Message, Debug, Clone, Copy)]
pub struct TeardownScene;

/// Request a fresh scene instance, tearing down any existing one first.
#[derive(Message, Debug, Clone, Copy)]
pub struct RebuildScene;

/// Internal signal that this frame should spawn scene content.
///
/// Written only by the lifecycle after the old instance is gone; every
/// module with scene content listens for it in [`SceneSet::Spawn`].
#[derive(Message, Debug, Clone, Copy)]
pub struct SpawnScene;

// ============================================================================
// System sets
// ============================================================================

/// Per-frame ordering of the scene systems.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneSet {
    /// Teardown/rebuild message handling.
    Lifecycle,
    /// Spawning of scene content after a rebuild.
    Spawn,
    /// Section targets applied to the rig and orientation state.
    Targets,
    /// Convergence stepping and per-frame animation.
    Animate,
    /// Raycast and screen projection against the freshly stepped state.
    Project,
}

// ============================================================================
// Plugin
// ============================================================================

/// Plugin owning scene lifecycle and the camera frame.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<TeardownScene>()
            .add_message::<RebuildScene>()
            .add_message::<SpawnScene>()
            .configure_sets(
                Update,
                (
                    SceneSet::Lifecycle,
                    SceneSet::Spawn,
                    SceneSet::Targets,
                    SceneSet::Animate,
                    SceneSet::Project,
                )
                    .chain(),
            )
            .add_systems(Startup, request_initial_scene)
            .add_systems(
                Update,
                (
                    rebuild_on_keypress.before(SceneSet::Lifecycle),
                    apply_scene_lifecycle.in_set(SceneSet::Lifecycle),
                    spawn_scene_frame.in_set(SceneSet::Spawn),
                ),
            );
    }
}

// ============================================================================
// Systems
// ============================================================================

/// The first scene goes through the same rebuild path as any later one.
fn request_initial_scene(mut rebuilds: MessageWriter<RebuildScene>) {
    rebuilds.write(RebuildScene);
}

/// R tears the scene down and builds it again.
fn rebuild_on_keypress(
    action_query: Query<&ActionState<ViewerAction>>,
    mut rebuilds: MessageWriter<RebuildScene>,
) {
    let Ok(action_state) = action_query.single() else {
        return;
    };
    if action_state.just_pressed(&ViewerAction::RebuildScene) {
        rebuilds.write(RebuildScene);
    }
}

/// Despawn the live instance on teardown or rebuild; a rebuild then signals
/// the spawn systems. Clearing before spawning keeps the single-instance
/// invariant even when rebuild requests arrive back to back.
fn apply_scene_lifecycle(
    mut commands: Commands,
    mut teardowns: MessageReader<TeardownScene>,
    mut rebuilds: MessageReader<RebuildScene>,
    mut spawns: MessageWriter<SpawnScene>,
    tagged: Query<Entity, With<SceneTag>>,
) {
    let teardown = teardowns.read().count() > 0;
    let rebuild = rebuilds.read().count() > 0;
    if !teardown && !rebuild {
        return;
    }

    let removed = tagged.iter().count();
    for entity in &tagged {
        commands.entity(entity).despawn();
    }
    if removed > 0 {
        tracing::debug!(entities = removed, "scene instance torn down");
    }

    if rebuild {
        spawns.write(SpawnScene);
    }
}

/// Spawn the camera frame and scene-wide lighting.
fn spawn_scene_frame(mut commands: Commands, mut spawns: MessageReader<SpawnScene>) {
    if spawns.read().count() == 0 {
        return;
    }

    let home = section_preset(0);
    commands.spawn((
        SceneTag,
        SceneCamera,
        Camera3d::default(),
        Camera::default(),
        Transform::from_translation(home.position).looking_at(home.look_at, Vec3::Y),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..Default::default()
        }),
        Tonemapping::AcesFitted,
        Hdr,
        // Bloom lifts the glow shell and the streak heads.
        Bloom::NATURAL,
    ));

    // Soft fill so the night side of the globe stays readable.
    commands.insert_resource(GlobalAmbientLight {
        color: Color::srgb(0.85, 0.85, 1.0),
        brightness: 300.0,
        affects_lightmapped_meshes: true,
    });

    tracing::info!("scene frame spawned");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lifecycle_app() -> App {
        let mut app = App::new();
        app.add_message::<TeardownScene>();
        app.add_message::<RebuildScene>();
        app.add_message::<SpawnScene>();
        app.add_systems(Update, (apply_scene_lifecycle, spawn_scene_frame).chain());
        app
    }

    fn tagged_count(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<SceneTag>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn test_rebuild_spawns_exactly_one_frame() {
        let mut app = lifecycle_app();
        app.world_mut().write_message(RebuildScene);
        app.update();
        assert_eq!(tagged_count(&mut app), 1);
    }

    #[test]
    fn test_second_rebuild_replaces_the_first_instance() {
        let mut app = lifecycle_app();
        app.world_mut().write_message(RebuildScene);
        app.update();
        app.world_mut().write_message(RebuildScene);
        app.update();
        // Still one camera: the first instance was despawned before the
        // second spawn ran.
        assert_eq!(tagged_count(&mut app), 1);
    }

    #[test]
    fn test_teardown_clears_every_tagged_entity() {
        let mut app = lifecycle_app();
        app.world_mut().write_message(RebuildScene);
        app.update();
        app.world_mut().write_message(TeardownScene);
        app.update();
        assert_eq!(tagged_count(&mut app), 0);
    }

    #[test]
    fn test_teardown_then_rebuild_in_one_frame_leaves_one_instance() {
        let mut app = lifecycle_app();
        app.world_mut().write_message(RebuildScene);
        app.update();
        app.world_mut().write_message(TeardownScene);
        app.world_mut().write_message(RebuildScene);
        app.update();
        assert_eq!(tagged_count(&mut app), 1);
    }
}
