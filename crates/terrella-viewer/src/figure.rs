//! The pointer-tracked figure: async glTF load, fixed placement, dedicated
//! lights, and per-frame orientation toward the pointer.
//!
//! The look target comes from the fixed home camera pose, not the live one,
//! so the figure's orientation is a pure function of pointer state and does
//! not swing around when the rig flies between sections.

use std::f32::consts::PI;

use bevy::asset::LoadState;
use bevy::ecs::message::MessageReader;
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;
use terrella::pointer_look_target;

use crate::pointer::PointerState;
use crate::scene::{RebuildScene, SceneSet, SceneTag, SpawnScene, TeardownScene};

/// Fixed world position of the figure.
pub const FIGURE_POSITION: Vec3 = Vec3::new(-5.8, 0.0, -0.5);
/// Uniform figure scale.
const FIGURE_SCALE: f32 = 0.3;
/// Asset path of the figure model.
const FIGURE_ASSET: &str = "models/figure.glb";

// ============================================================================
// State
// ============================================================================

/// Figure lifecycle. `Failed` is terminal for the current scene instance;
/// a rebuild starts the load over.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FigureState {
    #[default]
    Unloaded,
    Loading,
    Ready,
    Failed,
}

/// Root entity of the figure model.
#[derive(Component, Debug, Clone, Copy)]
pub struct FigureRoot;

// ============================================================================
// Plugin
// ============================================================================

/// Plugin owning the figure lifecycle and tracking.
pub struct FigurePlugin;

impl Plugin for FigurePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FigureState>().add_systems(
            Update,
            (
                reset_on_teardown.in_set(SceneSet::Lifecycle),
                spawn_figure.in_set(SceneSet::Spawn),
                poll_figure.in_set(SceneSet::Spawn).after(spawn_figure),
                face_pointer.in_set(SceneSet::Animate),
            ),
        );
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Teardown or rebuild discards whatever the lifecycle had reached.
fn reset_on_teardown(
    mut teardowns: MessageReader<TeardownScene>,
    mut rebuilds: MessageReader<RebuildScene>,
    mut state: ResMut<FigureState>,
) {
    if teardowns.read().count() > 0 || rebuilds.read().count() > 0 {
        *state = FigureState::Unloaded;
    }
}

/// Kick off the async model load for a fresh scene instance.
fn spawn_figure(
    mut commands: Commands,
    mut spawns: MessageReader<SpawnScene>,
    asset_server: Res<AssetServer>,
    mut state: ResMut<FigureState>,
) {
    if spawns.read().count() == 0 {
        return;
    }

    commands.spawn((
        SceneTag,
        FigureRoot,
        SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(FIGURE_ASSET))),
        Transform::from_translation(FIGURE_POSITION).with_scale(Vec3::splat(FIGURE_SCALE)),
    ));
    *state = FigureState::Loading;
    tracing::debug!(path = FIGURE_ASSET, "figure load started");
}

/// Drive `Loading` to `Ready` or `Failed`.
///
/// Readiness means the scene instance has actually been spawned under the
/// root, not just that the asset finished loading; the dedicated lights
/// only appear once there is something to light.
fn poll_figure(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut state: ResMut<FigureState>,
    figure: Query<(&SceneRoot, Option<&Children>), With<FigureRoot>>,
) {
    if *state != FigureState::Loading {
        return;
    }
    let Ok((scene_root, children)) = figure.single() else {
        return;
    };

    match asset_server.load_state(&scene_root.0) {
        LoadState::Failed(err) => {
            tracing::error!(path = FIGURE_ASSET, error = %err, "figure failed to load");
            *state = FigureState::Failed;
        }
        _ => {
            if children.is_some_and(|c| !c.is_empty()) {
                spawn_figure_lights(&mut commands);
                *state = FigureState::Ready;
                tracing::info!("figure ready");
            }
        }
    }
}

/// Turn the figure toward the pointer while it is ready.
fn face_pointer(
    state: Res<FigureState>,
    pointer: Res<PointerState>,
    mut figure: Single<&mut Transform, With<FigureRoot>>,
) {
    if *state != FigureState::Ready {
        return;
    }

    let cursor = pointer_look_target(pointer.ndc);
    if (cursor - figure.translation).length_squared() < 1e-8 {
        return;
    }
    figure.look_at(cursor, Vec3::Y);
    // The model's visual front is +Z; look_at points -Z at the target.
    figure.rotate_local_y(PI);
}

fn spawn_figure_lights(commands: &mut Commands) {
    // Key light above, strong fill from the front.
    commands.spawn((
        SceneTag,
        PointLight {
            intensity: 100_000.0,
            range: 100.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(FIGURE_POSITION + Vec3::Y),
    ));
    commands.spawn((
        SceneTag,
        PointLight {
            intensity: 1_500_000.0,
            range: 100.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(FIGURE_POSITION + Vec3::new(2.0, 0.0, 2.0)),
    ));
}
