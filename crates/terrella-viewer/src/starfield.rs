//! Background starfield entity.
//!
//! One mesh holds every star as a billboard quad; the scatter itself is
//! seeded, so a rebuild with the same config reproduces the same sky.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use terrella::scatter;

use crate::mesh::starfield_mesh;
use crate::scene::{SceneConfig, SceneSet, SceneTag, SpawnScene};
use crate::star_material::StarfieldMaterial;

/// Plugin owning the starfield.
pub struct StarfieldPlugin;

impl Plugin for StarfieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, spawn_starfield.in_set(SceneSet::Spawn));
    }
}

/// Spawn the star shell around the whole scene.
fn spawn_starfield(
    mut commands: Commands,
    mut spawns: MessageReader<SpawnScene>,
    config: Res<SceneConfig>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StarfieldMaterial>>,
) {
    if spawns.read().count() == 0 {
        return;
    }

    let stars = scatter(config.star_count, config.star_seed);
    commands.spawn((
        SceneTag,
        Mesh3d(meshes.add(starfield_mesh(&stars))),
        MeshMaterial3d(materials.add(StarfieldMaterial {
            sprite: Some(asset_server.load("sprites/star.png")),
        })),
        Transform::default(),
    ));
    tracing::debug!(stars = stars.len(), "starfield spawned");
}
